use log::{debug, info};

use crate::ai::Agent;
use crate::error::MatchError;
use crate::game::{GameState, Player};

use super::record::{MatchRecord, MoveRecord};

/// Play a full match from the initial position. Red moves first.
pub fn play_match(red: &mut dyn Agent, yellow: &mut dyn Agent) -> Result<MatchRecord, MatchError> {
    play_from(GameState::initial(), red, yellow)
}

/// Play out a match from an arbitrary position.
pub fn play_from(
    state: GameState,
    red: &mut dyn Agent,
    yellow: &mut dyn Agent,
) -> Result<MatchRecord, MatchError> {
    play_match_observed(state, red, yellow, |_, _| {})
}

/// Play out a match, calling `on_move` with the state after every move.
pub fn play_match_observed(
    mut state: GameState,
    red: &mut dyn Agent,
    yellow: &mut dyn Agent,
    mut on_move: impl FnMut(&GameState, &MoveRecord),
) -> Result<MatchRecord, MatchError> {
    info!("match start: {} (Red) vs {} (Yellow)", red.name(), yellow.name());
    let mut moves = Vec::new();

    while !state.is_terminal() {
        let player = state.current_player();
        let agent: &mut dyn Agent = match player {
            Player::Red => &mut *red,
            Player::Yellow => &mut *yellow,
        };

        let decision = agent.choose(&state).ok_or_else(|| MatchError::NoMove {
            agent: agent.name().to_string(),
        })?;
        state
            .place(decision.column, player)
            .map_err(|source| MatchError::IllegalMove {
                agent: agent.name().to_string(),
                column: decision.column,
                source,
            })?;
        debug!("{} ({player}) played column {}", agent.name(), decision.column);

        let record = MoveRecord {
            player,
            column: decision.column,
            stats: decision.stats,
        };
        on_move(&state, &record);
        moves.push(record);
    }

    let outcome = state.outcome().ok_or(MatchError::MissingOutcome)?;
    let record = MatchRecord {
        red: red.name().to_string(),
        yellow: yellow.name().to_string(),
        moves,
        outcome,
        final_board: *state.board(),
    };
    info!(
        "match over after {} moves: {}",
        record.game_length(),
        record.winner_name().unwrap_or("draw")
    );
    Ok(record)
}
