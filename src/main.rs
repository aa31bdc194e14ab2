use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::Level;

use minimax_connect_four::arena::play_match_observed;
use minimax_connect_four::config::{AgentKind, AppConfig};
use minimax_connect_four::game::{GameOutcome, GameState, Player};

/// Play one Connect Four match between two agents.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four between two agents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect4.toml")]
    config: PathBuf,

    /// Agent playing Red (moves first): random, rules or minimax
    #[arg(long)]
    red: Option<AgentKind>,

    /// Agent playing Yellow: random, rules or minimax
    #[arg(long)]
    yellow: Option<AgentKind>,

    /// Override minimax search depth
    #[arg(long)]
    depth: Option<u32>,

    /// Seed for the random and rule-based agents
    #[arg(long)]
    seed: Option<u64>,

    /// Search root moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the match record as JSON instead of boards
    #[arg(long)]
    json: bool,

    /// Only print the result
    #[arg(long, short)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(level).context("initializing logger")?;

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(red) = cli.red {
        config.players.red = red;
    }
    if let Some(yellow) = cli.yellow {
        config.players.yellow = yellow;
    }
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if cli.seed.is_some() {
        config.players.seed = cli.seed;
    }
    if cli.parallel {
        config.search.parallel = true;
    }
    config.validate().context("invalid configuration")?;

    let mut red = config.players.agent_for(Player::Red, &config.search);
    let mut yellow = config.players.agent_for(Player::Yellow, &config.search);

    let show_boards = !cli.json && !cli.quiet;
    if show_boards {
        println!("{}\n", GameState::initial().board());
    }

    let record = play_match_observed(GameState::initial(), &mut *red, &mut *yellow, |state, mv| {
        if show_boards {
            match mv.stats {
                Some(stats) => println!(
                    "{} plays column {} (depth {}, {} nodes, {} cutoffs)",
                    mv.player, mv.column, stats.depth, stats.nodes, stats.cutoffs
                ),
                None => println!("{} plays column {}", mv.player, mv.column),
            }
            println!("{}\n", state.board());
        }
    })
    .context("playing match")?;

    if cli.json {
        println!("{}", record.to_json().context("serializing match record")?);
        return Ok(());
    }

    match record.outcome {
        GameOutcome::Winner(player) => println!(
            "{player} ({}) wins after {} moves",
            record.winner_name().unwrap_or("?"),
            record.game_length()
        ),
        GameOutcome::Draw => println!("Draw after {} moves", record.game_length()),
    }
    Ok(())
}
