use crate::game::GameState;

/// Diagnostics from one search, returned next to the chosen move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchStats {
    /// Configured depth limit in plies.
    pub depth: u32,
    /// Nodes visited, root included.
    pub nodes: u64,
    /// Sibling loops cut short by alpha-beta.
    pub cutoffs: u64,
}

impl SearchStats {
    pub(crate) fn absorb(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// A column choice plus optional search diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub column: usize,
    pub stats: Option<SearchStats>,
}

impl Decision {
    /// A decision made without search.
    pub fn plain(column: usize) -> Self {
        Decision {
            column,
            stats: None,
        }
    }
}

/// Universal interface for all move-selecting agents.
pub trait Agent: Send {
    /// Choose a column for the side to move in `state`.
    ///
    /// Returns `None` only when `state` has no legal column.
    fn choose(&mut self, state: &GameState) -> Option<Decision>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Clone the agent into a boxed trait object.
    fn clone_agent(&self) -> Box<dyn Agent>;
}
