use crate::game::{Board, Player};

/// Universal interface for anything that picks columns on its own.
pub trait Agent {
    /// Pick a column for `player` on `board`. `None` only when no column
    /// accepts a token.
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
