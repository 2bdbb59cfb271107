//! One-ply greedy bot: win if possible, otherwise block, otherwise play
//! towards the center.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::game::{detect_line, Board, Player, COLS};

use super::agent::Agent;

/// Center-out column preference for the positional tier.
pub const PREFERENCE: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Which rule produced a bot move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Win,
    Block,
    Position,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotDecision {
    pub column: usize,
    pub tier: Tier,
}

pub struct GreedyAgent {
    rng: StdRng,
}

impl GreedyAgent {
    pub fn new() -> Self {
        GreedyAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic random tier, for replays and tests.
    pub fn with_seed(seed: u64) -> Self {
        GreedyAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Run the tiers in priority order. Simulations happen on copies, so
    /// `board` is never touched.
    pub fn decide(&mut self, board: &Board, player: Player) -> Option<BotDecision> {
        let decision = if let Some(column) = completing_column(board, player) {
            BotDecision {
                column,
                tier: Tier::Win,
            }
        } else if let Some(column) = completing_column(board, player.other()) {
            BotDecision {
                column,
                tier: Tier::Block,
            }
        } else if let Some(&column) = PREFERENCE.iter().find(|&&col| !board.is_column_full(col)) {
            BotDecision {
                column,
                tier: Tier::Position,
            }
        } else {
            let legal = board.legal_columns();
            if legal.is_empty() {
                return None;
            }
            let column = legal[self.rng.random_range(0..legal.len())];
            BotDecision {
                column,
                tier: Tier::Random,
            }
        };

        debug!(
            player = player.name(),
            column = decision.column,
            tier = ?decision.tier,
            "bot chose column"
        );
        Some(decision)
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for GreedyAgent {
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize> {
        self.decide(board, player).map(|decision| decision.column)
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}

/// Leftmost column where a `player` token would complete a line.
fn completing_column(board: &Board, player: Player) -> Option<usize> {
    (0..COLS).find(|&col| {
        board.lowest_empty_row(col).is_some_and(|row| {
            let mut scratch = *board;
            scratch.set(row, col, player.to_cell());
            detect_line(&scratch, row, col).is_some()
        })
    })
}
