//! Core Connect Four game logic: board and gravity, players, line detection
//! and the turn controller that owns a game session.

mod board;
mod line;
mod player;
mod session;

pub use board::{Board, Cell, Placement, COLS, ROWS};
pub use line::{detect_line, Axis, Line, WIN_LENGTH};
pub use player::Player;
pub use session::{BotReply, DropReport, GameMode, GameOutcome, Session, Snapshot};
