//! Turn controller: owns one game's board and turn state, applies drops and
//! answers with the bot when it is the bot's turn.

use tracing::{debug, info, warn};

use crate::ai::{Agent, GreedyAgent};
use crate::error::MoveError;

use super::board::{Board, Placement, COLS};
use super::line::{detect_line, Line};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum GameMode {
    #[serde(rename = "two-player")]
    TwoPlayer,
    #[serde(rename = "vs-bot")]
    SinglePlayerVsBot,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::TwoPlayer => "Two players",
            GameMode::SinglePlayerVsBot => "Versus bot",
        }
    }

    pub fn toggled(self) -> GameMode {
        match self {
            GameMode::TwoPlayer => GameMode::SinglePlayerVsBot,
            GameMode::SinglePlayerVsBot => GameMode::TwoPlayer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOutcome {
    InProgress,
    Won { player: Player, line: Line },
    Draw,
}

impl GameOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Won { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// The bot's automatic answer to a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub placement: Placement,
    pub outcome: GameOutcome,
}

/// Result of an accepted drop. `outcome` is the state right after the
/// caller's own token; the bot's reply carries its own outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropReport {
    pub placement: Placement,
    pub outcome: GameOutcome,
    pub bot_reply: Option<BotReply>,
}

/// Read-only view of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub active_player: Player,
    pub outcome: GameOutcome,
    pub mode: GameMode,
}

pub struct Session {
    board: Board,
    active_player: Player,
    outcome: GameOutcome,
    mode: GameMode,
    bot_player: Player,
    agent: Box<dyn Agent>,
    /// Stands in when `agent` picks a column that cannot be played.
    fallback: GreedyAgent,
    auto_reply: bool,
    held: bool,
    moves: Vec<Placement>,
}

impl Session {
    /// New game with the greedy bot playing `B`.
    pub fn new(mode: GameMode) -> Self {
        Self::with_agent(mode, Player::B, Box::new(GreedyAgent::new()))
    }

    /// With auto reply on (the default), a bot playing `A` opens the game
    /// before this returns.
    pub fn with_agent(mode: GameMode, bot_player: Player, agent: Box<dyn Agent>) -> Self {
        info!(mode = mode.label(), bot = bot_player.name(), agent = agent.name(), "new game");
        let mut session = Session {
            board: Board::new(),
            active_player: Player::A,
            outcome: GameOutcome::InProgress,
            mode,
            bot_player,
            agent,
            fallback: GreedyAgent::new(),
            auto_reply: true,
            held: false,
            moves: Vec::new(),
        };
        session.open_for_bot();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn outcome(&self) -> &GameOutcome {
        &self.outcome
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn bot_player(&self) -> Player {
        self.bot_player
    }

    /// Every token placed this game, in order.
    pub fn moves(&self) -> &[Placement] {
        &self.moves
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            active_player: self.active_player,
            outcome: self.outcome.clone(),
            mode: self.mode,
        }
    }

    /// True when the game is running against the bot and the bot is to move.
    pub fn bot_to_move(&self) -> bool {
        self.mode == GameMode::SinglePlayerVsBot
            && !self.outcome.is_over()
            && self.active_player == self.bot_player
    }

    /// When off, `drop_token` never answers for the bot and the caller drives
    /// the bot through [`Session::play_bot_turn`].
    pub fn set_auto_reply(&mut self, auto_reply: bool) {
        self.auto_reply = auto_reply;
    }

    /// Mark a move as in flight. Drops are refused until [`Session::release`].
    pub fn hold(&mut self) {
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Drop a token for the active player. Against the bot, a drop on the
    /// bot's turn is refused, and with auto reply on the bot answers before
    /// this returns.
    pub fn drop_token(&mut self, column: usize) -> Result<DropReport, MoveError> {
        if self.held {
            debug!(column, "drop refused: move in flight");
            return Err(MoveError::MoveInFlight);
        }
        if self.bot_to_move() {
            debug!(column, "drop refused: bot to move");
            return Err(MoveError::MoveInFlight);
        }

        let placement = self.apply(column)?;
        let outcome = self.outcome.clone();

        let bot_reply = if self.auto_reply {
            self.play_bot_turn()
        } else {
            None
        };

        Ok(DropReport {
            placement,
            outcome,
            bot_reply,
        })
    }

    /// Let the bot move if it is its turn. `None` when it is not the bot's
    /// turn, the session is held, or the game is over. A column the agent
    /// cannot play is replaced by the greedy choice, so the bot always moves.
    pub fn play_bot_turn(&mut self) -> Option<BotReply> {
        if self.held || !self.bot_to_move() {
            return None;
        }

        let chosen = self.agent.select_column(&self.board, self.bot_player);
        let placement = match chosen.map(|column| self.apply(column)) {
            Some(Ok(placement)) => placement,
            rejected => {
                warn!(
                    agent = self.agent.name(),
                    column = ?chosen,
                    legal = ?self.board.legal_columns(),
                    error = ?rejected.and_then(Result::err),
                    "agent chose an illegal column, using greedy fallback"
                );
                let column = self.fallback.select_column(&self.board, self.bot_player)?;
                self.apply(column).ok()?
            }
        };

        Some(BotReply {
            placement,
            outcome: self.outcome.clone(),
        })
    }

    /// Fresh board, `A` to move, same mode. With auto reply on, a bot
    /// playing `A` opens straight away.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.active_player = Player::A;
        self.outcome = GameOutcome::InProgress;
        self.held = false;
        self.moves.clear();
        info!(mode = self.mode.label(), "game reset");
        self.open_for_bot();
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    fn open_for_bot(&mut self) {
        if self.auto_reply {
            if let Some(reply) = self.play_bot_turn() {
                debug!(row = reply.placement.row, column = reply.placement.col, "bot opened");
            }
        }
    }

    fn apply(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.outcome.is_over() {
            debug!(column, "drop refused: game over");
            return Err(MoveError::GameAlreadyOver);
        }
        if column >= COLS {
            debug!(column, "drop refused: invalid column");
            return Err(MoveError::InvalidColumn(column));
        }
        let row = self.board.lowest_empty_row(column).ok_or_else(|| {
            debug!(column, "drop refused: column full");
            MoveError::ColumnFull(column)
        })?;

        let player = self.active_player;
        self.board.set(row, column, player.to_cell());
        let placement = Placement { row, col: column };
        self.moves.push(placement);
        debug!(player = player.name(), row, column, "token placed");

        if let Some(line) = detect_line(&self.board, row, column) {
            info!(player = player.name(), plies = self.moves.len(), "game won");
            self.outcome = GameOutcome::Won { player, line };
        } else if self.board.is_full() {
            info!("game drawn");
            self.outcome = GameOutcome::Draw;
        } else {
            self.active_player = player.other();
        }

        Ok(placement)
    }
}
