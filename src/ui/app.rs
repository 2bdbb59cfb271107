use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::debug;

use crate::config::UiConfig;
use crate::game::{GameOutcome, Placement, Session, COLS};

use super::game_view::{self, View};

const TICK: Duration = Duration::from_millis(16);

/// What the screen is busy with. The session stays held for every phase
/// except `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Falling {
        placement: Placement,
        shown_row: usize,
        next_step: Instant,
    },
    BotThinking {
        until: Instant,
    },
}

pub struct App {
    session: Session,
    drop_frame: Duration,
    bot_delay: Duration,
    selected_column: usize,
    phase: Phase,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// Takes over pacing of the bot: the session's automatic reply is turned
    /// off and the bot moves after `ui.bot_delay_ms`.
    pub fn new(mut session: Session, ui: &UiConfig) -> Self {
        session.set_auto_reply(false);
        let mut app = App {
            session,
            drop_frame: Duration::from_millis(ui.drop_frame_ms),
            bot_delay: Duration::from_millis(ui.bot_delay_ms),
            selected_column: 3, // Start in middle
            phase: Phase::Idle,
            should_quit: false,
            message: None,
        };
        app.schedule_bot(Instant::now());
        app
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece(now);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(now);
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.phase = Phase::Idle;
                self.message = Some("New game started!".to_string());
                self.schedule_bot(now);
            }
            KeyCode::Char('m') => {
                let mode = self.session.mode().toggled();
                self.session.set_mode(mode);
                self.phase = Phase::Idle;
                self.message = Some(format!("{} - new game started!", mode.label()));
                self.schedule_bot(now);
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self, now: Instant) {
        if self.session.outcome().is_over() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }

        match self.session.drop_token(self.selected_column) {
            Ok(report) => {
                self.message = None;
                self.start_falling(report.placement, now);
            }
            Err(err) => {
                debug!(%err, "drop rejected by session");
                self.message = Some(capitalize(&err.to_string()));
            }
        }
    }

    /// Advance animation and bot timers.
    fn tick(&mut self, now: Instant) {
        match self.phase {
            Phase::Idle => {}
            Phase::Falling {
                placement,
                shown_row,
                next_step,
            } => {
                if now < next_step {
                    return;
                }
                if shown_row < placement.row {
                    self.phase = Phase::Falling {
                        placement,
                        shown_row: shown_row + 1,
                        next_step: now + self.drop_frame,
                    };
                } else {
                    self.finish_drop(now);
                }
            }
            Phase::BotThinking { until } => {
                if now < until {
                    return;
                }
                self.session.release();
                match self.session.play_bot_turn() {
                    Some(reply) => self.start_falling(reply.placement, now),
                    None => self.phase = Phase::Idle,
                }
            }
        }
    }

    fn start_falling(&mut self, placement: Placement, now: Instant) {
        self.session.hold();
        self.phase = Phase::Falling {
            placement,
            shown_row: 0,
            next_step: now + self.drop_frame,
        };
    }

    /// The token has landed: announce the result or hand over to the bot.
    fn finish_drop(&mut self, now: Instant) {
        self.session.release();
        self.phase = Phase::Idle;

        match self.session.outcome() {
            GameOutcome::Won { player, .. } => {
                self.message = Some(format!("{} wins! Press 'r' to play again.", player.name()));
            }
            GameOutcome::Draw => {
                self.message = Some("It's a draw! Press 'r' to play again.".to_string());
            }
            GameOutcome::InProgress => self.schedule_bot(now),
        }
    }

    fn schedule_bot(&mut self, now: Instant) {
        if self.session.bot_to_move() {
            self.session.hold();
            self.phase = Phase::BotThinking {
                until: now + self.bot_delay,
            };
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let snapshot = self.session.snapshot();
        let falling = match self.phase {
            Phase::Falling {
                placement,
                shown_row,
                ..
            } => Some((placement, shown_row)),
            _ => None,
        };
        let view = View {
            snapshot: &snapshot,
            bot_player: self.session.bot_player(),
            selected_column: self.selected_column,
            falling,
            thinking: matches!(self.phase, Phase::BotThinking { .. }),
            message: self.message.as_deref(),
        };
        game_view::render(frame, &view);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GreedyAgent;
    use crate::game::{Cell, GameMode, Player};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(mode: GameMode) -> App {
        let session = Session::with_agent(mode, Player::B, Box::new(GreedyAgent::with_seed(3)));
        let ui = UiConfig {
            bot_delay_ms: 100,
            drop_frame_ms: 10,
            ..UiConfig::default()
        };
        App::new(session, &ui)
    }

    /// Tick far enough ahead for every pending step to fire.
    fn settle(app: &mut App, mut now: Instant) -> Instant {
        for _ in 0..64 {
            now += Duration::from_millis(200);
            app.tick(now);
            if app.phase == Phase::Idle {
                break;
            }
        }
        now
    }

    #[test]
    fn test_drop_animates_then_releases() {
        let mut app = app(GameMode::TwoPlayer);
        let now = Instant::now();
        app.handle_key(key(KeyCode::Enter), now);

        assert!(app.session.is_held());
        assert!(matches!(app.phase, Phase::Falling { shown_row: 0, .. }));
        assert_eq!(app.session.board().get(5, 3), Cell::A);

        // A second drop while the first is falling is refused.
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.session.board().filled(), 1);
        assert!(app.message.is_some());

        settle(&mut app, now);
        assert_eq!(app.phase, Phase::Idle);
        assert!(!app.session.is_held());
        assert_eq!(app.session.active_player(), Player::B);
    }

    #[test]
    fn test_bot_waits_then_moves() {
        let mut app = app(GameMode::SinglePlayerVsBot);
        let mut now = Instant::now();
        app.handle_key(key(KeyCode::Char('1')), now);

        // Land the human token; the bot starts thinking.
        while matches!(app.phase, Phase::Falling { .. }) {
            now += Duration::from_millis(10);
            app.tick(now);
        }
        assert!(matches!(app.phase, Phase::BotThinking { .. }));
        assert!(app.session.is_held());
        assert_eq!(app.session.board().filled(), 1);

        settle(&mut app, now);
        assert_eq!(app.session.board().filled(), 2);
        assert_eq!(app.session.board().get(5, 3), Cell::B);
        assert_eq!(app.session.active_player(), Player::A);
        assert!(!app.session.is_held());
    }

    #[test]
    fn test_mode_toggle_resets() {
        let mut app = app(GameMode::TwoPlayer);
        let now = Instant::now();
        app.handle_key(key(KeyCode::Enter), now);
        app.handle_key(key(KeyCode::Char('m')), now);

        assert_eq!(app.session.mode(), GameMode::SinglePlayerVsBot);
        assert_eq!(app.session.board().filled(), 0);
        assert_eq!(app.phase, Phase::Idle);
        assert!(!app.session.is_held());
    }

    #[test]
    fn test_win_message() {
        let mut app = app(GameMode::TwoPlayer);
        let mut now = Instant::now();
        for c in ['1', '1', '2', '2', '3', '3', '4'] {
            app.handle_key(key(KeyCode::Char(c)), now);
            now = settle(&mut app, now);
        }
        assert_eq!(app.session.outcome().winner(), Some(Player::A));
        assert_eq!(
            app.message.as_deref(),
            Some("Red wins! Press 'r' to play again.")
        );
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = app(GameMode::TwoPlayer);
        let now = Instant::now();
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Left), now);
        }
        assert_eq!(app.selected_column, 0);
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Right), now);
        }
        assert_eq!(app.selected_column, COLS - 1);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("column 2 is full"), "Column 2 is full");
        assert_eq!(capitalize(""), "");
    }
}
