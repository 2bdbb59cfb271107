use crate::game::{Board, Cell, GameMode, GameOutcome, Placement, Player, Snapshot, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the game screen needs for one frame.
pub struct View<'a> {
    pub snapshot: &'a Snapshot,
    pub bot_player: Player,
    pub selected_column: usize,
    /// Token still falling: its final placement and the row it is drawn at.
    pub falling: Option<(Placement, usize)>,
    pub thinking: bool,
    pub message: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::A => Color::Red,
        Player::B => Color::Yellow,
    }
}

fn player_label(view: &View, player: Player) -> String {
    match view.snapshot.mode {
        GameMode::TwoPlayer => player.name().to_string(),
        GameMode::SinglePlayerVsBot if player == view.bot_player => {
            format!("{} (bot)", player.name())
        }
        GameMode::SinglePlayerVsBot => format!("{} (you)", player.name()),
    }
}

fn render_header(frame: &mut Frame, view: &View, area: Rect) {
    let snapshot = view.snapshot;
    let mode = snapshot.mode.label();

    let (status, color) = match &snapshot.outcome {
        GameOutcome::Won { player, .. } => (
            format!("{} wins!  |  {}", player_label(view, *player), mode),
            player_color(*player),
        ),
        GameOutcome::Draw => (format!("Draw  |  {}", mode), Color::White),
        GameOutcome::InProgress if view.thinking => (
            format!("{} is thinking...  |  {}", player_label(view, view.bot_player), mode),
            player_color(view.bot_player),
        ),
        GameOutcome::InProgress => (
            format!(
                "Current Player: {}  |  {}",
                player_label(view, snapshot.active_player),
                mode
            ),
            player_color(snapshot.active_player),
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

/// Cell to draw at (row, col), accounting for a token still in the air.
fn visible_cell(board: &Board, falling: Option<(Placement, usize)>, row: usize, col: usize) -> Cell {
    match falling {
        Some((placement, shown_row)) if placement.col == col => {
            if row == shown_row {
                board.get(placement.row, placement.col)
            } else if row == placement.row {
                Cell::Empty
            } else {
                board.get(row, col)
            }
        }
        _ => board.get(row, col),
    }
}

fn render_board(frame: &mut Frame, view: &View, area: Rect) {
    let board = &view.snapshot.board;
    let winning = match &view.snapshot.outcome {
        GameOutcome::Won { line, .. } if view.falling.is_none() => Some(line),
        _ => None,
    };

    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == view.selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let in_line = winning.is_some_and(|line| line.contains(row, col));
            let (symbol, color) = match visible_cell(board, view.falling, row, col) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::A if in_line => (" ◉ ", Color::Red),
                Cell::B if in_line => (" ◉ ", Color::Yellow),
                Cell::A => (" ● ", Color::Red),
                Cell::B => (" ● ", Color::Yellow),
            };
            let mut style = Style::default().fg(color);
            if in_line {
                style = style.add_modifier(Modifier::BOLD);
            }
            row_spans.push(Span::styled(symbol, style));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == view.selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→ or 1-7: Move  |  Enter: Drop  |  M: Mode  |  R: Restart  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Controls"),
    );

    frame.render_widget(controls, area);
}
