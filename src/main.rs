use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use connect_four::ai::GreedyAgent;
use connect_four::config::AppConfig;
use connect_four::game::{GameMode, Player, Session};
use connect_four::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Game mode: two-player or vs-bot
    #[arg(long)]
    mode: Option<String>,

    /// Color the bot plays in vs-bot games: a (Red, moves first) or b (Yellow)
    #[arg(long)]
    bot_player: Option<String>,

    /// Seed for the bot's random fallback
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(mode) = cli.mode.as_deref() {
        config.game.mode = match mode {
            "two-player" => GameMode::TwoPlayer,
            "vs-bot" => GameMode::SinglePlayerVsBot,
            other => bail!("unknown mode '{}' (expected 'two-player' or 'vs-bot')", other),
        };
    }
    if let Some(bot_player) = cli.bot_player.as_deref() {
        config.game.bot_player = match bot_player {
            "a" => Player::A,
            "b" => Player::B,
            other => bail!("unknown bot player '{}' (expected 'a' or 'b')", other),
        };
    }
    if cli.seed.is_some() {
        config.bot.seed = cli.seed;
    }

    // Logs go to a file; the terminal belongs to the UI.
    let log_file = std::fs::File::create(&config.ui.log_file)
        .with_context(|| format!("creating log file {}", config.ui.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(mode = config.game.mode.label(), seed = ?config.bot.seed, "starting");

    let agent = match config.bot.seed {
        Some(seed) => GreedyAgent::with_seed(seed),
        None => GreedyAgent::new(),
    };
    let session = Session::with_agent(config.game.mode, config.game.bot_player, Box::new(agent));

    run(App::new(session, &config.ui)).context("running terminal UI")
}

fn run(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
