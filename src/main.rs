mod app;
mod config;
mod domain;
mod input;
mod logging;
mod session;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{config_path, ensure_app_dir, init_local_dir, load_config, LOG_FILE_NAME};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_clock, Mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A focus/break countdown timer with a session task list", long_about = None)]
struct Cli {
    /// Mode to open in (focus or break). Overrides config.json.
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Log filter (e.g. "debug"). Overrides config.json; RUST_LOG wins over both.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focusflow directory with a default config.json
    Init,
    /// Print a number of seconds as MM:SS
    Clock {
        seconds: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let current_dir = std::env::current_dir().context("Could not determine current directory")?;
            let dir = init_local_dir(&current_dir)?;
            println!("Initialized focusflow directory: {}", dir.display());
            println!("Edit {} to change defaults.", config_path(&dir).display());
            Ok(())
        }
        Some(Commands::Clock { seconds }) => {
            println!("{}", format_clock(seconds));
            Ok(())
        }
        None => run_tui(cli.mode, cli.log_level),
    }
}

fn run_tui(mode: Option<Mode>, log_level: Option<String>) -> Result<()> {
    let app_dir = ensure_app_dir()?;
    let config = load_config(config_path(&app_dir))?;

    let level = log_level.unwrap_or_else(|| config.log_level.clone());
    let _log_guard = logging::init_tracing(&app_dir, LOG_FILE_NAME, &level)?;

    let start_mode = mode.unwrap_or(config.start_mode);
    info!(dir = %app_dir.display(), mode = %start_mode, "starting session");

    let mut app = AppState::new(start_mode, config.use_emoji);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let stats = app.session.stats();
    info!(
        focus_seconds = stats.focus_seconds,
        completed_focus = stats.completed_focus,
        tasks = app.session.tasks().len(),
        "session closed"
    );

    if let Err(err) = result {
        error!(error = %err, "event loop failed");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Block on input only until the next tick is due
        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
