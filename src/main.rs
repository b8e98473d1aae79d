mod entities;
mod event;
mod game;
mod game_stats;
mod scores;
mod settings;
mod ui;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use event::{Event, EventHandler};
use game::{InputMode, SidewaysShooter};
use scores::HighScoreStore;
use settings::Settings;

/// Side-scrolling shooter for the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// High score file (defaults to high_score.json next to the executable)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Frame period in milliseconds
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    tick_rate: u64,

    /// Ships per game
    #[arg(long, default_value_t = 3)]
    ship_limit: u32,

    /// Bullets allowed on screen at once
    #[arg(long, default_value_t = 3)]
    bullets: usize,

    /// Write logs to this file (filter with RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode, alternate screen, mouse capture, and key release reporting when
/// the terminal has it. Returns whether releases will be reported. On failure
/// the terminal is put back the way it was.
fn setup_terminal() -> Result<(Tui, bool)> {
    enable_raw_mode()?;
    let mut releases = false;
    match enter_tui(&mut releases) {
        Ok(terminal) => Ok((terminal, releases)),
        Err(err) => {
            let mut stdout = io::stdout();
            if releases {
                let _ = execute!(stdout, PopKeyboardEnhancementFlags);
            }
            let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture);
            let _ = disable_raw_mode();
            Err(err)
        }
    }
}

fn enter_tui(releases: &mut bool) -> Result<Tui> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    if supports_keyboard_enhancement().unwrap_or(false) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        *releases = true;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Undo `setup_terminal`. Every step is attempted; the first error wins.
fn restore_terminal(terminal: &mut Tui, releases: bool) -> Result<()> {
    let popped = if releases {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let raw = disable_raw_mode();
    let left = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let cursor = terminal.show_cursor();
    popped.and(raw).and(left).and(cursor)?;
    Ok(())
}

fn run(terminal: &mut Tui, game: &mut SidewaysShooter, events: &mut EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, game))?;

        match events.next()? {
            Event::Tick => game.on_tick(),
            Event::SpawnAlien => game.on_spawn_tick(),
            Event::Key(key) => game.on_key(key),
            Event::Mouse(mouse) => game.on_mouse(mouse),
            Event::Resize => {}
        }

        if let Some(interval) = game.take_spawn_interval() {
            events.set_spawn_interval(interval);
        }

        if game.should_quit() {
            return Ok(());
        }
    }
}

/// Persist the high score, then restore the terminal. The score is written
/// even if restoring fails.
fn shut_down(
    store: &HighScoreStore,
    high_score: u32,
    restore: impl FnOnce() -> Result<()>,
) -> Result<()> {
    let saved = store.save(high_score);
    let restored = restore();
    if let Err(err) = saved {
        warn!("could not save high score: {err:#}");
        eprintln!("could not save high score: {err:#}");
    }
    restored
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let store = HighScoreStore::new(args.scores.unwrap_or_else(HighScoreStore::default_path));
    let high_score = store.load();
    info!("high score {} from {}", high_score, store.path().display());

    let settings = Settings {
        ship_limit: args.ship_limit,
        bullets_allowed: args.bullets,
        frame_period: Duration::from_millis(args.tick_rate),
        ..Settings::default()
    };
    let mut events = EventHandler::new(args.tick_rate, settings.spawn_interval());
    let mut game = SidewaysShooter::new(settings, high_score);

    let (mut terminal, releases) = setup_terminal()?;
    if !releases {
        warn!("terminal does not report key releases, movement keys auto-release");
        game.set_input_mode(InputMode::AutoRelease);
    }

    let outcome = run(&mut terminal, &mut game, &mut events);
    let restored = shut_down(&store, game.stats().high_score, || {
        restore_terminal(&mut terminal, releases)
    });
    restored.and(outcome)
}
