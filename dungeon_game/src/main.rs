//! Dungeon Game - A terminal dungeon battler built on combat_core
//!
//! - Camp: rest, change floors, save
//! - Battle: pick abilities and targets for each party member in turn
//! - Equipment: move gear between the party and the bag

mod game;
mod ui;

use clap::Parser;
use combat_core::config::GameData;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{GameState, Screen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_DIR: &str = "logs";
const DEFAULT_SAVE: &str = "dungeon_save.json";

#[derive(Parser, Debug)]
#[command(name = "dungeon_game")]
#[command(version, about = "Dungeon Game - Lead a party of three through the dungeon", long_about = None)]
struct Args {
    /// Seed for encounters and battle rolls (default: current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory with TOML overrides for the bundled game data
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file to load at start and write on save
    #[arg(long, default_value = DEFAULT_SAVE)]
    save: PathBuf,
}

/// Log to a file; the terminal belongs to the UI
fn setup_logging() -> io::Result<()> {
    std::fs::create_dir_all(LOG_DIR)?;
    let file_appender = tracing_appender::rolling::never(LOG_DIR, "dungeon_game.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry().with(env_filter).with(file_layer).init();

    // Keep the writer alive for the whole run
    std::mem::forget(guard);
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
    });

    if let Err(e) = setup_logging() {
        eprintln!("Warning: logging disabled: {e}");
    }

    // Load data before terminal setup so errors are visible
    let data = match &args.config {
        Some(dir) => GameData::load_from_dir(dir),
        None => GameData::load_default(),
    };
    let data = match data {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: Cannot load game data: {e}");
            return Err(io::Error::new(io::ErrorKind::InvalidData, e.to_string()));
        }
    };
    let mut state = match GameState::new(data, seed, args.save) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: Cannot start a game: {e}");
            return Err(io::Error::new(io::ErrorKind::InvalidData, e.to_string()));
        }
    };

    // Setup terminal
    if let Err(e) = enable_raw_mode() {
        eprintln!("Error: Cannot enable raw mode: {}", e);
        eprintln!("This game requires a terminal. Run it directly, not piped or in a non-TTY context.");
        return Err(e);
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        eprintln!("Error: Cannot enter alternate screen: {}", e);
        return Err(e);
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            eprintln!("Error: Cannot create terminal: {}", e);
            return Err(e);
        }
    };

    let result = run(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, state: &mut GameState) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.screen {
            Screen::Camp => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('f') => state.start_battle(),
                KeyCode::Char('d') => state.descend(),
                KeyCode::Char('a') => state.ascend(),
                KeyCode::Char('r') => state.rest(),
                KeyCode::Char('e') => state.open_equipment(),
                KeyCode::Char('s') => state.save(),
                _ => {}
            },
            Screen::Battle => match key.code {
                KeyCode::Left | KeyCode::Char('h') => state.next_target(-1),
                KeyCode::Right | KeyCode::Char('l') => state.next_target(1),
                KeyCode::Up | KeyCode::Char('k') => state.next_ability(-1),
                KeyCode::Down | KeyCode::Char('j') => state.next_ability(1),
                KeyCode::Enter => state.use_selected_ability(),
                KeyCode::Tab => state.next_potion(),
                KeyCode::Char('p') => state.use_selected_potion(),
                KeyCode::Char('f') => state.flee(),
                KeyCode::Char(' ') => state.advance_battle(),
                _ => {}
            },
            Screen::Equipment => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => state.screen = Screen::Camp,
                KeyCode::Up | KeyCode::Char('k') => state.move_cursor(-1),
                KeyCode::Down | KeyCode::Char('j') => state.move_cursor(1),
                KeyCode::Tab => state.toggle_focus(),
                KeyCode::Char('m') => state.next_member(),
                KeyCode::Enter => state.equip_selected(),
                KeyCode::Char('u') => state.unequip_selected(),
                _ => {}
            },
        }
    }
}
