mod input;
mod ui;

use crossterm::cursor::Show;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use directories::ProjectDirs;
use input::TerminalInput;
use kosh::core::{GameRng, InputEvent, InputSource, Key};
use kosh::save::SaveManager;
use kosh::{HostEvent, PlayerProfile, QuestHost, QuestOutcome};
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use ui::menu_scene::{main_menu_items, overworld_items, MainMenuItem, OverworldItem};

const FRAME: Duration = Duration::from_millis(16);
const SECRET_NOTICE: &str = "Something rustles inside the wardrobe...";

/// Which screen the shell is showing.
pub(crate) enum Screen {
    MainMenu {
        selected: usize,
    },
    Overworld {
        selected: usize,
        notice: Option<String>,
    },
    Quest,
    Outcome(QuestOutcome),
}

#[derive(Default)]
struct ShellConfig {
    seed: Option<u64>,
    save_path: Option<PathBuf>,
}

fn parse_args() -> ShellConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = ShellConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                config.seed = Some(arg_value(&args, i, "--seed"));
            }
            "--save" => {
                i += 1;
                config.save_path = Some(arg_value(&args, i, "--save"));
            }
            "--version" | "-v" => {
                println!("kosh {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Run 'kosh --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn arg_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|raw| raw.parse()) {
        Some(Ok(value)) => value,
        _ => {
            eprintln!("{flag} requires a value");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("The Adventures of Kosh\n");
    println!("Usage: kosh [OPTIONS]\n");
    println!("Options:");
    println!("  --seed N      Deterministic quest randomness");
    println!("  --save PATH   Use PATH as the save file");
    println!("  --version     Show version information");
    println!("  --help        Show this help message");
}

/// Log to `kosh.log` in the data directory; the terminal belongs to the UI.
fn init_logging() {
    let Some(dirs) = ProjectDirs::from("", "", "kosh") else {
        return;
    };
    let dir = dirs.data_dir();
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("kosh.log")) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

/// Holds the terminal in UI mode for as long as it lives.
/// Dropping it restores the terminal, whichever way `main` exits.
struct TerminalGuard {
    keyboard_flags: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self {
            keyboard_flags: false,
        };
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        if supports_keyboard_enhancement().unwrap_or(false) {
            stdout.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            guard.keyboard_flags = true;
        }
        Ok(guard)
    }

    /// Whether the terminal will report key releases.
    fn reports_release(&self) -> bool {
        self.keyboard_flags
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_flags {
            let _ = stdout.execute(PopKeyboardEnhancementFlags);
        }
        let _ = stdout.execute(DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }
}

struct App {
    host: QuestHost<GameRng>,
    saves: SaveManager,
    screen: Screen,
    has_save: bool,
    pending_notice: Option<String>,
    quit: bool,
}

impl App {
    fn new(config: ShellConfig) -> io::Result<Self> {
        let saves = match config.save_path {
            Some(path) => SaveManager::with_path(path),
            None => SaveManager::new().map_err(io::Error::other)?,
        };
        let rng = match config.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::from_entropy(),
        };
        Ok(Self::with_parts(QuestHost::new(PlayerProfile::new(), rng), saves))
    }

    fn with_parts(host: QuestHost<GameRng>, saves: SaveManager) -> Self {
        Self {
            host,
            has_save: saves.save_exists(),
            saves,
            screen: Screen::MainMenu { selected: 0 },
            pending_notice: None,
            quit: false,
        }
    }

    fn to_overworld(&mut self) {
        self.screen = Screen::Overworld {
            selected: 0,
            notice: self.pending_notice.take(),
        };
    }

    fn on_menu_key(&mut self, key: Key) {
        match &mut self.screen {
            Screen::MainMenu { selected } => {
                let items = main_menu_items(self.has_save);
                match key {
                    Key::Up | Key::Down => *selected = step(*selected, items.len(), key),
                    Key::Confirm => {
                        let choice = items.get(*selected).copied();
                        self.on_main_menu(choice);
                    }
                    Key::Exit => self.quit = true,
                    _ => {}
                }
            }
            Screen::Overworld { selected, .. } => {
                let items = overworld_items(self.host.profile());
                match key {
                    Key::Up | Key::Down => *selected = step(*selected, items.len(), key),
                    Key::Confirm => {
                        let choice = items.get(*selected).copied();
                        self.on_overworld(choice);
                    }
                    Key::Exit => self.screen = Screen::MainMenu { selected: 0 },
                    _ => {}
                }
            }
            Screen::Outcome(_) => {
                if key == Key::Confirm {
                    self.to_overworld();
                }
            }
            Screen::Quest => {}
        }
    }

    fn on_main_menu(&mut self, choice: Option<MainMenuItem>) {
        match choice {
            Some(MainMenuItem::NewGame) => {
                self.host.new_game();
                self.pending_notice = None;
                self.to_overworld();
            }
            Some(MainMenuItem::Continue) => match self.saves.load() {
                Ok(Some(profile)) => {
                    self.host.load_profile(profile);
                    self.to_overworld();
                }
                Ok(None) => self.has_save = false,
                Err(e) => log::error!("could not load save: {e}"),
            },
            Some(MainMenuItem::Quit) => self.quit = true,
            None => {}
        }
    }

    fn on_overworld(&mut self, choice: Option<OverworldItem>) {
        let notice = match choice {
            Some(OverworldItem::Quest(quest)) => match self.host.start(quest) {
                Ok(()) => {
                    self.screen = Screen::Quest;
                    return;
                }
                Err(e) => e.to_string(),
            },
            Some(OverworldItem::Save) => match self.saves.save(self.host.profile()) {
                Ok(()) => {
                    self.has_save = true;
                    "Game saved.".to_string()
                }
                Err(e) => {
                    log::error!("save failed: {e}");
                    format!("Save failed: {e}")
                }
            },
            Some(OverworldItem::MainMenu) => {
                self.screen = Screen::MainMenu { selected: 0 };
                return;
            }
            None => return,
        };
        if let Screen::Overworld { notice: slot, .. } = &mut self.screen {
            *slot = Some(notice);
        }
    }

    fn on_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::QuestTerminated(outcome) => self.screen = Screen::Outcome(outcome),
            HostEvent::QuestAbandoned(_) => self.to_overworld(),
            HostEvent::SecretUnlocked => self.pending_notice = Some(SECRET_NOTICE.to_string()),
        }
    }

    /// One frame of input and simulation.
    fn update<I: InputSource>(&mut self, input: &mut I) {
        if matches!(self.screen, Screen::Quest) {
            self.host.pump(input);
        } else {
            let dt = input.elapsed();
            self.host.tick(dt);
            for event in input.poll_events() {
                if let InputEvent::KeyDown(key) = event {
                    self.on_menu_key(key);
                }
            }
        }
        for event in self.host.take_events() {
            self.on_host_event(event);
        }
    }
}

/// Move a wrapping menu cursor.
fn step(selected: usize, len: usize, key: Key) -> usize {
    if len == 0 {
        return 0;
    }
    match key {
        Key::Up => (selected + len - 1) % len,
        Key::Down => (selected + 1) % len,
        _ => selected.min(len - 1),
    }
}

fn main() -> io::Result<()> {
    let config = parse_args();
    init_logging();
    let mut app = App::new(config)?;

    let guard = TerminalGuard::enter()?;
    let reports_release = guard.reports_release();
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    log::info!("kosh started (key release reporting: {reports_release})");

    run(&mut terminal, &mut app, reports_release)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    reports_release: bool,
) -> io::Result<()> {
    let mut input = TerminalInput::new(reports_release);
    while !app.quit {
        let mut stage: Option<Rect> = None;
        terminal.draw(|frame| {
            stage = ui::draw(frame, &app.screen, &app.host, app.has_save);
        })?;
        input.set_stage(stage.unwrap_or_default());

        input.collect(FRAME)?;
        app.update(&mut input);
    }
    log::info!("kosh exiting");
    Ok(())
}
