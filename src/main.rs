use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tracing::{info, warn};

use recall::{
    app::{App, AppSettings},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    input, logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    ui,
};

/// sequence memory game: watch the pads light up, then play them back
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Watch the pads light up, then repeat the sequence. Every round adds one more signal and plays a little faster. One wrong pad ends the game."
)]
pub struct Cli {
    /// start with strict mode shown as on (cleared again when the game resets)
    #[clap(long)]
    strict: bool,

    /// seed for the signal sequence, for replaying the same game
    #[clap(long)]
    seed: Option<u64>,

    /// do not ring the terminal bell on mistakes
    #[clap(short = 'm', long)]
    mute: bool,

    /// how long a pad stays lit, in milliseconds
    #[clap(long)]
    flash_ms: Option<u64>,

    /// keep the best score in memory only
    #[clap(long)]
    no_persist: bool,

    /// remember --mute, --flash-ms and --no-persist as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Merge command-line flags over the stored preferences.
    fn to_settings(&self, cfg: &Config) -> AppSettings {
        AppSettings {
            strict: self.strict,
            seed: self.seed,
            muted: self.mute || cfg.muted,
            flash_ms: self.flash_ms.unwrap_or(cfg.flash_ms),
            persist_best_score: !self.no_persist && cfg.persist_best_score,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = AppDirs::log_path() {
        // a missing log file must not keep anyone from playing
        let _ = logging::init(&log_path);
    }

    let config_store = FileConfigStore::new();
    let settings = cli.to_settings(&config_store.load());
    if cli.save_config {
        if let Err(error) = config_store.save(&Config::from(&settings)) {
            warn!(%error, path = %config_store.path().display(), "could not save config");
        }
    }
    info!(?settings, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&settings);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_quit() {
        let step = runner.step();
        app.on_tick(step.elapsed);

        match step.event {
            GameEvent::Key(key) => app.on_command(input::command_for(key)),
            GameEvent::Resize | GameEvent::Tick => {}
        }

        terminal.draw(|f| ui::draw(app, f))?;
    }

    info!(best = app.game.best_score(), "quit");
    Ok(())
}
