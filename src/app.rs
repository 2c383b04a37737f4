use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::{AudioPlayer, SilentAudio, TerminalBell};
use crate::config::{Config, DEFAULT_FLASH_MS};
use crate::game::GameController;
use crate::input::Command;
use crate::score_store::{BestScoreStore, MemoryScoreStore, SqliteScoreStore};
use crate::sequence::{RandomSignals, SignalSource};
use crate::view::TuiPresenter;

pub type TuiGame = GameController<TuiPresenter, Box<dyn AudioPlayer>>;

/// Resolved settings for one run of the program.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub strict: bool,
    pub seed: Option<u64>,
    pub muted: bool,
    pub flash_ms: u64,
    pub persist_best_score: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            strict: false,
            seed: None,
            muted: false,
            flash_ms: DEFAULT_FLASH_MS,
            persist_best_score: true,
        }
    }
}

impl From<&AppSettings> for Config {
    fn from(settings: &AppSettings) -> Self {
        Self {
            muted: settings.muted,
            flash_ms: settings.flash_ms,
            persist_best_score: settings.persist_best_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quitting,
}

pub struct App {
    pub game: TuiGame,
    pub state: AppState,
}

impl App {
    pub fn new(settings: &AppSettings) -> Self {
        let store: Box<dyn BestScoreStore> = if settings.persist_best_score {
            match SqliteScoreStore::open_default() {
                Ok(store) => Box::new(store),
                Err(error) => {
                    warn!(%error, "score database unavailable, best score will not persist");
                    Box::new(MemoryScoreStore::default())
                }
            }
        } else {
            Box::new(MemoryScoreStore::default())
        };

        let audio: Box<dyn AudioPlayer> = if settings.muted {
            Box::new(SilentAudio)
        } else {
            Box::new(TerminalBell::stdout())
        };

        let mut app = Self::with_parts(
            Box::new(RandomSignals::new(settings.seed)),
            store,
            audio,
            Duration::from_millis(settings.flash_ms),
        );
        if settings.strict {
            app.game.toggle_strict_mode();
        }
        app
    }

    pub fn with_parts(
        source: Box<dyn SignalSource>,
        store: Box<dyn BestScoreStore>,
        audio: Box<dyn AudioPlayer>,
        flash: Duration,
    ) -> Self {
        Self {
            game: GameController::new(source, store, TuiPresenter::new(flash), audio),
            state: AppState::Running,
        }
    }

    pub fn view(&self) -> &TuiPresenter {
        self.game.presenter()
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
        self.game.presenter_mut().tick(elapsed);
    }

    pub fn on_command(&mut self, command: Command) {
        debug!(?command, "command");

        if command == Command::Quit {
            self.state = AppState::Quitting;
            return;
        }

        // an open summary swallows the key that closes it
        if self.game.presenter_mut().dismiss_summary() {
            return;
        }

        match command {
            Command::Press(signal) => {
                if self.game.is_started() {
                    self.game.press(signal);
                } else {
                    self.game.start();
                }
            }
            Command::ToggleStrict => {
                self.game.toggle_strict_mode();
            }
            Command::Reset => self.game.reset(),
            Command::Dismiss | Command::Start => {
                self.game.start();
            }
            Command::Quit => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;
    use crate::sequence::ScriptedSignals;
    use crate::signal::Signal;

    fn app(script: &[Signal]) -> App {
        App::with_parts(
            Box::new(ScriptedSignals::new(script.to_vec())),
            Box::new(MemoryScoreStore::default()),
            Box::new(SilentAudio),
            Duration::from_millis(300),
        )
    }

    fn tick_until(app: &mut App, phase: Phase) {
        for _ in 0..500 {
            if app.game.phase() == phase {
                return;
            }
            app.on_tick(Duration::from_millis(20));
        }
        panic!("never reached {phase}");
    }

    #[test]
    fn any_key_starts() {
        let mut app = app(&[Signal::Red]);
        app.on_command(Command::Start);
        assert!(app.game.is_started());
    }

    #[test]
    fn pad_key_before_start_only_starts() {
        let mut app = app(&[Signal::Red]);
        app.on_command(Command::Press(Signal::Red));
        assert!(app.game.is_started());
        assert!(app.game.user_input().is_empty());
    }

    #[test]
    fn full_round_through_commands() {
        let mut app = app(&[Signal::Blue]);
        app.on_command(Command::Start);
        tick_until(&mut app, Phase::AwaitingInput);
        assert_eq!(app.view().status(), "Your turn!");

        app.on_command(Command::Press(Signal::Blue));
        assert_eq!(app.view().score(), 10);
        assert!(app.view().is_lit(Signal::Blue));
    }

    #[test]
    fn summary_is_dismissed_before_new_game() {
        let mut app = app(&[Signal::Blue]);
        app.on_command(Command::Start);
        tick_until(&mut app, Phase::AwaitingInput);
        app.on_command(Command::Press(Signal::Green));
        assert!(app.view().summary().is_some());

        tick_until(&mut app, Phase::Idle);
        app.on_command(Command::Start);
        assert!(app.view().summary().is_none());
        assert!(!app.game.is_started());

        app.on_command(Command::Start);
        assert!(app.game.is_started());
    }

    #[test]
    fn quit_and_reset() {
        let mut app = app(&[Signal::Yellow]);
        app.on_command(Command::Start);
        app.on_command(Command::Reset);
        assert!(!app.game.is_started());

        app.on_command(Command::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn strict_toggle_reaches_view() {
        let mut app = app(&[Signal::Yellow]);
        app.on_command(Command::ToggleStrict);
        assert!(app.view().strict());
        assert_eq!(app.view().status(), "Strict Mode ON");
    }

    #[test]
    fn settings_convert_to_config() {
        let settings = AppSettings {
            muted: true,
            flash_ms: 200,
            persist_best_score: false,
            ..AppSettings::default()
        };
        let cfg = Config::from(&settings);
        assert!(cfg.muted);
        assert_eq!(cfg.flash_ms, 200);
        assert!(!cfg.persist_best_score);
    }
}
