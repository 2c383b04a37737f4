use crate::signal::Signal;

pub const STATUS_PRESS_TO_START: &str = "Press any key to start";
pub const STATUS_GAME_STARTED: &str = "Game Started!";
pub const STATUS_YOUR_TURN: &str = "Your turn!";
pub const STATUS_STRICT_ON: &str = "Strict Mode ON";
pub const STATUS_STRICT_OFF: &str = "Strict Mode OFF";

pub fn level_status(level: u32) -> String {
    format!("Level {level}")
}

/// Receives everything the game wants shown. Implementations own timing of
/// the visuals (how long a pad stays lit, when a summary is dismissed).
pub trait Presenter {
    /// Light up a pad briefly.
    fn on_signal_activated(&mut self, signal: Signal);
    fn on_status_changed(&mut self, text: &str);
    fn on_score_changed(&mut self, level: u32, score: u32);
    fn on_best_score_changed(&mut self, best: u32);
    /// Called once per finished game.
    fn on_game_over(&mut self, level: u32, score: u32);

    fn on_strict_mode_changed(&mut self, _enabled: bool) {}

    /// Clear any active markers (lit pads, start indicator).
    fn on_reset(&mut self) {}
}

/// Discards all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn on_signal_activated(&mut self, _signal: Signal) {}
    fn on_status_changed(&mut self, _text: &str) {}
    fn on_score_changed(&mut self, _level: u32, _score: u32) {}
    fn on_best_score_changed(&mut self, _best: u32) {}
    fn on_game_over(&mut self, _level: u32, _score: u32) {}
}

/// One notification received by a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    SignalActivated(Signal),
    Status(String),
    Score { level: u32, score: u32 },
    BestScore(u32),
    GameOver { level: u32, score: u32 },
    StrictMode(bool),
    Reset,
}

/// Keeps every notification in order. Useful for headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Status(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn activated(&self) -> Vec<Signal> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::SignalActivated(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn game_overs(&self) -> Vec<(u32, u32)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::GameOver { level, score } => Some((*level, *score)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn on_signal_activated(&mut self, signal: Signal) {
        self.events.push(PresenterEvent::SignalActivated(signal));
    }

    fn on_status_changed(&mut self, text: &str) {
        self.events.push(PresenterEvent::Status(text.to_string()));
    }

    fn on_score_changed(&mut self, level: u32, score: u32) {
        self.events.push(PresenterEvent::Score { level, score });
    }

    fn on_best_score_changed(&mut self, best: u32) {
        self.events.push(PresenterEvent::BestScore(best));
    }

    fn on_game_over(&mut self, level: u32, score: u32) {
        self.events.push(PresenterEvent::GameOver { level, score });
    }

    fn on_strict_mode_changed(&mut self, enabled: bool) {
        self.events.push(PresenterEvent::StrictMode(enabled));
    }

    fn on_reset(&mut self) {
        self.events.push(PresenterEvent::Reset);
    }
}
