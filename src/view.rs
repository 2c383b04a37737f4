use std::time::Duration;

use crate::presenter::{Presenter, STATUS_PRESS_TO_START};
use crate::signal::Signal;

/// Final numbers of a lost game, shown until dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub level: u32,
    pub score: u32,
    pub new_best: bool,
}

/// Everything the terminal UI draws, kept up to date by the game.
#[derive(Debug, Clone)]
pub struct TuiPresenter {
    flash_duration: Duration,
    lit: Option<(Signal, Duration)>,
    status: String,
    level: u32,
    score: u32,
    best_score: u32,
    strict: bool,
    best_known: bool,
    best_beaten: bool,
    summary: Option<GameSummary>,
}

impl TuiPresenter {
    pub fn new(flash_duration: Duration) -> Self {
        Self {
            flash_duration,
            lit: None,
            status: STATUS_PRESS_TO_START.to_string(),
            level: 0,
            score: 0,
            best_score: 0,
            strict: false,
            best_known: false,
            best_beaten: false,
            summary: None,
        }
    }

    /// Lets lit pads fade.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some((signal, remaining)) = self.lit {
            self.lit = remaining
                .checked_sub(elapsed)
                .filter(|left| !left.is_zero())
                .map(|left| (signal, left));
        }
    }

    pub fn lit_signal(&self) -> Option<Signal> {
        self.lit.map(|(signal, _)| signal)
    }

    pub fn is_lit(&self, signal: Signal) -> bool {
        self.lit_signal() == Some(signal)
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn summary(&self) -> Option<GameSummary> {
        self.summary
    }

    /// Closes the game-over summary. Returns whether one was open.
    pub fn dismiss_summary(&mut self) -> bool {
        self.summary.take().is_some()
    }
}

impl Presenter for TuiPresenter {
    fn on_signal_activated(&mut self, signal: Signal) {
        self.lit = Some((signal, self.flash_duration));
    }

    fn on_status_changed(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn on_score_changed(&mut self, level: u32, score: u32) {
        self.level = level;
        self.score = score;
    }

    fn on_best_score_changed(&mut self, best: u32) {
        // the first report is the stored value, later ones are new records
        if self.best_known {
            self.best_beaten = true;
        }
        self.best_known = true;
        self.best_score = best;
    }

    fn on_game_over(&mut self, level: u32, score: u32) {
        self.summary = Some(GameSummary {
            level,
            score,
            new_best: std::mem::take(&mut self.best_beaten),
        });
    }

    fn on_strict_mode_changed(&mut self, enabled: bool) {
        self.strict = enabled;
    }

    fn on_reset(&mut self) {
        self.lit = None;
        self.best_beaten = false;
    }
}
