use std::time::Duration;

use crate::signal::Signal;

pub const BASE_SPEED_MS: u64 = 800;
pub const MIN_SPEED_MS: u64 = 400;
pub const SPEED_STEP_MS: u64 = 20;
pub const POINTS_PER_LEVEL: u32 = 10;

pub const START_DELAY: Duration = Duration::from_millis(1000);
pub const LEAD_IN_DELAY: Duration = Duration::from_millis(500);
pub const NEXT_ROUND_DELAY: Duration = Duration::from_millis(1000);
pub const GAME_OVER_RESET_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Playback,
    AwaitingInput,
    RoundResolving,
    GameOver,
}

/// Inter-signal delay for a level: 800ms, 20ms faster per level, never
/// below 400ms.
pub fn speed_for_level(level: u32) -> u64 {
    BASE_SPEED_MS
        .saturating_sub(u64::from(level) * SPEED_STEP_MS)
        .max(MIN_SPEED_MS)
}

/// Points awarded for completing the round at `level`.
pub fn round_award(level: u32) -> u32 {
    level.saturating_mul(POINTS_PER_LEVEL)
}

/// Live state of one game. `best_score` outlives individual sessions.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    pub started: bool,
    pub level: u32,
    pub score: u32,
    pub best_score: u32,
    pub strict_mode: bool,
    pub speed_ms: u64,
    pub user_input: Vec<Signal>,
}

impl Session {
    pub fn new(best_score: u32) -> Self {
        Self {
            phase: Phase::Idle,
            started: false,
            level: 0,
            score: 0,
            best_score,
            strict_mode: false,
            speed_ms: speed_for_level(0),
            user_input: Vec::new(),
        }
    }

    /// Back to a fresh idle session, keeping only the best score.
    pub fn clear(&mut self) {
        *self = Self::new(self.best_score);
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }
}
