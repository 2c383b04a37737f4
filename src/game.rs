//! The game state machine.
//!
//! `GameController` owns the session, the sequence engine and a virtual
//! clock. Hosts call [`GameController::start`], [`GameController::press`],
//! [`GameController::toggle_strict_mode`] and [`GameController::reset`] in
//! response to input, and [`GameController::advance`] with the wall time
//! that has passed. Everything time-based (the pause before the first
//! round, playback, the gap between rounds, the automatic reset after a
//! loss) happens inside `advance`.

use std::time::Duration;

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::audio::AudioPlayer;
use crate::presenter::{self, Presenter};
use crate::scheduler::Scheduler;
use crate::score_store::BestScoreStore;
use crate::sequence::{PrefixCheck, SequenceEngine, SignalSource};
use crate::session::{
    self, Phase, Session, GAME_OVER_RESET_DELAY, LEAD_IN_DELAY, NEXT_ROUND_DELAY, START_DELAY,
};
use crate::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    BeginRound,
    Flash(usize),
    EndPlayback,
    AutoReset,
}

pub struct GameController<P: Presenter, A: AudioPlayer> {
    session: Session,
    engine: SequenceEngine,
    scheduler: Scheduler<Transition>,
    store: Box<dyn BestScoreStore>,
    presenter: P,
    audio: A,
}

impl<P: Presenter, A: AudioPlayer> GameController<P, A> {
    /// Creates an idle game. The best score is read from `store` once; a
    /// failing store starts from 0.
    pub fn new(
        source: Box<dyn SignalSource>,
        store: Box<dyn BestScoreStore>,
        mut presenter: P,
        audio: A,
    ) -> Self {
        let best_score = match store.load() {
            Ok(best) => best,
            Err(error) => {
                warn!(%error, "could not load best score, starting from 0");
                0
            }
        };

        presenter.on_best_score_changed(best_score);
        presenter.on_score_changed(0, 0);
        presenter.on_status_changed(presenter::STATUS_PRESS_TO_START);

        Self {
            session: Session::new(best_score),
            engine: SequenceEngine::new(source),
            scheduler: Scheduler::new(),
            store,
            presenter,
            audio,
        }
    }

    /// Begins a session; the first round plays after a short pause.
    /// Returns false if a session is already under way.
    pub fn start(&mut self) -> bool {
        if self.session.started || self.session.phase != Phase::Idle {
            debug!(phase = %self.session.phase, "start ignored");
            return false;
        }

        info!(strict = self.session.strict_mode, "game started");
        self.session.started = true;
        self.presenter
            .on_status_changed(presenter::STATUS_GAME_STARTED);
        self.scheduler.schedule(START_DELAY, Transition::BeginRound);
        true
    }

    /// Flips strict mode. The flag is only shown to the player; a mistake
    /// ends the game either way.
    pub fn toggle_strict_mode(&mut self) -> bool {
        self.session.strict_mode = !self.session.strict_mode;
        let enabled = self.session.strict_mode;
        debug!(enabled, "strict mode toggled");

        self.presenter.on_strict_mode_changed(enabled);
        self.presenter.on_status_changed(if enabled {
            presenter::STATUS_STRICT_ON
        } else {
            presenter::STATUS_STRICT_OFF
        });
        enabled
    }

    /// Returns to idle from any phase. Nothing scheduled before the reset
    /// will fire afterwards.
    pub fn reset(&mut self) {
        debug!(phase = %self.session.phase, level = self.session.level, "reset");
        self.scheduler.invalidate();
        self.engine.reset();
        self.session.clear();

        self.presenter.on_reset();
        self.presenter.on_score_changed(0, 0);
        self.presenter.on_strict_mode_changed(false);
        self.presenter
            .on_status_changed(presenter::STATUS_PRESS_TO_START);
    }

    /// Handles a pad press. Only accepted while the game waits for the
    /// player; otherwise nothing happens and `None` is returned.
    pub fn press(&mut self, signal: Signal) -> Option<PrefixCheck> {
        if self.session.phase != Phase::AwaitingInput {
            debug!(%signal, phase = %self.session.phase, "press ignored");
            return None;
        }

        self.presenter.on_signal_activated(signal);
        self.audio.play_tone(signal);

        self.session.user_input.push(signal);
        self.session.phase = Phase::RoundResolving;

        let check = self.engine.check_prefix(&self.session.user_input);
        match check {
            PrefixCheck::Correct => {
                self.session.phase = Phase::AwaitingInput;
            }
            PrefixCheck::CompleteMatch => self.complete_round(),
            PrefixCheck::IncorrectAt(idx) => {
                debug!(idx, expected = ?self.engine.sequence().get(idx), %signal, "mismatch");
                self.audio.play_error_tone();
                self.game_over();
            }
        }
        Some(check)
    }

    /// Moves the virtual clock forward, firing every transition that falls
    /// due, including ones scheduled by earlier transitions in the same
    /// window.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some(transition) = self.scheduler.pop_due(until) {
            self.fire(transition);
        }
        self.scheduler.settle(until);
    }

    /// Ends the game for good and hands back the collaborators.
    pub fn shutdown(mut self) -> (P, A) {
        self.scheduler.invalidate();
        debug!(
            level = self.session.level,
            score = self.session.score,
            "shutdown"
        );
        (self.presenter, self.audio)
    }

    fn fire(&mut self, transition: Transition) {
        match transition {
            Transition::BeginRound => self.begin_round(),
            Transition::Flash(idx) => self.flash(idx),
            Transition::EndPlayback => {
                self.session.phase = Phase::AwaitingInput;
                self.presenter.on_status_changed(presenter::STATUS_YOUR_TURN);
            }
            Transition::AutoReset => self.reset(),
        }
    }

    fn begin_round(&mut self) {
        self.session.level += 1;
        let added = self.engine.append_random_signal();
        self.session.speed_ms = session::speed_for_level(self.session.level);
        self.session.user_input.clear();
        self.session.phase = Phase::Playback;

        debug!(
            level = self.session.level,
            speed_ms = self.session.speed_ms,
            %added,
            "round begins"
        );

        self.presenter
            .on_status_changed(&presenter::level_status(self.session.level));
        self.presenter
            .on_score_changed(self.session.level, self.session.score);
        self.scheduler.schedule(LEAD_IN_DELAY, Transition::Flash(0));
    }

    fn flash(&mut self, idx: usize) {
        let Some(&signal) = self.engine.sequence().get(idx) else {
            return;
        };

        self.presenter.on_signal_activated(signal);
        self.audio.play_tone(signal);

        let next = if idx + 1 < self.engine.len() {
            Transition::Flash(idx + 1)
        } else {
            Transition::EndPlayback
        };
        self.scheduler.schedule(self.session.speed(), next);
    }

    fn complete_round(&mut self) {
        let award = session::round_award(self.session.level);
        self.session.score = self.session.score.saturating_add(award);
        debug!(
            level = self.session.level,
            award,
            score = self.session.score,
            "round complete"
        );

        self.presenter
            .on_score_changed(self.session.level, self.session.score);
        self.scheduler
            .schedule(NEXT_ROUND_DELAY, Transition::BeginRound);
    }

    fn game_over(&mut self) {
        self.session.phase = Phase::GameOver;
        let (level, score) = (self.session.level, self.session.score);

        info!(
            level,
            score,
            sequence = %self.engine.sequence().iter().join(","),
            "game over"
        );

        if score > self.session.best_score {
            self.session.best_score = score;
            info!(best = score, "new best score");
            self.presenter.on_best_score_changed(score);
            if let Err(error) = self.store.save(score) {
                warn!(%error, "could not save best score, keeping it in memory");
            }
        }

        self.presenter.on_game_over(level, score);
        self.scheduler
            .schedule(GAME_OVER_RESET_DELAY, Transition::AutoReset);
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn best_score(&self) -> u32 {
        self.session.best_score
    }

    pub fn speed(&self) -> Duration {
        self.session.speed()
    }

    pub fn is_strict(&self) -> bool {
        self.session.strict_mode
    }

    pub fn is_started(&self) -> bool {
        self.session.started
    }

    pub fn user_input(&self) -> &[Signal] {
        &self.session.user_input
    }

    pub fn sequence(&self) -> &[Signal] {
        self.engine.sequence()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Time until the next scheduled transition, if any.
    pub fn next_transition_in(&self) -> Option<Duration> {
        self.scheduler.next_due_in()
    }

    pub fn store(&self) -> &dyn BestScoreStore {
        self.store.as_ref()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}
