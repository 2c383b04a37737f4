use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::signal::{Signal, SIGNAL_COUNT};

/// Outcome of comparing the player's input against the canonical sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCheck {
    /// Input is a matching proper prefix of the sequence.
    Correct,
    /// First position where the input diverges from the sequence.
    IncorrectAt(usize),
    /// Input reproduces the whole sequence.
    CompleteMatch,
}

/// Supplies the signal appended at the start of every round.
pub trait SignalSource {
    fn next_signal(&mut self) -> Signal;
}

/// Uniform random signals. Seeded games replay the same sequence.
#[derive(Debug, Clone)]
pub struct RandomSignals {
    rng: ChaCha8Rng,
}

impl RandomSignals {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSignals {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SignalSource for RandomSignals {
    fn next_signal(&mut self) -> Signal {
        let idx = self.rng.gen_range(0..SIGNAL_COUNT);
        Signal::ALL[idx]
    }
}

/// Plays back a fixed script, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSignals {
    script: Vec<Signal>,
    pos: usize,
}

impl ScriptedSignals {
    /// # Panics
    ///
    /// Panics if `script` is empty.
    pub fn new(script: impl IntoIterator<Item = Signal>) -> Self {
        let script: Vec<Signal> = script.into_iter().collect();
        assert!(!script.is_empty(), "scripted signal source needs at least one signal");
        Self { script, pos: 0 }
    }
}

impl SignalSource for ScriptedSignals {
    fn next_signal(&mut self) -> Signal {
        let signal = self.script[self.pos % self.script.len()];
        self.pos += 1;
        signal
    }
}

/// Owns the canonical sequence for the current session.
pub struct SequenceEngine {
    sequence: Vec<Signal>,
    source: Box<dyn SignalSource>,
}

impl SequenceEngine {
    pub fn new(source: Box<dyn SignalSource>) -> Self {
        Self {
            sequence: Vec::new(),
            source,
        }
    }

    /// Draws one signal from the source and appends it.
    pub fn append_random_signal(&mut self) -> Signal {
        let signal = self.source.next_signal();
        self.sequence.push(signal);
        signal
    }

    /// Compares `input` against the sequence up to `input.len()`, stopping
    /// at the first mismatch. Input running past the end of the sequence
    /// is a mismatch at `sequence.len()`.
    pub fn check_prefix(&self, input: &[Signal]) -> PrefixCheck {
        for (idx, given) in input.iter().enumerate() {
            match self.sequence.get(idx) {
                Some(expected) if expected == given => {}
                _ => return PrefixCheck::IncorrectAt(idx),
            }
        }

        if input.len() == self.sequence.len() {
            PrefixCheck::CompleteMatch
        } else {
            PrefixCheck::Correct
        }
    }

    pub fn reset(&mut self) {
        self.sequence.clear();
    }

    pub fn sequence(&self) -> &[Signal] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl std::fmt::Debug for SequenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceEngine")
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::signal::Signal::*;

    fn engine_with(script: &[Signal]) -> SequenceEngine {
        let mut engine = SequenceEngine::new(Box::new(ScriptedSignals::new(script.to_vec())));
        for _ in script {
            engine.append_random_signal();
        }
        engine
    }

    #[test]
    fn append_grows_by_one_and_keeps_prefix() {
        let mut engine = SequenceEngine::new(Box::new(RandomSignals::new(Some(7))));
        let mut seen = Vec::new();
        for k in 1..=20 {
            let signal = engine.append_random_signal();
            seen.push(signal);
            assert_eq!(engine.len(), k);
            assert_eq!(engine.sequence(), seen.as_slice());
        }
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = RandomSignals::new(Some(42));
        let mut b = RandomSignals::new(Some(42));
        let left: Vec<Signal> = (0..32).map(|_| a.next_signal()).collect();
        let right: Vec<Signal> = (0..32).map(|_| b.next_signal()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn random_source_covers_every_signal() {
        let mut source = RandomSignals::new(Some(1));
        let mut counts = [0usize; SIGNAL_COUNT];
        for _ in 0..4000 {
            counts[source.next_signal().index()] += 1;
        }
        // uniform within a generous band
        for count in counts {
            assert!((800..1200).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn scripted_source_wraps() {
        let mut source = ScriptedSignals::new([Red, Blue]);
        assert_eq!(source.next_signal(), Red);
        assert_eq!(source.next_signal(), Blue);
        assert_eq!(source.next_signal(), Red);
    }

    #[test]
    #[should_panic]
    fn scripted_source_rejects_empty_script() {
        let _ = ScriptedSignals::new(Vec::new());
    }

    #[test]
    fn empty_input_is_correct_prefix() {
        let engine = engine_with(&[Green, Red]);
        assert_eq!(engine.check_prefix(&[]), PrefixCheck::Correct);
    }

    #[test]
    fn matching_prefix_is_correct() {
        let engine = engine_with(&[Green, Red, Yellow]);
        assert_eq!(engine.check_prefix(&[Green, Red]), PrefixCheck::Correct);
    }

    #[test]
    fn full_match_is_complete() {
        let engine = engine_with(&[Green, Red, Yellow]);
        assert_eq!(
            engine.check_prefix(&[Green, Red, Yellow]),
            PrefixCheck::CompleteMatch
        );
    }

    #[test]
    fn reports_first_mismatch() {
        let engine = engine_with(&[Green, Red, Yellow]);
        assert_matches!(engine.check_prefix(&[Green, Yellow]), PrefixCheck::IncorrectAt(1));
        assert_matches!(
            engine.check_prefix(&[Blue, Blue, Blue]),
            PrefixCheck::IncorrectAt(0)
        );
    }

    #[test]
    fn input_past_the_end_is_incorrect() {
        let engine = engine_with(&[Green]);
        assert_eq!(
            engine.check_prefix(&[Green, Green]),
            PrefixCheck::IncorrectAt(1)
        );
    }

    #[test]
    fn empty_sequence_with_empty_input_is_complete() {
        let engine = SequenceEngine::new(Box::new(ScriptedSignals::new([Green])));
        assert_eq!(engine.check_prefix(&[]), PrefixCheck::CompleteMatch);
    }

    #[test]
    fn reset_clears_sequence() {
        let mut engine = engine_with(&[Green, Blue]);
        engine.reset();
        assert!(engine.is_empty());
        assert_eq!(engine.len(), 0);
    }
}
