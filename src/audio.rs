use std::io::{self, Write};
use std::time::Duration;

use tracing::trace;

use crate::signal::Signal;

/// Pitch and length of one sound cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
}

/// C, E, G, B in the fifth octave.
const PAD_FREQUENCIES: [f32; 4] = [523.25, 659.25, 783.99, 987.77];

pub fn pad_tone(signal: Signal) -> Tone {
    Tone {
        frequency_hz: PAD_FREQUENCIES[signal.index()],
        duration: Duration::from_millis(300),
    }
}

pub fn error_tone() -> Tone {
    Tone {
        frequency_hz: 200.0,
        duration: Duration::from_millis(500),
    }
}

pub trait AudioPlayer {
    fn play_tone(&mut self, signal: Signal);
    fn play_error_tone(&mut self);
}

impl<T: AudioPlayer + ?Sized> AudioPlayer for Box<T> {
    fn play_tone(&mut self, signal: Signal) {
        (**self).play_tone(signal)
    }

    fn play_error_tone(&mut self) {
        (**self).play_error_tone()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play_tone(&mut self, _signal: Signal) {}
    fn play_error_tone(&mut self) {}
}

/// Remembers what would have been played.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub tones: Vec<Signal>,
    pub error_tones: usize,
}

impl AudioPlayer for RecordingAudio {
    fn play_tone(&mut self, signal: Signal) {
        self.tones.push(signal);
    }

    fn play_error_tone(&mut self) {
        self.error_tones += 1;
    }
}

/// A terminal can only beep, so pad tones are logged and the error tone
/// rings the bell.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioPlayer for TerminalBell<W> {
    fn play_tone(&mut self, signal: Signal) {
        let tone = pad_tone(signal);
        trace!(%signal, hz = tone.frequency_hz, "tone");
    }

    fn play_error_tone(&mut self) {
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}
