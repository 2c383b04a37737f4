use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::signal::Signal;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Press(Signal),
    ToggleStrict,
    Reset,
    Dismiss,
    Quit,
    /// Any key without another meaning starts a game.
    Start,
}

/// Maps a key to its command. Pads are laid out as a 2x2 grid, reachable
/// through `1`-`4` or the `q w / a s` block.
pub fn command_for(key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Esc => Command::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => Command::Dismiss,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            '1' | 'q' => Command::Press(Signal::Green),
            '2' | 'w' => Command::Press(Signal::Red),
            '3' | 'a' => Command::Press(Signal::Yellow),
            '4' | 's' => Command::Press(Signal::Blue),
            't' => Command::ToggleStrict,
            'r' => Command::Reset,
            _ => Command::Start,
        },
        _ => Command::Start,
    }
}

/// Key labels shown on each pad.
pub fn key_hint(signal: Signal) -> &'static str {
    match signal {
        Signal::Green => "1/q",
        Signal::Red => "2/w",
        Signal::Yellow => "3/a",
        Signal::Blue => "4/s",
    }
}
