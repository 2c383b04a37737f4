use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Number of distinct signals a player can be asked to repeat.
pub const SIGNAL_COUNT: usize = 4;

/// One of the four pads. Identity is the index; colour and tone are
/// presentation details derived from it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
pub enum Signal {
    Green,
    Red,
    Yellow,
    Blue,
}

impl Signal {
    pub const ALL: [Signal; SIGNAL_COUNT] =
        [Signal::Green, Signal::Red, Signal::Yellow, Signal::Blue];

    pub fn index(self) -> usize {
        match self {
            Signal::Green => 0,
            Signal::Red => 1,
            Signal::Yellow => 2,
            Signal::Blue => 3,
        }
    }

    /// Returns `None` for indices outside `0..4`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn color(self) -> Color {
        match self {
            Signal::Green => Color::Green,
            Signal::Red => Color::Red,
            Signal::Yellow => Color::Yellow,
            Signal::Blue => Color::Blue,
        }
    }

    /// Brighter variant used while the pad is lit.
    pub fn lit_color(self) -> Color {
        match self {
            Signal::Green => Color::LightGreen,
            Signal::Red => Color::LightRed,
            Signal::Yellow => Color::LightYellow,
            Signal::Blue => Color::LightBlue,
        }
    }
}

impl From<Signal> for usize {
    fn from(signal: Signal) -> Self {
        signal.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrips_through_from_index() {
        for (i, signal) in Signal::ALL.iter().enumerate() {
            assert_eq!(signal.index(), i);
            assert_eq!(Signal::from_index(i), Some(*signal));
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(Signal::from_index(SIGNAL_COUNT), None);
        assert_eq!(Signal::from_index(usize::MAX), None);
    }

    #[test]
    fn lit_colors_differ_from_base_colors() {
        for signal in Signal::ALL {
            assert_ne!(signal.color(), signal.lit_color());
        }
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(Signal::Yellow.to_string(), "Yellow");
    }
}
