use std::ops::Not;

use serde::{Deserialize, Serialize};

/// Represents a color (white or black) in chess.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, strum::Display, strum::EnumIter)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
}

impl Not for Color {
    type Output = Self;

    /// Returns the opposite color.
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::Color;

    #[test]
    fn not_flips_color() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn iter_visits_white_then_black() {
        let colors: Vec<Color> = Color::iter().collect();
        assert_eq!(colors, vec![Color::White, Color::Black]);
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(Color::White.to_string(), "White");
        assert_eq!(Color::Black.to_string(), "Black");
    }
}
