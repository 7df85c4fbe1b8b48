//! Point accumulator carried from state to state.

use std::fmt;

/// The player's score.
///
/// A plain immutable counter; apple-touch commands are the only thing that
/// ever changes it, always through [`Score::plus`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(i64);

impl Score {
    /// Creates a fresh zero score.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Numeric value of the score.
    #[must_use]
    pub const fn points(&self) -> i64 {
        self.0
    }

    /// Adds (or subtracts) points, returning the updated score.
    ///
    /// Adding zero is an identity and returns the score unchanged.
    #[must_use]
    pub const fn plus(self, points: i64) -> Self {
        if points == 0 {
            self
        } else {
            Self(self.0.saturating_add(points))
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Score;

    #[test]
    fn plus_accumulates_points() {
        let score = Score::new().plus(100).plus(50);
        assert_eq!(score.points(), 150);
    }

    #[test]
    fn plus_zero_is_identity() {
        let score = Score::new().plus(100);
        assert_eq!(score.plus(0), score);
    }

    #[test]
    fn negative_points_subtract() {
        assert_eq!(Score::new().plus(100).plus(-30).points(), 70);
    }

    #[test]
    fn display_shows_the_numeric_value() {
        assert_eq!(Score::new().plus(425).to_string(), "425");
    }
}
