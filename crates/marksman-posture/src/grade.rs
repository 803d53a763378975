//! Score grading shared by the summary labels and reporting collaborators.

use serde::{Deserialize, Serialize};

/// Lowest score graded [`ScoreGrade::Excellent`].
pub const EXCELLENT_THRESHOLD: f64 = 85.0;
/// Lowest score graded [`ScoreGrade::Good`].
pub const GOOD_THRESHOLD: f64 = 70.0;
/// Lowest score graded [`ScoreGrade::Fair`].
pub const FAIR_THRESHOLD: f64 = 50.0;

/// Four-band classification of a \[0, 100\] score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreGrade {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if score >= GOOD_THRESHOLD {
            Self::Good
        } else if score >= FAIR_THRESHOLD {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints_are_inclusive() {
        assert_eq!(ScoreGrade::from_score(100.0), ScoreGrade::Excellent);
        assert_eq!(ScoreGrade::from_score(85.0), ScoreGrade::Excellent);
        assert_eq!(ScoreGrade::from_score(84.99), ScoreGrade::Good);
        assert_eq!(ScoreGrade::from_score(70.0), ScoreGrade::Good);
        assert_eq!(ScoreGrade::from_score(50.0), ScoreGrade::Fair);
        assert_eq!(ScoreGrade::from_score(49.99), ScoreGrade::Poor);
        assert_eq!(ScoreGrade::from_score(0.0), ScoreGrade::Poor);
    }

    #[test]
    fn test_nan_is_poor() {
        assert_eq!(ScoreGrade::from_score(f64::NAN), ScoreGrade::Poor);
    }

    #[test]
    fn test_ordering() {
        assert!(ScoreGrade::Excellent > ScoreGrade::Good);
        assert!(ScoreGrade::Fair > ScoreGrade::Poor);
    }
}
