//! Fuzzy Quality Inference Engine: deviation percentage → quality score.
//!
//! A four-rule Mamdani system. Both variables live on \[0, 100\] and are split into
//! four overlapping triangular sets:
//!
//! ```text
//! deviation:  small      = tri(0, 0, 25)      quality:  poor      = tri(0, 0, 30)
//!             medium     = tri(0, 25, 50)               fair      = tri(10, 40, 70)
//!             large      = tri(25, 50, 75)              good      = tri(40, 70, 90)
//!             very_large = tri(50, 100, 100)            excellent = tri(70, 100, 100)
//!
//! rules:  small → excellent   medium → good   large → fair   very_large → poor
//! ```
//!
//! # Evaluation
//!
//! 1. **Fuzzify** - membership degree of the input in each deviation set
//! 2. **Implicate** - clip each rule's quality set at its antecedent degree (min)
//! 3. **Aggregate** - pointwise maximum over the clipped sets
//! 4. **Defuzzify** - centroid of the aggregate over a discretized quality domain
//!
//! The engine is pure data plus a stateless [`FuzzyQualityEngine::infer`]; the
//! sampled consequent memberships are computed once at construction.
//!
//! ```
//! use marksman_posture::fuzzy::FuzzyQualityEngine;
//!
//! let engine = FuzzyQualityEngine::new();
//! assert!(engine.infer(0.0) >= 90.0);
//! assert!(engine.infer(100.0) <= 20.0);
//! ```

use serde::{Deserialize, Serialize};

/// Lower bound of both fuzzy domains.
pub const DOMAIN_MIN: f64 = 0.0;
/// Upper bound of both fuzzy domains.
pub const DOMAIN_MAX: f64 = 100.0;
/// Number of points the quality domain is sampled at by default (integer resolution).
pub const DEFAULT_RESOLUTION: usize = 101;

/// Triangular membership function with breakpoints `left <= peak <= right`.
///
/// Degenerate triangles (`left == peak` or `peak == right`) are shoulders: the
/// membership is 1 at the collapsed edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub left: f64,
    pub peak: f64,
    pub right: f64,
}

impl Triangle {
    #[must_use]
    pub const fn new(left: f64, peak: f64, right: f64) -> Self {
        Self { left, peak, right }
    }

    #[must_use]
    pub fn membership(&self, x: f64) -> f64 {
        let Self { left, peak, right } = *self;
        if x < left || x > right {
            0.0
        } else if x == peak {
            1.0
        } else if x < peak {
            (x - left) / (peak - left)
        } else {
            (right - x) / (right - peak)
        }
    }
}

/// Linguistic terms of the input variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationLevel {
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl DeviationLevel {
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::VeryLarge];

    #[must_use]
    pub const fn triangle(self) -> Triangle {
        match self {
            Self::Small => Triangle::new(0.0, 0.0, 25.0),
            Self::Medium => Triangle::new(0.0, 25.0, 50.0),
            Self::Large => Triangle::new(25.0, 50.0, 75.0),
            Self::VeryLarge => Triangle::new(50.0, 100.0, 100.0),
        }
    }
}

/// Linguistic terms of the output variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityLevel {
    pub const ALL: [Self; 4] = [Self::Poor, Self::Fair, Self::Good, Self::Excellent];

    #[must_use]
    pub const fn triangle(self) -> Triangle {
        match self {
            Self::Poor => Triangle::new(0.0, 0.0, 30.0),
            Self::Fair => Triangle::new(10.0, 40.0, 70.0),
            Self::Good => Triangle::new(40.0, 70.0, 90.0),
            Self::Excellent => Triangle::new(70.0, 100.0, 100.0),
        }
    }
}

/// Single-antecedent rule base.
pub const RULES: [(DeviationLevel, QualityLevel); 4] = [
    (DeviationLevel::Small, QualityLevel::Excellent),
    (DeviationLevel::Medium, QualityLevel::Good),
    (DeviationLevel::Large, QualityLevel::Fair),
    (DeviationLevel::VeryLarge, QualityLevel::Poor),
];

/// Mamdani inference over [`RULES`] with centroid defuzzification.
#[derive(Debug, Clone)]
pub struct FuzzyQualityEngine {
    universe: Vec<f64>,
    /// Membership of each rule's consequent at each universe point.
    consequents: Vec<[f64; RULES.len()]>,
}

impl Default for FuzzyQualityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyQualityEngine {
    /// Engine sampling the quality domain at integer resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::with_resolution(DEFAULT_RESOLUTION)
    }

    /// Engine sampling the quality domain at `points` evenly spaced points.
    ///
    /// # Panics
    ///
    /// Panics if `points < 2`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn with_resolution(points: usize) -> Self {
        assert!(points >= 2, "quality domain needs at least two points");
        let step = (DOMAIN_MAX - DOMAIN_MIN) / (points - 1) as f64;
        let universe = (0..points)
            .map(|i| DOMAIN_MIN + i as f64 * step)
            .collect::<Vec<_>>();
        let consequents = universe
            .iter()
            .map(|&x| RULES.map(|(_, quality)| quality.triangle().membership(x)))
            .collect();
        Self {
            universe,
            consequents,
        }
    }

    /// Degree to which `deviation` activates each rule.
    #[must_use]
    pub fn firing_strengths(&self, deviation: f64) -> [f64; RULES.len()] {
        let deviation = deviation.clamp(DOMAIN_MIN, DOMAIN_MAX);
        RULES.map(|(level, _)| level.triangle().membership(deviation))
    }

    /// Quality score in \[0, 100\] for a deviation percentage.
    ///
    /// The input is clamped to \[0, 100\] first.
    #[must_use]
    pub fn infer(&self, deviation: f64) -> f64 {
        let strengths = self.firing_strengths(deviation);
        let (weighted, area) = self.universe.iter().zip(&self.consequents).fold(
            (0.0, 0.0),
            |(weighted, area), (&x, consequents)| {
                let mu = strengths
                    .iter()
                    .zip(consequents)
                    .map(|(strength, membership)| strength.min(*membership))
                    .fold(0.0, f64::max);
                (weighted + x * mu, area + mu)
            },
        );
        if area == 0.0 {
            // Unreachable for the built-in sets, which cover the whole domain.
            tracing::trace!(deviation, "no rule fired");
            return DOMAIN_MIN;
        }
        (weighted / area).clamp(DOMAIN_MIN, DOMAIN_MAX)
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn test_triangle_membership() {
        let tri = Triangle::new(10.0, 40.0, 70.0);
        assert_eq!(tri.membership(0.0), 0.0);
        assert_eq!(tri.membership(10.0), 0.0);
        assert_relative_eq!(tri.membership(25.0), 0.5);
        assert_eq!(tri.membership(40.0), 1.0);
        assert_relative_eq!(tri.membership(55.0), 0.5);
        assert_eq!(tri.membership(70.0), 0.0);
        assert_eq!(tri.membership(80.0), 0.0);
    }

    #[test]
    fn test_triangle_shoulders() {
        let left = DeviationLevel::Small.triangle();
        assert_eq!(left.membership(0.0), 1.0);
        assert_relative_eq!(left.membership(12.5), 0.5);
        assert_eq!(left.membership(25.0), 0.0);

        let right = DeviationLevel::VeryLarge.triangle();
        assert_eq!(right.membership(100.0), 1.0);
        assert_relative_eq!(right.membership(75.0), 0.5);
        assert_eq!(right.membership(50.0), 0.0);
    }

    #[test]
    fn test_deviation_sets_cover_domain() {
        for i in 0..=100 {
            let x = f64::from(i);
            let total = DeviationLevel::ALL
                .iter()
                .map(|level| level.triangle().membership(x))
                .sum::<f64>();
            assert!(total > 0.0, "no deviation set covers {x}");
        }
    }

    #[test]
    fn test_firing_strengths() {
        let engine = FuzzyQualityEngine::new();
        assert_eq!(engine.firing_strengths(0.0), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(engine.firing_strengths(25.0), [0.0, 1.0, 0.0, 0.0]);
        let strengths = engine.firing_strengths(60.0);
        assert_eq!(strengths[0], 0.0);
        assert_eq!(strengths[1], 0.0);
        assert_relative_eq!(strengths[2], 0.6);
        assert_relative_eq!(strengths[3], 0.2);
    }

    #[test]
    fn test_infer_reference_values() {
        let engine = FuzzyQualityEngine::new();
        assert_abs_diff_eq!(engine.infer(0.0), 90.333_333, epsilon = 1e-4);
        assert_abs_diff_eq!(engine.infer(25.0), 66.666_667, epsilon = 1e-4);
        assert_abs_diff_eq!(engine.infer(50.0), 40.0, epsilon = 1e-4);
        assert_abs_diff_eq!(engine.infer(100.0), 9.666_667, epsilon = 1e-4);
    }

    #[test]
    fn test_infer_clamps_input() {
        let engine = FuzzyQualityEngine::new();
        assert_eq!(engine.infer(-10.0), engine.infer(0.0));
        assert_eq!(engine.infer(250.0), engine.infer(100.0));
    }

    #[test]
    fn test_infer_decreases_across_bands() {
        let engine = FuzzyQualityEngine::new();
        let scores = [0.0, 12.5, 25.0, 37.5, 50.0, 75.0, 100.0].map(|d| engine.infer(d));
        assert!(scores.is_sorted_by(|a, b| a >= b), "{scores:?}");
    }

    #[test]
    fn test_finer_resolution_agrees() {
        let coarse = FuzzyQualityEngine::new();
        let fine = FuzzyQualityEngine::with_resolution(1001);
        for d in [0.0, 10.0, 30.0, 60.0, 100.0] {
            assert_abs_diff_eq!(coarse.infer(d), fine.infer(d), epsilon = 0.5);
        }
    }

    #[test]
    #[should_panic(expected = "at least two points")]
    fn test_resolution_too_small() {
        let _ = FuzzyQualityEngine::with_resolution(1);
    }
}
