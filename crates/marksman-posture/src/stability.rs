//! Temporal Stability Analyzer: how steadily each joint is held over a recording.
//!
//! For each joint seen in the recording the analyzer computes the mean and
//! population standard deviation of its angle over the frames where it is
//! present, and the variation as a percentage of the mean. Joints varying by less
//! than [`STABLE_VARIATION_PCT`] are stable.
//!
//! The aggregate score is derived from the weight-averaged variation:
//!
//! ```text
//! stability_score = clamp(100 − avg_variation × STABILITY_SENSITIVITY, 0, 100)
//! ```

use std::collections::{BTreeMap, BTreeSet};

use marksman_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{joint::Joint, registry::JointRegistry, sample::JointAngleSample};

/// Variation percentage below which a joint counts as stable.
pub const STABLE_VARIATION_PCT: f64 = 5.0;

/// Score points lost per percent of weighted average variation.
pub const STABILITY_SENSITIVITY: f64 = 5.0;

/// Spread of one joint's angle over a recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointVariation {
    pub mean: f64,
    pub std_dev: f64,
    /// `std_dev` as a percentage of the mean's magnitude.
    pub variation_pct: f64,
}

impl JointVariation {
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.variation_pct < STABLE_VARIATION_PCT
    }
}

/// Stability of a whole recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StabilityAnalysis {
    /// Aggregate stability in \[0, 100\].
    pub stability_score: f64,
    pub variations: BTreeMap<Joint, JointVariation>,
    pub stable_joints: BTreeSet<Joint>,
    pub unstable_joints: BTreeSet<Joint>,
}

#[derive(Debug, Clone, Copy)]
pub struct StabilityAnalyzer<'a> {
    registry: &'a JointRegistry,
}

impl<'a> StabilityAnalyzer<'a> {
    #[must_use]
    pub fn new(registry: &'a JointRegistry) -> Self {
        Self { registry }
    }

    /// Analyzes samples in recording order.
    ///
    /// An empty sequence yields [`StabilityAnalysis::default`].
    #[must_use]
    pub fn analyze(&self, samples: &[JointAngleSample]) -> StabilityAnalysis {
        let mut angles = BTreeMap::<Joint, Vec<f64>>::new();
        for sample in samples {
            for (joint, angle) in sample.usable_angles() {
                angles.entry(joint).or_default().push(angle);
            }
        }

        let mut analysis = StabilityAnalysis::default();
        let mut weighted_variation = 0.0;
        let mut total_weight = 0.0;

        for (joint, values) in angles {
            let Some(stats) = DescriptiveStats::new(values) else {
                continue;
            };
            let variation = JointVariation {
                mean: stats.mean,
                std_dev: stats.std_dev,
                variation_pct: stats.coefficient_of_variation_pct(),
            };
            if variation.is_stable() {
                analysis.stable_joints.insert(joint);
            } else {
                analysis.unstable_joints.insert(joint);
            }

            let weight = self.registry.get(joint).weight;
            weighted_variation += variation.variation_pct * weight;
            total_weight += weight;
            analysis.variations.insert(joint, variation);
        }

        if total_weight > 0.0 {
            let avg_variation = weighted_variation / total_weight;
            analysis.stability_score =
                (100.0 - avg_variation * STABILITY_SENSITIVITY).clamp(0.0, 100.0);
        }

        tracing::debug!(
            frames = samples.len(),
            stability_score = analysis.stability_score,
            stable = analysis.stable_joints.len(),
            unstable = analysis.unstable_joints.len(),
            "analyzed stability"
        );
        analysis
    }
}
