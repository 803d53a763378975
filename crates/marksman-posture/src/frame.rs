//! Frame Posture Analyzer: scores a single joint angle sample.
//!
//! For every joint present in the sample (in registry order) the analyzer:
//!
//! 1. computes the [`Deviation`] from the joint's acceptable range,
//! 2. infers a joint quality score from the deviation percentage,
//! 3. adds `quality × weight` to the overall score,
//! 4. emits the joint's corrective feedback when the deviation exceeds
//!    [`FEEDBACK_THRESHOLD_PCT`].
//!
//! Missing joints contribute nothing: a frame with half the joints visible can
//! score at most about half.
//!
//! ```
//! use marksman_posture::{
//!     frame::{POSITIVE_FEEDBACK, PostureAnalyzer},
//!     joint::Joint,
//!     registry::JointRegistry,
//!     sample::JointAngleSample,
//! };
//!
//! let analyzer = PostureAnalyzer::new(JointRegistry::standard());
//! let sample = JointAngleSample::from([(Joint::Knees, 172.5), (Joint::Hips, 180.0)]);
//! let analysis = analyzer.analyze(&sample);
//! assert_eq!(analysis.feedback, [POSITIVE_FEEDBACK]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    deviation::{Adjustment, Deviation, Direction},
    fuzzy::FuzzyQualityEngine,
    joint::Joint,
    registry::JointRegistry,
    sample::JointAngleSample,
};

/// Deviation percentage above which a joint's corrective feedback is shown.
pub const FEEDBACK_THRESHOLD_PCT: f64 = 20.0;

/// Feedback for a frame without any usable joint.
pub const NO_POSE_FEEDBACK: &str = "No pose detected";

/// Feedback for a frame without any significant deviation.
pub const POSITIVE_FEEDBACK: &str = "Great posture! Keep maintaining this stance.";

/// Result of analyzing one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Weighted posture score in \[0, 100\].
    pub score: f64,
    /// Feedback messages in registry order.
    pub feedback: Vec<String>,
    pub joint_scores: BTreeMap<Joint, f64>,
    pub deviations: BTreeMap<Joint, Deviation>,
}

impl FrameAnalysis {
    /// Result for a frame in which no pose was detected.
    #[must_use]
    pub fn no_pose() -> Self {
        Self {
            score: 0.0,
            feedback: vec![NO_POSE_FEEDBACK.to_owned()],
            joint_scores: BTreeMap::new(),
            deviations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_no_pose(&self) -> bool {
        self.joint_scores.is_empty()
    }
}

/// [`FrameAnalysis`] plus concrete per-joint adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedFrameAnalysis {
    #[serde(flatten)]
    pub analysis: FrameAnalysis,
    pub adjustments: BTreeMap<Joint, Adjustment>,
}

/// Scores frames against a shared [`JointRegistry`].
#[derive(Debug, Clone)]
pub struct PostureAnalyzer<'a> {
    registry: &'a JointRegistry,
    engine: FuzzyQualityEngine,
}

impl<'a> PostureAnalyzer<'a> {
    #[must_use]
    pub fn new(registry: &'a JointRegistry) -> Self {
        Self::with_engine(registry, FuzzyQualityEngine::new())
    }

    #[must_use]
    pub fn with_engine(registry: &'a JointRegistry, engine: FuzzyQualityEngine) -> Self {
        Self { registry, engine }
    }

    #[must_use]
    pub fn registry(&self) -> &'a JointRegistry {
        self.registry
    }

    #[must_use]
    pub fn engine(&self) -> &FuzzyQualityEngine {
        &self.engine
    }

    #[must_use]
    pub fn analyze(&self, sample: &JointAngleSample) -> FrameAnalysis {
        let mut score = 0.0;
        let mut feedback = vec![];
        let mut joint_scores = BTreeMap::new();
        let mut deviations = BTreeMap::new();

        for (joint, angle) in sample.usable_angles() {
            let config = self.registry.get(joint);
            let deviation = Deviation::compute(config, angle);
            let joint_score = self.engine.infer(deviation.percentage);
            score += joint_score * self.registry.score_weight(joint);

            if deviation.percentage > FEEDBACK_THRESHOLD_PCT {
                match deviation.direction {
                    Direction::Below => feedback.push(config.feedback_below.clone()),
                    Direction::Above => feedback.push(config.feedback_above.clone()),
                    Direction::Within => {}
                }
            }

            joint_scores.insert(joint, joint_score);
            deviations.insert(joint, deviation);
        }

        if joint_scores.is_empty() {
            tracing::debug!(joints = sample.len(), "no usable joints in frame");
            return FrameAnalysis::no_pose();
        }
        if feedback.is_empty() {
            feedback.push(POSITIVE_FEEDBACK.to_owned());
        }

        let score = score.clamp(0.0, 100.0);
        tracing::debug!(score, joints = joint_scores.len(), "analyzed frame");
        FrameAnalysis {
            score,
            feedback,
            joint_scores,
            deviations,
        }
    }

    #[must_use]
    pub fn analyze_detailed(&self, sample: &JointAngleSample) -> DetailedFrameAnalysis {
        let analysis = self.analyze(sample);
        let adjustments = analysis
            .deviations
            .iter()
            .filter_map(|(joint, deviation)| Some((*joint, deviation.adjustment(*joint)?)))
            .collect();
        DetailedFrameAnalysis {
            analysis,
            adjustments,
        }
    }
}
