//! Session Summary Generator: end-of-session strengths, weaknesses and advice.
//!
//! The summary blends the mean frame score with the stability score
//! ([`POSTURE_BLEND`] / [`STABILITY_BLEND`]), grades both, and derives:
//!
//! - **Key strengths** - joints averaging at least [`STRONG_JOINT_SCORE`], then
//!   stable joints
//! - **Areas to improve** - the most frequent corrective feedback, then unstable
//!   joints
//! - **Recommendations** - rule-based advice from the grades and the top areas
//!
//! Strengths and areas are capped at [`MAX_LISTED`] entries each.

use std::{cmp::Reverse, collections::HashMap};

use marksman_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{
    frame::{FrameAnalysis, POSITIVE_FEEDBACK},
    grade::ScoreGrade,
    joint::Joint,
    stability::StabilityAnalysis,
};

/// Share of the mean frame score in the overall score.
pub const POSTURE_BLEND: f64 = 0.7;
/// Share of the stability score in the overall score.
pub const STABILITY_BLEND: f64 = 0.3;
/// Mean joint score from which a joint counts as a strength.
pub const STRONG_JOINT_SCORE: f64 = 85.0;
/// Maximum number of strengths and of areas to improve.
pub const MAX_LISTED: usize = 3;
/// Number of leading areas to improve that get a targeted exercise.
const TARGETED_AREAS: usize = 2;

pub const FUNDAMENTALS_RECOMMENDATION: &str =
    "Focus on basic stance fundamentals before proceeding.";
pub const STEADY_HOLD_RECOMMENDATION: &str =
    "Practice holding your position steady for longer periods.";
pub const SHOULDER_RECOMMENDATION: &str = "Try shoulder strengthening exercises.";
pub const ELBOW_RECOMMENDATION: &str = "Practice elbow positioning with a training aid.";
pub const LOWER_BODY_RECOMMENDATION: &str =
    "Work on lower body stability through balance exercises.";
pub const MAINTAIN_RECOMMENDATION: &str = "Continue practicing to maintain your excellent form.";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum PostureQuality {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    #[display("Needs Improvement")]
    NeedsImprovement,
    #[serde(rename = "N/A")]
    #[display("N/A")]
    NotAvailable,
}

impl From<ScoreGrade> for PostureQuality {
    fn from(value: ScoreGrade) -> Self {
        match value {
            ScoreGrade::Excellent => Self::Excellent,
            ScoreGrade::Good => Self::Good,
            ScoreGrade::Fair => Self::Fair,
            ScoreGrade::Poor => Self::NeedsImprovement,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum StabilityRating {
    #[serde(rename = "Very Stable")]
    #[display("Very Stable")]
    VeryStable,
    Stable,
    #[serde(rename = "Moderately Stable")]
    #[display("Moderately Stable")]
    ModeratelyStable,
    Unstable,
    #[serde(rename = "N/A")]
    #[display("N/A")]
    NotAvailable,
}

impl From<ScoreGrade> for StabilityRating {
    fn from(value: ScoreGrade) -> Self {
        match value {
            ScoreGrade::Excellent => Self::VeryStable,
            ScoreGrade::Good => Self::Stable,
            ScoreGrade::Fair => Self::ModeratelyStable,
            ScoreGrade::Poor => Self::Unstable,
        }
    }
}

/// End-of-session record handed to persistence and reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub overall_score: f64,
    pub posture_quality: PostureQuality,
    pub stability: StabilityRating,
    pub key_strengths: Vec<String>,
    pub areas_to_improve: Vec<String>,
    pub recommendations: Vec<String>,
}

impl SessionSummary {
    /// Summary of a session without analyzed frames.
    #[must_use]
    pub fn not_available() -> Self {
        Self {
            overall_score: 0.0,
            posture_quality: PostureQuality::NotAvailable,
            stability: StabilityRating::NotAvailable,
            key_strengths: vec![],
            areas_to_improve: vec![],
            recommendations: vec![],
        }
    }
}

/// Summarizes a session from its frame analyses (in recording order) and its
/// stability analysis.
#[must_use]
pub fn summarize(frames: &[FrameAnalysis], stability: &StabilityAnalysis) -> SessionSummary {
    let Some(posture_stats) = DescriptiveStats::new(frames.iter().map(|f| f.score)) else {
        return SessionSummary::not_available();
    };

    let overall_score = (POSTURE_BLEND * posture_stats.mean
        + STABILITY_BLEND * stability.stability_score)
        .clamp(0.0, 100.0);
    let posture_quality = PostureQuality::from(ScoreGrade::from_score(overall_score));
    let stability_rating = StabilityRating::from(ScoreGrade::from_score(stability.stability_score));

    let key_strengths = key_strengths(frames, stability);
    let areas_to_improve = areas_to_improve(frames, stability);
    let recommendations = recommendations(posture_quality, stability_rating, &areas_to_improve);

    tracing::debug!(
        frames = frames.len(),
        overall_score,
        %posture_quality,
        stability = %stability_rating,
        "summarized session"
    );

    SessionSummary {
        overall_score,
        posture_quality,
        stability: stability_rating,
        key_strengths,
        areas_to_improve,
        recommendations,
    }
}

fn key_strengths(frames: &[FrameAnalysis], stability: &StabilityAnalysis) -> Vec<String> {
    let mut strengths = Joint::ALL
        .into_iter()
        .filter(|joint| {
            DescriptiveStats::new(frames.iter().filter_map(|f| f.joint_scores.get(joint).copied()))
                .is_some_and(|stats| stats.mean >= STRONG_JOINT_SCORE)
        })
        .map(|joint| format!("Strong {} Position", joint.display_name()))
        .collect::<Vec<_>>();

    for joint in &stability.stable_joints {
        let strength = format!("Stable {}", joint.display_name());
        if !strengths.contains(&strength) {
            strengths.push(strength);
        }
    }
    strengths.truncate(MAX_LISTED);
    strengths
}

fn areas_to_improve(frames: &[FrameAnalysis], stability: &StabilityAnalysis) -> Vec<String> {
    // (message, count) in order of first appearance
    let mut counts: Vec<(&str, usize)> = vec![];
    let mut positions = HashMap::new();
    for message in frames.iter().flat_map(|f| &f.feedback) {
        if message == POSITIVE_FEEDBACK {
            continue;
        }
        let position = *positions.entry(message.as_str()).or_insert_with(|| {
            counts.push((message.as_str(), 0));
            counts.len() - 1
        });
        counts[position].1 += 1;
    }
    counts.sort_by_key(|(_, count)| Reverse(*count));

    let mut areas = counts
        .into_iter()
        .take(MAX_LISTED)
        .map(|(message, _)| message.to_owned())
        .collect::<Vec<_>>();
    areas.extend(
        stability
            .unstable_joints
            .iter()
            .map(|joint| format!("Improve {} Stability", joint.display_name())),
    );
    areas.truncate(MAX_LISTED);
    areas
}

fn recommendations(
    posture_quality: PostureQuality,
    stability: StabilityRating,
    areas_to_improve: &[String],
) -> Vec<String> {
    let mut recommendations: Vec<String> = vec![];
    let mut recommend = |message: &str| {
        if !recommendations.iter().any(|r| r == message) {
            recommendations.push(message.to_owned());
        }
    };

    if matches!(
        posture_quality,
        PostureQuality::NeedsImprovement | PostureQuality::Fair
    ) {
        recommend(FUNDAMENTALS_RECOMMENDATION);
    }
    if matches!(
        stability,
        StabilityRating::Unstable | StabilityRating::ModeratelyStable
    ) {
        recommend(STEADY_HOLD_RECOMMENDATION);
    }
    for area in areas_to_improve.iter().take(TARGETED_AREAS) {
        let area = area.to_lowercase();
        if area.contains("shoulder") {
            recommend(SHOULDER_RECOMMENDATION);
        } else if area.contains("elbow") {
            recommend(ELBOW_RECOMMENDATION);
        } else if area.contains("knee") || area.contains("hip") {
            recommend(LOWER_BODY_RECOMMENDATION);
        }
    }

    if recommendations.is_empty() {
        recommendations.push(MAINTAIN_RECOMMENDATION.to_owned());
    }
    recommendations
}
