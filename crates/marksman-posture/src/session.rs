//! Recording sessions: per-frame analysis during recording, batch analysis at the end.
//!
//! A [`PostureSession`] is fed one [`JointAngleSample`] per frame while recording.
//! Frames with a usable pose are scored immediately and kept; frames without one
//! only advance the frame counter. [`PostureSession::finish`] runs stability
//! analysis over the kept samples and summarizes the kept analyses into a
//! [`SessionReport`], the flat record handed to persistence.
//!
//! ```
//! use marksman_posture::{
//!     joint::Joint, registry::JointRegistry, sample::JointAngleSample, session::PostureSession,
//! };
//!
//! let mut session = PostureSession::new(JointRegistry::standard());
//! session.record(JointAngleSample::from([(Joint::Knees, 172.0)]));
//! session.record(JointAngleSample::new());
//! session.record(JointAngleSample::from([(Joint::Knees, 173.0)]));
//!
//! let report = session.finish();
//! assert_eq!(report.frame_count, 3);
//! assert_eq!(report.analyzed_frames.len(), 2);
//! assert!(report.stability.stable_joints.contains(&Joint::Knees));
//! ```

use marksman_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{
    frame::{FrameAnalysis, PostureAnalyzer},
    registry::JointRegistry,
    sample::JointAngleSample,
    stability::{StabilityAnalysis, StabilityAnalyzer},
    summary::{self, SessionSummary},
};

/// Score and feedback of one analyzed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Zero-based position of the frame in the recording.
    pub frame_number: usize,
    pub score: f64,
    pub feedback: Vec<String>,
}

/// Distribution of frame scores over a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl From<DescriptiveStats> for ScoreStats {
    fn from(value: DescriptiveStats) -> Self {
        Self {
            min: value.min,
            max: value.max,
            mean: value.mean,
            median: value.median,
            std_dev: value.std_dev,
        }
    }
}

/// Everything computed for a finished recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Number of recorded frames, including frames without a pose.
    pub frame_count: usize,
    pub analyzed_frames: Vec<FrameRecord>,
    /// `None` when no frame had a usable pose.
    pub score_stats: Option<ScoreStats>,
    pub stability: StabilityAnalysis,
    pub summary: SessionSummary,
}

#[derive(Debug, Clone)]
pub struct PostureSession<'a> {
    posture: PostureAnalyzer<'a>,
    stability: StabilityAnalyzer<'a>,
    frame_count: usize,
    samples: Vec<JointAngleSample>,
    analyses: Vec<(usize, FrameAnalysis)>,
}

impl<'a> PostureSession<'a> {
    #[must_use]
    pub fn new(registry: &'a JointRegistry) -> Self {
        Self::with_analyzers(PostureAnalyzer::new(registry), StabilityAnalyzer::new(registry))
    }

    #[must_use]
    pub fn with_analyzers(posture: PostureAnalyzer<'a>, stability: StabilityAnalyzer<'a>) -> Self {
        Self {
            posture,
            stability,
            frame_count: 0,
            samples: vec![],
            analyses: vec![],
        }
    }

    /// Analyzes a whole recording in one go.
    #[must_use]
    pub fn analyze_recording<I>(registry: &'a JointRegistry, samples: I) -> SessionReport
    where
        I: IntoIterator<Item = JointAngleSample>,
    {
        let mut session = Self::new(registry);
        for sample in samples {
            session.record(sample);
        }
        session.finish()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Analyzes and records the next frame.
    ///
    /// Returns `None` (and keeps nothing) if the frame has no usable pose.
    pub fn record(&mut self, sample: JointAngleSample) -> Option<&FrameAnalysis> {
        let frame_number = self.frame_count;
        self.frame_count += 1;

        let analysis = self.posture.analyze(&sample);
        if analysis.is_no_pose() {
            return None;
        }
        self.samples.push(sample);
        self.analyses.push((frame_number, analysis));
        self.analyses.last().map(|(_, analysis)| analysis)
    }

    #[must_use]
    pub fn finish(self) -> SessionReport {
        let stability = self.stability.analyze(&self.samples);
        let (frame_numbers, analyses): (Vec<_>, Vec<_>) = self.analyses.into_iter().unzip();
        let summary = summary::summarize(&analyses, &stability);
        let score_stats = DescriptiveStats::new(analyses.iter().map(|a| a.score)).map(ScoreStats::from);

        let analyzed_frames = frame_numbers
            .into_iter()
            .zip(analyses)
            .map(|(frame_number, analysis)| FrameRecord {
                frame_number,
                score: analysis.score,
                feedback: analysis.feedback,
            })
            .collect::<Vec<_>>();

        tracing::info!(
            frames = self.frame_count,
            analyzed = analyzed_frames.len(),
            overall_score = summary.overall_score,
            posture_quality = %summary.posture_quality,
            "finished session"
        );

        SessionReport {
            frame_count: self.frame_count,
            analyzed_frames,
            score_stats,
            stability,
            summary,
        }
    }
}
