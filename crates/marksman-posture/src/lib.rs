//! Posture scoring and session analysis for rifle shooting stances.
//!
//! This crate turns per-frame joint angle measurements into interpretable
//! feedback at three levels:
//!
//! 1. **Frame Analysis** ([`frame`]) - Scores a single sample and lists corrective
//!    feedback, using the deviation calculator ([`deviation`]) and the fuzzy
//!    quality engine ([`fuzzy`]).
//!
//! 2. **Stability Analysis** ([`stability`]) - Measures how steadily each joint is
//!    held across a recording.
//!
//! 3. **Session Summary** ([`summary`]) - Blends frame scores and stability into
//!    graded labels, strengths, areas to improve and recommendations.
//!
//! # Architecture
//!
//! ```text
//! Session (recording pipeline, session)
//!     ↓ uses
//! Session Summary ← Stability Analysis
//!     ↑ uses
//! Frame Analysis
//!     ↓ uses
//! Deviation Calculator → Fuzzy Quality Engine
//!     ↓ reads
//! Joint Configuration Registry
//! ```
//!
//! # Supporting Modules
//!
//! - [`joint`] - The closed set of eight tracked joints
//! - [`sample`] - Sparse per-frame joint angle samples
//! - [`registry`] - Per-joint ideal angles, ranges, weights and feedback text
//! - [`grade`] - Score bands shared by the summary labels
//! - [`session`] - Recording pipeline producing a persistable [`session::SessionReport`]
//!
//! # Design Principles
//!
//! ## Single Source of Reference Data
//!
//! All per-joint tuning lives in one immutable [`registry::JointRegistry`] that is
//! passed by reference to every analyzer, so scoring and feedback text cannot
//! drift apart.
//!
//! ## Pure Analysis
//!
//! Analyzers hold no mutable state. They perform no I/O and take no locks, so
//! they can run on the thread that owns the video pipeline and can be shared
//! freely between threads.
//!
//! ## Empty Input Is Not an Error
//!
//! Empty samples and recordings produce well-defined zero / "N/A" results.
//! Unknown joint names are dropped when samples are built, and non-finite angles
//! are skipped like missing joints.
//!
//! # Example
//!
//! ```
//! use marksman_posture::{
//!     frame::PostureAnalyzer,
//!     joint::Joint,
//!     registry::JointRegistry,
//!     sample::JointAngleSample,
//!     stability::StabilityAnalyzer,
//!     summary,
//! };
//!
//! let registry = JointRegistry::standard();
//! let posture = PostureAnalyzer::new(registry);
//! let stability = StabilityAnalyzer::new(registry);
//!
//! let samples = vec![
//!     JointAngleSample::from([(Joint::Knees, 172.0), (Joint::LeftShoulder, 90.0)]),
//!     JointAngleSample::from([(Joint::Knees, 173.0), (Joint::LeftShoulder, 88.0)]),
//! ];
//! let frames = samples.iter().map(|s| posture.analyze(s)).collect::<Vec<_>>();
//! let stability = stability.analyze(&samples);
//! let summary = summary::summarize(&frames, &stability);
//!
//! assert!(summary.areas_to_improve[0].contains("left shoulder"));
//! ```

pub mod deviation;
pub mod frame;
pub mod fuzzy;
pub mod grade;
pub mod joint;
pub mod registry;
pub mod sample;
pub mod session;
pub mod stability;
pub mod summary;
