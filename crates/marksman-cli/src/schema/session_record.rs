use chrono::{DateTime, Utc};
use marksman_posture::session::SessionReport;
use serde::{Deserialize, Serialize};

/// Analyzed recording with metadata, as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session name given on the command line
    pub name: String,
    /// Timestamp when the analysis was run (ISO 8601 format)
    pub analyzed_at: DateTime<Utc>,
    /// Frame scores, stability analysis and summary
    #[serde(flatten)]
    pub report: SessionReport,
}
