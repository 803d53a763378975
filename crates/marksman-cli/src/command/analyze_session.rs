use std::path::PathBuf;

use chrono::Utc;
use marksman_posture::session::PostureSession;

use crate::{
    schema::session_record::SessionRecord,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeSessionArg {
    /// Recording file (JSON array of joint angle samples in frame order)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Joint registry file (defaults to the built-in table)
    #[arg(long)]
    pub(crate) registry: Option<PathBuf>,
    /// Session name stored with the report
    #[arg(long, default_value = "session")]
    pub(crate) name: String,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AnalyzeSessionArg) -> anyhow::Result<()> {
    let AnalyzeSessionArg {
        input,
        registry,
        name,
        output,
    } = arg;

    let registry = util::load_registry(registry.as_deref())?;
    let samples = util::read_samples_file(input)?;
    tracing::info!(input = %input.display(), frames = samples.len(), "loaded recording");

    let report = PostureSession::analyze_recording(&registry, samples);
    if report.analyzed_frames.is_empty() {
        tracing::warn!("no frame in the recording had a usable pose");
    }

    let record = SessionRecord {
        name: name.clone(),
        analyzed_at: Utc::now(),
        report,
    };
    Output::save_json(&record, output.as_deref())?;

    Ok(())
}
