use std::path::PathBuf;

use marksman_posture::frame::PostureAnalyzer;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeFrameArg {
    /// Joint angle sample (JSON object of joint name to degrees)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Joint registry file (defaults to the built-in table)
    #[arg(long)]
    pub(crate) registry: Option<PathBuf>,
    /// Include per-joint adjustment instructions
    #[arg(long)]
    pub(crate) detailed: bool,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AnalyzeFrameArg) -> anyhow::Result<()> {
    let AnalyzeFrameArg {
        input,
        registry,
        detailed,
        output,
    } = arg;

    let registry = util::load_registry(registry.as_deref())?;
    let sample = util::read_sample_file(input)?;
    let analyzer = PostureAnalyzer::new(&registry);

    if *detailed {
        let analysis = analyzer.analyze_detailed(&sample);
        tracing::info!(
            score = analysis.analysis.score,
            adjustments = analysis.adjustments.len(),
            "analyzed frame"
        );
        Output::save_json(&analysis, output.as_deref())?;
    } else {
        let analysis = analyzer.analyze(&sample);
        tracing::info!(score = analysis.score, "analyzed frame");
        Output::save_json(&analysis, output.as_deref())?;
    }

    Ok(())
}
