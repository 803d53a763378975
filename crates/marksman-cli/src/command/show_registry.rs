use std::path::PathBuf;

use marksman_posture::registry::JointRegistry;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowRegistryArg {
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ShowRegistryArg) -> anyhow::Result<()> {
    let ShowRegistryArg { output } = arg;
    Output::save_json(JointRegistry::standard(), output.as_deref())?;
    Ok(())
}
