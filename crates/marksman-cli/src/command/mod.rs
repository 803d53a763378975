use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    analyze_frame::AnalyzeFrameArg, analyze_session::AnalyzeSessionArg,
    generate_samples::GenerateSamplesArg, show_registry::ShowRegistryArg,
};

mod analyze_frame;
mod analyze_session;
mod generate_samples;
mod show_registry;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug events (overridden by `RUST_LOG`)
    #[arg(long, short, global = true)]
    verbose: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Score a single frame of joint angles
    AnalyzeFrame(#[clap(flatten)] AnalyzeFrameArg),
    /// Analyze a recorded session (frame scores, stability and summary)
    AnalyzeSession(#[clap(flatten)] AnalyzeSessionArg),
    /// Print the built-in joint registry
    ShowRegistry(#[clap(flatten)] ShowRegistryArg),
    /// Generate a synthetic recording around the ideal stance
    GenerateSamples(#[clap(flatten)] GenerateSamplesArg),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::AnalyzeFrame(arg) => analyze_frame::run(&arg)?,
        Mode::AnalyzeSession(arg) => analyze_session::run(&arg)?,
        Mode::ShowRegistry(arg) => show_registry::run(&arg)?,
        Mode::GenerateSamples(arg) => generate_samples::run(&arg)?,
    }
    Ok(())
}
