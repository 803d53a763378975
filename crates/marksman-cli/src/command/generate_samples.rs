use std::path::PathBuf;

use anyhow::{Context as _, bail};
use marksman_posture::{registry::JointRegistry, sample::JointAngleSample};
use rand::{Rng, SeedableRng as _};
use rand_distr::{Distribution as _, Normal};
use rand_pcg::Pcg64;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateSamplesArg {
    /// Number of frames to generate
    #[arg(long, default_value_t = 300)]
    pub(crate) num_frames: usize,
    /// Standard deviation of each joint angle around its ideal, in degrees
    #[arg(long, default_value_t = 3.0)]
    pub(crate) jitter: f64,
    /// Probability that a joint is missing from a frame
    #[arg(long, default_value_t = 0.0)]
    pub(crate) drop_rate: f64,
    /// Random seed (random if omitted)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Joint registry file providing the ideal angles
    #[arg(long)]
    pub(crate) registry: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateSamplesArg) -> anyhow::Result<()> {
    let GenerateSamplesArg {
        num_frames,
        jitter,
        drop_rate,
        seed,
        registry,
        output,
    } = arg;

    if !(0.0..=1.0).contains(drop_rate) {
        bail!("--drop-rate must be within [0, 1], got {drop_rate}");
    }

    let registry = util::load_registry(registry.as_deref())?;
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(seed, num_frames, jitter, drop_rate, "generating samples");

    let mut rng = Pcg64::seed_from_u64(seed);
    let samples = generate(&registry, *num_frames, *jitter, *drop_rate, &mut rng)?;
    Output::save_json(&samples, output.as_deref())?;

    Ok(())
}

fn generate<R>(
    registry: &JointRegistry,
    num_frames: usize,
    jitter: f64,
    drop_rate: f64,
    rng: &mut R,
) -> anyhow::Result<Vec<JointAngleSample>>
where
    R: Rng + ?Sized,
{
    // Normal mirrors a negative std dev instead of rejecting it.
    if !jitter.is_finite() || jitter < 0.0 {
        bail!("--jitter must be a non-negative finite number, got {jitter}");
    }

    let distributions = registry
        .iter()
        .map(|(joint, config)| {
            let normal = Normal::new(config.ideal_angle, jitter)
                .with_context(|| format!("Invalid jitter for {joint}: {jitter}"))?;
            Ok((joint, normal))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut samples = Vec::with_capacity(num_frames);
    for _ in 0..num_frames {
        let mut sample = JointAngleSample::new();
        for (joint, normal) in &distributions {
            if rng.random_bool(drop_rate) {
                continue;
            }
            sample.insert(*joint, normal.sample(rng));
        }
        samples.push(sample);
    }

    let empty_frames = samples.iter().filter(|s| s.is_empty()).count();
    tracing::debug!(empty_frames, "generated recording");

    Ok(samples)
}
