use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use marksman_posture::{registry::JointRegistry, sample::JointAngleSample};

/// Destination of a command's JSON result: a file, or stdout when no path is given.
pub struct Output {
    writer: Box<dyn Write>,
    target: String,
}

impl Output {
    /// Pretty-prints `value` followed by a newline.
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Self::create(output_path)?;
        output.write_json(value)?;
        tracing::info!(output = %output.target, "wrote result");
        Ok(())
    }

    fn create(output_path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = output_path else {
            return Ok(Self {
                writer: Box::new(io::stdout().lock()),
                target: "stdout".to_owned(),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            target: path.display().to_string(),
        })
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let target = &self.target;
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(self.writer).with_context(|| format!("Failed to write to {target}"))?;
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush output to {target}"))
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read the joint registry from a JSON file, or use the built-in table
///
/// # Arguments
///
/// * `path` - Optional path to a registry JSON file (as written by `show-registry`)
///
/// # Errors
///
/// Returns error if the file cannot be opened, parsed or fails validation
pub fn load_registry(path: Option<&Path>) -> anyhow::Result<Cow<'static, JointRegistry>> {
    match path {
        Some(path) => {
            let registry = read_json_file("registry", path)?;
            tracing::info!(path = %path.display(), "loaded joint registry");
            Ok(Cow::Owned(registry))
        }
        None => Ok(Cow::Borrowed(JointRegistry::standard())),
    }
}

/// Read a single joint angle sample from a JSON file
pub fn read_sample_file<P>(path: P) -> anyhow::Result<JointAngleSample>
where
    P: AsRef<Path>,
{
    read_json_file("sample", path)
}

/// Read a recording (samples in frame order) from a JSON file
pub fn read_samples_file<P>(path: P) -> anyhow::Result<Vec<JointAngleSample>>
where
    P: AsRef<Path>,
{
    read_json_file("samples", path)
}
