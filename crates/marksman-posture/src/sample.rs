//! Per-frame joint angle measurements.
//!
//! A [`JointAngleSample`] is produced by the pose pipeline once per processed frame.
//! It is sparse: any subset of joints may be present. When a sample is built from
//! string-keyed data (for example a JSON object), joint names that are not part of
//! the fixed joint set are dropped.
//!
//! ```
//! use marksman_posture::{joint::Joint, sample::JointAngleSample};
//!
//! let sample: JointAngleSample =
//!     serde_json::from_str(r#"{"knees": 172.5, "ankles": 90.0, "neck": null}"#).unwrap();
//! assert_eq!(sample.len(), 1);
//! assert_eq!(sample.get(Joint::Knees), Some(172.5));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::joint::Joint;

/// Sparse mapping from joint to measured angle in degrees.
///
/// Angles are stored as given, without clamping. Non-finite angles are kept but
/// analyzers treat them like missing joints (see [`JointAngleSample::usable_angles`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<f64>>",
    into = "BTreeMap<Joint, f64>"
)]
pub struct JointAngleSample {
    angles: BTreeMap<Joint, f64>,
}

impl JointAngleSample {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sample from `(name, angle)` pairs, ignoring unknown joint names.
    pub fn from_named<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut sample = Self::new();
        for (name, angle) in iter {
            let name = name.as_ref();
            match name.parse::<Joint>() {
                Ok(joint) => {
                    sample.angles.insert(joint, angle);
                }
                Err(_) => tracing::trace!(name, "ignoring unknown joint"),
            }
        }
        sample
    }

    pub fn insert(&mut self, joint: Joint, angle: f64) -> Option<f64> {
        self.angles.insert(joint, angle)
    }

    #[must_use]
    pub fn get(&self, joint: Joint) -> Option<f64> {
        self.angles.get(&joint).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Iterates over present joints in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, f64)> + '_ {
        self.angles.iter().map(|(joint, angle)| (*joint, *angle))
    }

    /// Iterates over present joints whose angle is finite, in registry order.
    pub fn usable_angles(&self) -> impl Iterator<Item = (Joint, f64)> + '_ {
        self.iter().filter(|(joint, angle)| {
            let usable = angle.is_finite();
            if !usable {
                tracing::trace!(%joint, angle, "skipping non-finite angle");
            }
            usable
        })
    }
}

impl FromIterator<(Joint, f64)> for JointAngleSample {
    fn from_iter<T: IntoIterator<Item = (Joint, f64)>>(iter: T) -> Self {
        Self {
            angles: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(Joint, f64); N]> for JointAngleSample {
    fn from(value: [(Joint, f64); N]) -> Self {
        value.into_iter().collect()
    }
}

impl From<BTreeMap<String, Option<f64>>> for JointAngleSample {
    fn from(value: BTreeMap<String, Option<f64>>) -> Self {
        Self::from_named(
            value
                .into_iter()
                .filter_map(|(name, angle)| angle.map(|angle| (name, angle))),
        )
    }
}

impl From<JointAngleSample> for BTreeMap<Joint, f64> {
    fn from(value: JointAngleSample) -> Self {
        value.angles
    }
}
