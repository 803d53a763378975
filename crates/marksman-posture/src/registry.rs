//! Joint Configuration Registry: per-joint reference data.
//!
//! The registry holds, for each of the eight [`Joint`]s, the ideal angle, the
//! acceptable range, the joint's weight in the overall score and the corrective
//! feedback shown when the joint leaves its range. It is built once, never mutated
//! and shared by reference with every analyzer, so scoring and messaging always
//! read the same table.
//!
//! # Sources
//!
//! - [`JointRegistry::standard`] - the built-in rifle stance table, a process-wide
//!   static initialized on first use
//! - [`JointRegistry::from_config`] - a validated registry from external
//!   configuration (typically a JSON file, see [`RegistryConfig`])
//!
//! # Weights
//!
//! The built-in weights sum to 1.0, so the frame score is a plain weighted sum.
//! Custom tables whose weights do not sum to 1.0 are renormalized through
//! [`JointRegistry::score_weight`].
//!
//! ```
//! use marksman_posture::{joint::Joint, registry::JointRegistry};
//!
//! let registry = JointRegistry::standard();
//! let config = registry.get(Joint::LeftShoulder);
//! assert_eq!(config.ideal_angle, 45.0);
//! assert!(config.range.contains(50.0));
//! ```

use std::{collections::BTreeMap, sync::LazyLock};

use serde::{Deserialize, Serialize};

use crate::joint::Joint;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Acceptable angle interval in degrees, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
}

impl AngleRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        (self.min..=self.max).contains(&angle)
    }
}

/// Reference data for one joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    /// Target angle in degrees.
    pub ideal_angle: f64,
    /// Angles inside this range count as no deviation.
    pub range: AngleRange,
    /// Relative contribution to the overall posture score.
    pub weight: f64,
    /// Corrective message when the angle is below the range.
    pub feedback_below: String,
    /// Corrective message when the angle is above the range.
    pub feedback_above: String,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RegistryError {
    #[display("no configuration for joint '{joint}'")]
    MissingJoint { joint: Joint },
    #[display("invalid angle range for joint '{joint}': [{min}, {max}]")]
    InvalidRange { joint: Joint, min: f64, max: f64 },
    #[display("invalid ideal angle for joint '{joint}': {ideal_angle}")]
    InvalidIdealAngle { joint: Joint, ideal_angle: f64 },
    #[display("invalid weight for joint '{joint}': {weight}")]
    InvalidWeight { joint: Joint, weight: f64 },
    #[display("joint weights sum to zero")]
    ZeroTotalWeight,
}

/// Serialized form of a registry: one entry per joint.
///
/// ```json
/// {
///   "joints": {
///     "knees": {
///       "ideal_angle": 172.5,
///       "range": { "min": 170.0, "max": 175.0 },
///       "weight": 0.1,
///       "feedback_below": "...",
///       "feedback_above": "..."
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub joints: BTreeMap<Joint, JointConfig>,
}

/// Immutable per-joint reference table covering every [`Joint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RegistryConfig", into = "RegistryConfig")]
pub struct JointRegistry {
    configs: [JointConfig; Joint::ALL.len()],
    total_weight: f64,
}

static STANDARD: LazyLock<JointRegistry> = LazyLock::new(|| {
    let configs = Joint::ALL.map(standard_joint_config);
    let total_weight = configs.iter().map(|c| c.weight).sum();
    tracing::debug!(total_weight, "initialized standard joint registry");
    JointRegistry {
        configs,
        total_weight,
    }
});

fn standard_joint_config(joint: Joint) -> JointConfig {
    let (ideal_angle, (min, max), weight, feedback_below, feedback_above) = match joint {
        Joint::Knees => (
            172.5,
            (170.0, 175.0),
            0.1,
            "Straighten your knees slightly, they're too bent",
            "Bend your knees slightly for better stability",
        ),
        Joint::Hips => (
            180.0,
            (175.0, 185.0),
            0.1,
            "Adjust your hip position to be more upright",
            "Lower your hips slightly for better alignment",
        ),
        Joint::LeftShoulder => (
            45.0,
            (30.0, 60.0),
            0.2,
            "Raise your left shoulder more to support the rifle",
            "Lower your left shoulder slightly for better control",
        ),
        Joint::RightShoulder => (
            15.0,
            (0.0, 30.0),
            0.1,
            "Raise your right shoulder slightly",
            "Lower your right shoulder closer to your body",
        ),
        Joint::LeftElbow => (
            75.0,
            (60.0, 90.0),
            0.2,
            "Raise your left elbow more to support the rifle",
            "Lower your left elbow slightly for better stability",
        ),
        Joint::RightElbow => (
            90.0,
            (80.0, 100.0),
            0.15,
            "Bend your right elbow more for proper grip",
            "Extend your right elbow slightly for better control",
        ),
        Joint::Wrists => (
            180.0,
            (170.0, 190.0),
            0.05,
            "Straighten your wrists more for consistent support",
            "Relax your wrists slightly for better control",
        ),
        Joint::Neck => (
            12.5,
            (10.0, 15.0),
            0.1,
            "Tilt your head forward slightly to align with sights",
            "Raise your head slightly to improve sight alignment",
        ),
    };
    JointConfig {
        ideal_angle,
        range: AngleRange::new(min, max),
        weight,
        feedback_below: feedback_below.to_owned(),
        feedback_above: feedback_above.to_owned(),
    }
}

impl JointRegistry {
    /// The built-in rifle stance table.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Validates external configuration into a registry.
    ///
    /// Every joint must be configured with finite values, `min <= max` and a
    /// non-negative weight, and at least one weight must be positive.
    pub fn from_config(mut config: RegistryConfig) -> Result<Self, RegistryError> {
        let mut configs = Vec::with_capacity(Joint::ALL.len());
        for joint in Joint::ALL {
            let entry = config
                .joints
                .remove(&joint)
                .ok_or(RegistryError::MissingJoint { joint })?;
            validate_entry(joint, &entry)?;
            configs.push(entry);
        }
        let total_weight = configs.iter().map(|c| c.weight).sum::<f64>();
        if total_weight <= 0.0 {
            return Err(RegistryError::ZeroTotalWeight);
        }
        let Ok(configs): Result<[JointConfig; Joint::ALL.len()], _> = configs.try_into() else {
            unreachable!("one entry is pushed per joint");
        };
        Ok(Self {
            configs,
            total_weight,
        })
    }

    #[must_use]
    pub fn get(&self, joint: Joint) -> &JointConfig {
        &self.configs[joint.index()]
    }

    /// Looks up a joint by its snake-case name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<(Joint, &JointConfig)> {
        let joint = name.parse::<Joint>().ok()?;
        Some((joint, self.get(joint)))
    }

    /// Iterates over all joints in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, &JointConfig)> {
        Joint::ALL.into_iter().zip(&self.configs)
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Weight of `joint` in the frame score.
    ///
    /// Equal to the configured weight when the weights sum to 1.0; otherwise
    /// scaled so that they do.
    #[must_use]
    pub fn score_weight(&self, joint: Joint) -> f64 {
        let weight = self.get(joint).weight;
        if (self.total_weight - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
            weight
        } else {
            weight / self.total_weight
        }
    }
}

fn validate_entry(joint: Joint, entry: &JointConfig) -> Result<(), RegistryError> {
    let AngleRange { min, max } = entry.range;
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(RegistryError::InvalidRange { joint, min, max });
    }
    if !entry.ideal_angle.is_finite() {
        return Err(RegistryError::InvalidIdealAngle {
            joint,
            ideal_angle: entry.ideal_angle,
        });
    }
    if !entry.weight.is_finite() || entry.weight < 0.0 {
        return Err(RegistryError::InvalidWeight {
            joint,
            weight: entry.weight,
        });
    }
    Ok(())
}

impl TryFrom<RegistryConfig> for JointRegistry {
    type Error = RegistryError;

    fn try_from(value: RegistryConfig) -> Result<Self, Self::Error> {
        Self::from_config(value)
    }
}

impl From<JointRegistry> for RegistryConfig {
    fn from(value: JointRegistry) -> Self {
        Self {
            joints: Joint::ALL.into_iter().zip(value.configs).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn standard_config() -> RegistryConfig {
        JointRegistry::standard().clone().into()
    }

    #[test]
    fn test_standard_weights_sum_to_one() {
        let registry = JointRegistry::standard();
        assert_relative_eq!(registry.total_weight(), 1.0);
        for joint in Joint::ALL {
            assert_eq!(registry.score_weight(joint), registry.get(joint).weight);
        }
    }

    #[test]
    fn test_standard_ideal_within_range() {
        for (joint, config) in JointRegistry::standard().iter() {
            assert!(
                config.range.contains(config.ideal_angle),
                "{joint}: ideal angle outside range"
            );
        }
    }

    #[test]
    fn test_get_by_name() {
        let registry = JointRegistry::standard();
        let (joint, config) = registry.get_by_name("right_elbow").unwrap();
        assert_eq!(joint, Joint::RightElbow);
        assert_eq!(config.range, AngleRange::new(80.0, 100.0));
        assert!(registry.get_by_name("ankles").is_none());
    }

    #[test]
    fn test_from_config_round_trip() {
        let registry = JointRegistry::from_config(standard_config()).unwrap();
        assert_eq!(&registry, JointRegistry::standard());
    }

    #[test]
    fn test_from_config_missing_joint() {
        let mut config = standard_config();
        config.joints.remove(&Joint::Wrists);
        let err = JointRegistry::from_config(config).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingJoint {
                joint: Joint::Wrists
            }
        ));
    }

    #[test]
    fn test_from_config_invalid_range() {
        let mut config = standard_config();
        config.joints.get_mut(&Joint::Neck).unwrap().range = AngleRange::new(15.0, 10.0);
        let err = JointRegistry::from_config(config).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRange { joint: Joint::Neck, .. }));
    }

    #[test]
    fn test_from_config_invalid_weight() {
        let mut config = standard_config();
        config.joints.get_mut(&Joint::Hips).unwrap().weight = -0.1;
        let err = JointRegistry::from_config(config).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidWeight { joint: Joint::Hips, .. }));
    }

    #[test]
    fn test_from_config_zero_weights() {
        let mut config = standard_config();
        for entry in config.joints.values_mut() {
            entry.weight = 0.0;
        }
        let err = JointRegistry::from_config(config).unwrap_err();
        assert!(matches!(err, RegistryError::ZeroTotalWeight));
    }

    #[test]
    fn test_score_weight_renormalizes() {
        let mut config = standard_config();
        for entry in config.joints.values_mut() {
            entry.weight *= 2.0;
        }
        let registry = JointRegistry::from_config(config).unwrap();
        assert_relative_eq!(registry.total_weight(), 2.0);
        assert_relative_eq!(registry.score_weight(Joint::LeftShoulder), 0.2);
        let sum = Joint::ALL
            .into_iter()
            .map(|joint| registry.score_weight(joint))
            .sum::<f64>();
        assert_relative_eq!(sum, 1.0);
    }

    #[test]
    fn test_json_validates_on_load() {
        let mut config = standard_config();
        config.joints.remove(&Joint::Knees);
        let json = serde_json::to_string(&config).unwrap();
        let err = serde_json::from_str::<JointRegistry>(&json).unwrap_err();
        assert!(err.to_string().contains("knees"));
    }
}
