//! Deviation Calculator: how far a measured angle lies outside its range.
//!
//! The deviation is the distance from the nearest range bound, expressed as a
//! percentage of half that bound and clamped to \[0, 100\]:
//!
//! ```text
//! below:  pct = 100 × (min − measured) / (|min| × SATURATION)
//! above:  pct = 100 × (measured − max) / (|max| × SATURATION)
//! within: pct = 0
//! ```
//!
//! With [`DEVIATION_SATURATION_FACTOR`] = 0.5, an angle that misses its bound by
//! half the bound's magnitude saturates at 100%.
//!
//! The divisor is the bound's magnitude, not the signed bound. For the positive
//! bounds of the built-in table this is the same thing. A custom registry with a
//! negative bound still gets a positive percentage, where the signed formula
//! would go negative and clamp every such deviation to 0.

use serde::{Deserialize, Serialize};

use crate::{joint::Joint, registry::JointConfig};

/// Fraction of the violated bound at which the deviation reaches 100%.
pub const DEVIATION_SATURATION_FACTOR: f64 = 0.5;

/// Minimum distance from the ideal angle, in degrees, that yields an adjustment.
pub const ADJUSTMENT_THRESHOLD_DEGREES: f64 = 5.0;

/// Side of the acceptable range a measurement falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Below,
    Above,
    /// Inside the range; serialized as `"none"`.
    #[serde(rename = "none")]
    Within,
}

/// Normalized deviation of one joint in one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    /// Deviation in \[0, 100\].
    pub percentage: f64,
    pub direction: Direction,
    pub measured: f64,
    pub ideal: f64,
}

impl Deviation {
    #[must_use]
    pub fn compute(config: &JointConfig, measured: f64) -> Self {
        let range = config.range;
        let (direction, percentage) = if measured < range.min {
            (Direction::Below, saturate(range.min - measured, range.min))
        } else if measured > range.max {
            (Direction::Above, saturate(measured - range.max, range.max))
        } else {
            (Direction::Within, 0.0)
        };
        Self {
            percentage,
            direction,
            measured,
            ideal: config.ideal_angle,
        }
    }

    /// Corrective adjustment towards the ideal angle, if one is warranted.
    ///
    /// Only out-of-range measurements more than
    /// [`ADJUSTMENT_THRESHOLD_DEGREES`] away from the ideal produce one.
    #[must_use]
    pub fn adjustment(&self, joint: Joint) -> Option<Adjustment> {
        let adjust_by = self.ideal - self.measured;
        if self.direction.is_within() || adjust_by.abs() <= ADJUSTMENT_THRESHOLD_DEGREES {
            return None;
        }
        let way = if adjust_by > 0.0 { "up" } else { "down" };
        let name = joint.display_name().to_lowercase();
        Some(Adjustment {
            current: self.measured,
            target: self.ideal,
            adjust_by,
            instruction: format!("Adjust {name} by {:.1}° {way}", adjust_by.abs()),
        })
    }
}

fn saturate(distance: f64, bound: f64) -> f64 {
    // A zero bound saturates immediately (distance / 0 = +inf).
    (100.0 * distance / (bound.abs() * DEVIATION_SATURATION_FACTOR)).clamp(0.0, 100.0)
}

/// Concrete change that brings a joint back to its ideal angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub current: f64,
    pub target: f64,
    /// Signed change in degrees (`target - current`).
    pub adjust_by: f64,
    pub instruction: String,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::registry::{AngleRange, JointRegistry};

    fn config(joint: Joint) -> &'static JointConfig {
        JointRegistry::standard().get(joint)
    }

    #[test]
    fn test_within_range_is_zero() {
        for (joint, config) in JointRegistry::standard().iter() {
            for angle in [config.range.min, config.ideal_angle, config.range.max] {
                let deviation = Deviation::compute(config, angle);
                assert_eq!(deviation.direction, Direction::Within, "{joint} at {angle}");
                assert_eq!(deviation.percentage, 0.0);
            }
        }
    }

    #[test]
    fn test_above_range() {
        // (90 - 60) / (60 * 0.5) saturates
        let deviation = Deviation::compute(config(Joint::LeftShoulder), 90.0);
        assert_eq!(deviation.direction, Direction::Above);
        assert_relative_eq!(deviation.percentage, 100.0);
        assert_eq!(deviation.measured, 90.0);
        assert_eq!(deviation.ideal, 45.0);

        let deviation = Deviation::compute(config(Joint::LeftShoulder), 66.0);
        assert_relative_eq!(deviation.percentage, 20.0);
    }

    #[test]
    fn test_below_range() {
        // 100 * (170 - 161.5) / 85
        let deviation = Deviation::compute(config(Joint::Knees), 161.5);
        assert_eq!(deviation.direction, Direction::Below);
        assert_relative_eq!(deviation.percentage, 10.0);
    }

    #[test]
    fn test_saturates_at_100() {
        let deviation = Deviation::compute(config(Joint::Neck), 0.0);
        assert_eq!(deviation.direction, Direction::Below);
        assert_eq!(deviation.percentage, 100.0);

        let deviation = Deviation::compute(config(Joint::Wrists), 1000.0);
        assert_eq!(deviation.direction, Direction::Above);
        assert_eq!(deviation.percentage, 100.0);
    }

    #[test]
    fn test_zero_bound_saturates() {
        let deviation = Deviation::compute(config(Joint::RightShoulder), -1.0);
        assert_eq!(deviation.direction, Direction::Below);
        assert_eq!(deviation.percentage, 100.0);
    }

    #[test]
    fn test_negative_bound_uses_magnitude() {
        let config = JointConfig {
            ideal_angle: -15.0,
            range: AngleRange::new(-20.0, -10.0),
            weight: 0.1,
            feedback_below: String::new(),
            feedback_above: String::new(),
        };
        // 100 * 5 / (20 * 0.5)
        let deviation = Deviation::compute(&config, -25.0);
        assert_eq!(deviation.direction, Direction::Below);
        assert_relative_eq!(deviation.percentage, 50.0);

        // 100 * 2 / (10 * 0.5)
        let deviation = Deviation::compute(&config, -8.0);
        assert_eq!(deviation.direction, Direction::Above);
        assert_relative_eq!(deviation.percentage, 40.0);
    }

    #[test]
    fn test_direction_serializes_as_none_when_within() {
        let json = serde_json::to_string(&Direction::Within).unwrap();
        assert_eq!(json, "\"none\"");
        let json = serde_json::to_string(&Direction::Below).unwrap();
        assert_eq!(json, "\"below\"");
    }

    #[test]
    fn test_adjustment_instruction() {
        let deviation = Deviation::compute(config(Joint::LeftShoulder), 90.0);
        let adjustment = deviation.adjustment(Joint::LeftShoulder).unwrap();
        assert_eq!(adjustment.adjust_by, -45.0);
        assert_eq!(adjustment.instruction, "Adjust left shoulder by 45.0° down");

        let deviation = Deviation::compute(config(Joint::Knees), 150.0);
        let adjustment = deviation.adjustment(Joint::Knees).unwrap();
        assert_eq!(adjustment.instruction, "Adjust knees by 22.5° up");
    }

    #[test]
    fn test_no_adjustment_when_within_or_close() {
        let deviation = Deviation::compute(config(Joint::LeftShoulder), 55.0);
        assert!(deviation.adjustment(Joint::LeftShoulder).is_none());

        // Neck: just above range but within 5° of ideal
        let deviation = Deviation::compute(config(Joint::Neck), 16.0);
        assert_eq!(deviation.direction, Direction::Above);
        assert!(deviation.adjustment(Joint::Neck).is_none());
    }
}
