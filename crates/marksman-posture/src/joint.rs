//! The fixed set of tracked joints.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the eight anatomical reference points whose angle is tracked.
///
/// Variants are declared in registry order, so the derived [`Ord`] gives the
/// iteration order used for feedback and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Knees,
    Hips,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    Wrists,
    Neck,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown joint name '{name}'")]
pub struct UnknownJointError {
    pub name: String,
}

impl Joint {
    pub const ALL: [Self; 8] = [
        Self::Knees,
        Self::Hips,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::Wrists,
        Self::Neck,
    ];

    /// Snake-case identifier used in samples, configuration files and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Knees => "knees",
            Self::Hips => "hips",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::Wrists => "wrists",
            Self::Neck => "neck",
        }
    }

    /// Human-readable title-case name, e.g. `"Left Shoulder"`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Knees => "Knees",
            Self::Hips => "Hips",
            Self::LeftShoulder => "Left Shoulder",
            Self::RightShoulder => "Right Shoulder",
            Self::LeftElbow => "Left Elbow",
            Self::RightElbow => "Right Elbow",
            Self::Wrists => "Wrists",
            Self::Neck => "Neck",
        }
    }

    /// Position of the joint in [`Joint::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Joint {
    type Err = UnknownJointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|joint| joint.as_str() == s)
            .ok_or_else(|| UnknownJointError { name: s.to_owned() })
    }
}
