use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{read_file, Result};

/// Cosmetic constants used to turn hand positions into a posed rig.
///
/// None of this affects which keyframes are sampled or how they are eased, it only shapes the
/// secondary motion (arm swing, torso follow, idle bob). Every field has a default so a config
/// file only needs the values it wants to change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RigConfig {
    /// Where the right hand rests while idle
    pub right_rest: Vec3,
    pub left_rest: Vec3,

    pub idle: IdleMotion,
    pub arm_swing: ArmSwing,
    pub torso_follow: TorsoFollow,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            right_rest: Vec3::new(0.6, 0.8, 0.0),
            left_rest: Vec3::new(-0.6, 0.8, 0.0),
            idle: IdleMotion::default(),
            arm_swing: ArmSwing::default(),
            torso_follow: TorsoFollow::default(),
        }
    }
}

impl RigConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_yaml_str(&read_file(path)?)?;

        log::debug!("loaded rig config from {}", path.display());

        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Low amplitude sinusoidal motion shown while nothing is being signed
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct IdleMotion {
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub sway_amplitude: f32,
    pub sway_frequency: f32,
    pub arm_amplitude: f32,
    pub arm_frequency: f32,
    /// Constant outward tilt added to both arms
    pub arm_offset: f32,
}

impl Default for IdleMotion {
    fn default() -> Self {
        Self {
            bob_amplitude: 0.05,
            bob_frequency: 2.0,
            sway_amplitude: 0.05,
            sway_frequency: 0.5,
            arm_amplitude: 0.1,
            arm_frequency: 1.0,
            arm_offset: 0.1,
        }
    }
}

/// `rotation_z = -hand_x * gain + offset` per arm
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ArmSwing {
    pub gain: f32,
    pub right_offset: f32,
    pub left_offset: f32,
}

impl Default for ArmSwing {
    fn default() -> Self {
        Self {
            gain: 0.5,
            right_offset: -0.2,
            left_offset: 0.2,
        }
    }
}

/// Torso turns and lifts toward the average horizontal hand position
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TorsoFollow {
    pub rotation_gain: f32,
    pub lift_base: f32,
    pub lift_gain: f32,
}

impl Default for TorsoFollow {
    fn default() -> Self {
        Self {
            rotation_gain: 0.3,
            lift_base: 0.1,
            lift_gain: 0.1,
        }
    }
}
