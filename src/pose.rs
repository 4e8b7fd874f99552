use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::rig::RigConfig;

/// Interpolated hand positions for one instant of a sign
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    pub right_hand: Vec3,
    pub left_hand: Vec3,
}

/// Everything the renderer needs to pose the avatar for one frame
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub right_hand: Vec3,
    pub left_hand: Vec3,
    pub rotations: Rotations,
    /// Vertical offset of the head/torso group
    pub torso_lift: f32,
    /// True when this pose comes from the idle motion rather than a sign
    pub idle: bool,
}

/// Secondary rotations in radians
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotations {
    pub right_arm_z: f32,
    pub left_arm_z: f32,
    pub torso_y: f32,
}

impl Pose {
    /// Pose the rig around a pair of signed hand positions.
    pub fn from_hands(hands: HandPose, rig: &RigConfig) -> Self {
        let swing = &rig.arm_swing;
        let follow = &rig.torso_follow;

        let average_x = (hands.right_hand.x + hands.left_hand.x) / 2.0;

        Self {
            right_hand: hands.right_hand,
            left_hand: hands.left_hand,
            rotations: Rotations {
                right_arm_z: -hands.right_hand.x * swing.gain + swing.right_offset,
                left_arm_z: -hands.left_hand.x * swing.gain + swing.left_offset,
                torso_y: average_x * follow.rotation_gain,
            },
            torso_lift: follow.lift_base + average_x.abs() * follow.lift_gain,
            idle: false,
        }
    }

    /// Resting motion as a function of wall clock seconds, independent of any timeline.
    pub fn idle(elapsed: f32, rig: &RigConfig) -> Self {
        let idle = &rig.idle;
        let arm = (elapsed * idle.arm_frequency).sin() * idle.arm_amplitude;

        Self {
            right_hand: rig.right_rest,
            left_hand: rig.left_rest,
            rotations: Rotations {
                right_arm_z: -arm - idle.arm_offset,
                left_arm_z: arm + idle.arm_offset,
                torso_y: (elapsed * idle.sway_frequency).sin() * idle.sway_amplitude,
            },
            torso_lift: (elapsed * idle.bob_frequency).sin() * idle.bob_amplitude,
            idle: true,
        }
    }
}
