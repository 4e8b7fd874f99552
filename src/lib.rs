pub mod animation;
pub mod animation_loader;
pub mod clock;
pub mod easing;
pub mod error;
pub mod pose;
pub mod rig;
pub mod sign_library;
pub mod timeline;

pub use animation::{PlaybackFinished, PlaybackState, PlayerState, SignAnimationPlayer};
pub use error::{Error, Result};
pub use pose::{HandPose, Pose, Rotations};
pub use rig::RigConfig;
pub use timeline::{AnimationTimeline, Keyframe, SignSegment};
