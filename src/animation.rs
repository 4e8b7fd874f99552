use std::sync::Arc;

use diff::Diff;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    pose::Pose,
    rig::RigConfig,
    timeline::AnimationTimeline,
};

#[derive(Serialize, Deserialize, Diff, PartialEq, Clone, Copy, Debug)]
#[diff(attr(
    #[derive(Serialize, Deserialize)]
))]
pub enum PlayerState {
    /// No timeline, never started, stopped or paused
    Idle,
    Playing,
    /// The run reached the end of the timeline
    Complete,
}

/// The part of the player worth mirroring to another client
#[derive(Serialize, Deserialize, Diff, PartialEq, Clone, Copy, Debug)]
#[diff(attr(
    #[derive(Serialize, Deserialize)]
))]
pub struct PlaybackState {
    pub current_time: f32,
    pub state: PlayerState,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_time: 0.,
            state: PlayerState::Idle,
        }
    }
}

/// Handed to completion listeners when a run reaches the end of its timeline
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackFinished {
    pub total_duration: f32,
    pub signs: usize,
}

type CompletionListener = Box<dyn FnMut(&PlaybackFinished)>;

/// Plays an [`AnimationTimeline`] one frame at a time.
///
/// The renderer calls [`tick`](Self::tick) once per frame with the frame delta and applies
/// [`current_pose`](Self::current_pose) to its rig.
pub struct SignAnimationPlayer {
    timeline: Option<Arc<AnimationTimeline>>,
    rig: RigConfig,
    playback: PlaybackState,
    // seconds of every tick since creation, drives the idle motion
    clock: f32,
    pose: Pose,
    completion_listeners: Vec<CompletionListener>,
}

impl Default for SignAnimationPlayer {
    fn default() -> Self {
        Self::new(RigConfig::default())
    }
}

impl SignAnimationPlayer {
    pub fn new(rig: RigConfig) -> Self {
        let pose = Pose::idle(0., &rig);

        Self {
            timeline: None,
            rig,
            playback: PlaybackState::default(),
            clock: 0.,
            pose,
            completion_listeners: vec![],
        }
    }

    pub fn with_timeline(rig: RigConfig, timeline: impl Into<Arc<AnimationTimeline>>) -> Self {
        let mut player = Self::new(rig);
        player.set_timeline(timeline);
        player
    }

    /// Replace the timeline and rewind.
    ///
    /// If a run was in progress the new timeline starts playing from zero straight away.
    pub fn set_timeline(&mut self, timeline: impl Into<Arc<AnimationTimeline>>) {
        let timeline = timeline.into();

        for issue in timeline.issues() {
            log::warn!("timeline: {issue}");
        }

        log::debug!(
            "new timeline with {} signs over {}s",
            timeline.signs.len(),
            timeline.total_duration
        );

        let was_playing = self.is_playing();

        self.timeline = Some(timeline);
        self.reset();

        if was_playing {
            self.play();
        }
    }

    pub fn clear_timeline(&mut self) {
        self.timeline = None;
        self.reset();
    }

    /// Start a run from time zero
    pub fn play(&mut self) {
        if self.timeline.is_none() {
            log::warn!("play requested without a timeline");
            return;
        }

        self.playback = PlaybackState {
            current_time: 0.,
            state: PlayerState::Playing,
        };
        self.pose = self.pose_at(0.);
    }

    /// Stop the run and rewind. A completed run stays complete.
    pub fn stop(&mut self) {
        if self.playback.state == PlayerState::Complete {
            return;
        }

        self.playback = PlaybackState::default();
        self.pose = self.idle_pose();
    }

    /// Stop advancing but remember where we were
    pub fn pause(&mut self) {
        if self.playback.state == PlayerState::Playing {
            self.playback.state = PlayerState::Idle;
            self.pose = self.idle_pose();
        }
    }

    /// Start playing again from `current_time`.
    ///
    /// After `pause` that continues the run, after `stop` or on a fresh player it starts from zero.
    pub fn resume(&mut self) -> Result<()> {
        if self.timeline.is_none() || self.playback.state != PlayerState::Idle {
            return Err(Error::NothingToResume);
        }

        self.playback.state = PlayerState::Playing;
        self.pose = self.pose_at(self.playback.current_time);

        Ok(())
    }

    /// Back to idle at time zero, from any state
    pub fn reset(&mut self) {
        self.playback = PlaybackState::default();
        self.pose = self.idle_pose();
    }

    /// Register a callback fired once per run, on the tick that reaches the end of the timeline
    pub fn on_complete(&mut self, listener: impl FnMut(&PlaybackFinished) + 'static) {
        self.completion_listeners.push(Box::new(listener));
    }

    /// Advance by one frame.
    ///
    /// Negative or non finite deltas are ignored.
    pub fn tick(&mut self, delta_seconds: f32) {
        if !delta_seconds.is_finite() || delta_seconds < 0. {
            log::warn!("ignoring tick with delta {delta_seconds}");
            return;
        }

        self.clock += delta_seconds;

        match self.playback.state {
            PlayerState::Playing => self.advance(delta_seconds),
            PlayerState::Idle => self.pose = Pose::idle(self.clock, &self.rig),
            // frozen on the last pose we played
            PlayerState::Complete => {}
        }
    }

    fn advance(&mut self, delta_seconds: f32) {
        let Some(timeline) = self.timeline.clone() else {
            self.playback = PlaybackState::default();
            self.pose = Pose::idle(self.clock, &self.rig);
            return;
        };

        let end = if timeline.total_duration.is_nan() {
            0.
        } else {
            timeline.total_duration
        };

        let time = self.playback.current_time + delta_seconds;

        if time >= end {
            self.playback = PlaybackState {
                current_time: end.max(0.),
                state: PlayerState::Complete,
            };

            log::debug!("playback finished after {}s", self.playback.current_time);

            let finished = PlaybackFinished {
                total_duration: timeline.total_duration,
                signs: timeline.signs.len(),
            };

            for listener in &mut self.completion_listeners {
                listener(&finished);
            }

            return;
        }

        self.playback.current_time = time;
        self.pose = self.pose_at(time);

        log::trace!("t={time:.3} sign={:?}", timeline.active_sign(time));
    }

    /// Pose at an arbitrary time on the current timeline.
    ///
    /// Falls back to the idle pose when no sign is active at `time` or there is no timeline.
    pub fn pose_at(&self, time: f32) -> Pose {
        match self.timeline.as_ref().and_then(|timeline| timeline.sample(time)) {
            Some(hands) => Pose::from_hands(hands, &self.rig),
            None => self.idle_pose(),
        }
    }

    pub fn idle_pose(&self) -> Pose {
        Pose::idle(self.clock, &self.rig)
    }

    /// Pose computed by the last tick
    pub fn current_pose(&self) -> &Pose {
        &self.pose
    }

    pub fn current_time(&self) -> f32 {
        self.playback.current_time
    }

    pub fn state(&self) -> PlayerState {
        self.playback.state
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback.state == PlayerState::Playing
    }

    pub fn is_complete(&self) -> bool {
        self.playback.state == PlayerState::Complete
    }

    /// Label of the sign being performed, for captioning. `None` unless playing.
    pub fn active_sign(&self) -> Option<&str> {
        if !self.is_playing() {
            return None;
        }

        self.timeline.as_ref()?.active_sign(self.playback.current_time)
    }

    /// Fraction of the timeline played so far, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        let Some(timeline) = &self.timeline else {
            return 0.;
        };

        if self.is_complete() {
            return 1.;
        }

        if timeline.total_duration.is_nan() || timeline.total_duration <= 0. {
            return 0.;
        }

        (self.playback.current_time / timeline.total_duration).clamp(0., 1.)
    }

    pub fn progress_percent(&self) -> f32 {
        self.progress() * 100.
    }

    pub fn timeline(&self) -> Option<&AnimationTimeline> {
        self.timeline.as_deref()
    }

    pub fn rig(&self) -> &RigConfig {
        &self.rig
    }

    pub fn set_rig(&mut self, rig: RigConfig) {
        self.rig = rig;
    }
}
