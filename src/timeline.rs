use std::{fmt, path::Path};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    easing::{ease_in_out_cubic, lerp_exact, progress},
    error::{read_file, Error, Result},
    pose::HandPose,
};

pub const DEFAULT_FPS: f32 = 30.0;

/// Range of frame rates a timeline's `fps` is clamped to when stepping it frame by frame
pub const MIN_FPS: f32 = 1.0;
pub const MAX_FPS: f32 = 240.0;

fn default_fps() -> f32 {
    DEFAULT_FPS
}

/// An authored pose sample. `time` is absolute timeline time, not relative to the segment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    pub right_hand: Vec3,
    pub left_hand: Vec3,
}

impl Keyframe {
    pub fn new(time: f32, right_hand: impl Into<Vec3>, left_hand: impl Into<Vec3>) -> Self {
        Self {
            time,
            right_hand: right_hand.into(),
            left_hand: left_hand.into(),
        }
    }
}

/// One lexical sign being performed between `start_time` and `end_time`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SignSegment {
    pub sign: String,
    pub start_time: f32,
    pub end_time: f32,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
}

impl SignSegment {
    /// Both ends are inclusive
    pub fn contains(&self, time: f32) -> bool {
        time >= self.start_time && time <= self.end_time
    }

    pub fn duration(&self) -> f32 {
        self.end_time - self.start_time
    }

    /// Label as shown to a reader, `thank_you` becomes `thank you`
    pub fn caption(&self) -> String {
        self.sign.replace('_', " ")
    }

    fn local(&self, time: f32) -> f32 {
        time - self.start_time
    }

    /// Finds the keyframes either side of `local_time`.
    ///
    /// Before the first keyframe both sides are the first keyframe, after the last both are the
    /// last, so any non empty segment brackets every time.
    pub fn bracket(&self, local_time: f32) -> Option<(&Keyframe, &Keyframe)> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;

        let surrounding = self.keyframes.windows(2).find(|pair| {
            self.local(pair[0].time) <= local_time && local_time <= self.local(pair[1].time)
        });

        if let Some(pair) = surrounding {
            return Some((&pair[0], &pair[1]));
        }

        if local_time <= self.local(first.time) {
            Some((first, first))
        } else {
            Some((last, last))
        }
    }

    /// Eased hand positions at absolute `time`. `None` only when the segment has no keyframes.
    pub fn sample(&self, time: f32) -> Option<HandPose> {
        let local_time = self.local(time);
        let (prev, next) = self.bracket(local_time)?;

        let keyframe_progress = progress(local_time, self.local(prev.time), self.local(next.time));
        let eased = ease_in_out_cubic(keyframe_progress);

        Some(HandPose {
            right_hand: lerp_exact(prev.right_hand, next.right_hand, eased),
            left_hand: lerp_exact(prev.left_hand, next.left_hand, eased),
        })
    }
}

/// Label and length of a segment, for listing the signs about to be performed
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SignSummary {
    pub caption: String,
    pub duration: f32,
}

/// Declarative animation produced by the translation service.
///
/// Immutable once built, the player only ever reads it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnimationTimeline {
    #[serde(default)]
    pub signs: Vec<SignSegment>,
    pub total_duration: f32,
    /// Informational only, sampling is continuous
    #[serde(default = "default_fps")]
    pub fps: f32,
}

impl AnimationTimeline {
    pub fn new(signs: Vec<SignSegment>, total_duration: f32) -> Self {
        Self {
            signs,
            total_duration,
            fps: DEFAULT_FPS,
        }
    }

    /// A generic two second wave used when no real translation is available
    pub fn fallback(sign: &str) -> Self {
        Self::new(
            vec![SignSegment {
                sign: sign.to_string(),
                start_time: 0.0,
                end_time: 2.0,
                keyframes: vec![
                    Keyframe::new(0.0, [0.0, 0.5, 0.0], [0.0, 0.0, 0.0]),
                    Keyframe::new(1.0, [0.2, 0.7, 0.1], [0.0, 0.0, 0.0]),
                    Keyframe::new(2.0, [0.0, 0.5, 0.0], [0.0, 0.0, 0.0]),
                ],
            }],
            2.0,
        )
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let timeline = Self::from_json(&read_file(path)?)?;

        log::debug!(
            "loaded timeline with {} signs ({}s) from {}",
            timeline.signs.len(),
            timeline.total_duration,
            path.display()
        );

        Ok(timeline)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        std::fs::write(path, self.to_json_pretty()?).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("animation data exported to {}", path.display());

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }

    /// Seconds per frame at the nominal `fps`, kept within [`MIN_FPS`]..=[`MAX_FPS`].
    ///
    /// A missing or nonsensical rate falls back to [`DEFAULT_FPS`].
    pub fn frame_interval(&self) -> f32 {
        let fps = if self.fps.is_nan() || self.fps <= 0.0 {
            DEFAULT_FPS
        } else {
            self.fps.clamp(MIN_FPS, MAX_FPS)
        };

        1.0 / fps
    }

    /// First segment containing `time`. Overlapping segments resolve to the earliest listed.
    pub fn active_segment(&self, time: f32) -> Option<&SignSegment> {
        self.signs.iter().find(|segment| segment.contains(time))
    }

    pub fn active_sign(&self, time: f32) -> Option<&str> {
        self.active_segment(time).map(|segment| segment.sign.as_str())
    }

    /// Hand positions at `time`, or `None` in a gap, outside the timeline or on an empty segment
    pub fn sample(&self, time: f32) -> Option<HandPose> {
        self.active_segment(time)?.sample(time)
    }

    pub fn summary(&self) -> Vec<SignSummary> {
        self.signs
            .iter()
            .map(|segment| SignSummary {
                caption: segment.caption(),
                duration: segment.duration(),
            })
            .collect()
    }

    /// Problems the player tolerates but that probably indicate a bad timeline
    pub fn issues(&self) -> Vec<TimelineIssue> {
        let mut issues = vec![];

        if self.total_duration.is_nan() || self.total_duration <= 0.0 {
            issues.push(TimelineIssue::NonPositiveDuration(self.total_duration));
        }

        for (index, segment) in self.signs.iter().enumerate() {
            if segment.duration().is_nan() || segment.duration() <= 0.0 {
                issues.push(TimelineIssue::EmptySpan { segment: index });
            }

            if segment.keyframes.is_empty() {
                issues.push(TimelineIssue::NoKeyframes { segment: index });
            }

            if segment.keyframes.windows(2).any(|pair| pair[1].time < pair[0].time) {
                issues.push(TimelineIssue::UnorderedKeyframes { segment: index });
            }

            if segment.keyframes.iter().any(|keyframe| !segment.contains(keyframe.time)) {
                issues.push(TimelineIssue::KeyframeOutsideSegment { segment: index });
            }

            if index > 0 {
                let previous = &self.signs[index - 1];

                if segment.start_time < previous.start_time {
                    issues.push(TimelineIssue::UnorderedSegments { segment: index });
                } else if segment.start_time < previous.end_time {
                    issues.push(TimelineIssue::Overlap { segment: index });
                }
            }
        }

        issues
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineIssue {
    NonPositiveDuration(f32),
    EmptySpan { segment: usize },
    NoKeyframes { segment: usize },
    UnorderedKeyframes { segment: usize },
    KeyframeOutsideSegment { segment: usize },
    UnorderedSegments { segment: usize },
    Overlap { segment: usize },
}

impl fmt::Display for TimelineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineIssue::NonPositiveDuration(duration) => {
                write!(f, "total duration {duration} is not positive")
            }
            TimelineIssue::EmptySpan { segment } => {
                write!(f, "segment {segment} does not end after it starts")
            }
            TimelineIssue::NoKeyframes { segment } => write!(f, "segment {segment} has no keyframes"),
            TimelineIssue::UnorderedKeyframes { segment } => {
                write!(f, "segment {segment} has keyframes out of time order")
            }
            TimelineIssue::KeyframeOutsideSegment { segment } => {
                write!(f, "segment {segment} has keyframes outside its time span")
            }
            TimelineIssue::UnorderedSegments { segment } => {
                write!(f, "segment {segment} starts before the segment listed ahead of it")
            }
            TimelineIssue::Overlap { segment } => {
                write!(f, "segment {segment} overlaps the previous segment")
            }
        }
    }
}
