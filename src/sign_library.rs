use std::path::Path;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{read_file, Result},
    timeline::{AnimationTimeline, Keyframe, SignSegment, DEFAULT_FPS},
};

/// Rest between consecutive signs in a composed timeline, in seconds
pub const SIGN_PAUSE: f32 = 0.2;

/// Keyframes for one sign. Keyframe times are relative to the start of the clip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SignClip {
    pub keyframes: Vec<Keyframe>,
    pub duration: f32,
}

/// Maps sign labels to their clips and lays clips out into a timeline
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct SignLibrary {
    clips: FxHashMap<String, SignClip>,
}

impl Default for SignLibrary {
    fn default() -> Self {
        let mut library = Self::empty();

        library.insert(
            "hello",
            SignClip {
                keyframes: vec![
                    Keyframe::new(0.0, [0.0, 0.5, 0.0], [0.0, 0.0, 0.0]),
                    Keyframe::new(0.5, [0.3, 0.8, 0.2], [0.0, 0.0, 0.0]),
                    Keyframe::new(1.0, [0.0, 0.5, 0.0], [0.0, 0.0, 0.0]),
                ],
                duration: 1.0,
            },
        );

        library.insert(
            "thank_you",
            SignClip {
                keyframes: vec![
                    Keyframe::new(0.0, [0.0, 0.3, 0.0], [0.0, 0.0, 0.0]),
                    Keyframe::new(0.5, [0.0, 0.6, 0.3], [0.0, 0.0, 0.0]),
                    Keyframe::new(1.0, [0.2, 0.4, 0.1], [0.0, 0.0, 0.0]),
                    Keyframe::new(1.5, [0.0, 0.3, 0.0], [0.0, 0.0, 0.0]),
                ],
                duration: 1.5,
            },
        );

        library
    }
}

impl SignLibrary {
    pub fn empty() -> Self {
        Self {
            clips: FxHashMap::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let library = Self::from_json(&read_file(path)?)?;

        log::debug!("loaded {} sign clips from {}", library.len(), path.display());

        Ok(library)
    }

    pub fn insert(&mut self, sign: impl Into<String>, clip: SignClip) {
        self.clips.insert(sign.into(), clip);
    }

    pub fn get(&self, sign: &str) -> Option<&SignClip> {
        self.clips.get(sign)
    }

    pub fn contains(&self, sign: &str) -> bool {
        self.clips.contains_key(sign)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Lay the clips for `signs` end to end with a short rest after each.
    ///
    /// Signs we have no clip for are skipped.
    pub fn compose<S: AsRef<str>>(&self, signs: &[S]) -> AnimationTimeline {
        let mut segments = vec![];
        let mut cursor = 0.0;

        for sign in signs {
            let sign = sign.as_ref();

            let Some(clip) = self.get(sign) else {
                log::warn!("no animation for sign {sign:?}, skipping");
                continue;
            };

            segments.push(SignSegment {
                sign: sign.to_string(),
                start_time: cursor,
                end_time: cursor + clip.duration,
                keyframes: clip
                    .keyframes
                    .iter()
                    .map(|keyframe| Keyframe {
                        time: keyframe.time + cursor,
                        ..*keyframe
                    })
                    .collect(),
            });

            cursor += clip.duration + SIGN_PAUSE;
        }

        AnimationTimeline {
            signs: segments,
            total_duration: cursor,
            fps: DEFAULT_FPS,
        }
    }
}
