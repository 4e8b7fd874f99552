use std::{path::{Path, PathBuf}, sync::Arc};

use fxhash::FxHashMap;

use crate::{error::Result, timeline::AnimationTimeline};

/// Caches timelines read from disk so replaying a translation does not parse it again
#[derive(Default)]
pub struct TimelineLoader {
    pub cache: FxHashMap<PathBuf, Arc<AnimationTimeline>>,
}

impl TimelineLoader {
    pub fn new() -> Self {
        TimelineLoader {
            cache: FxHashMap::default(),
        }
    }

    pub fn get(&mut self, timeline_path: impl AsRef<Path>) -> Result<Arc<AnimationTimeline>> {
        let timeline_path = timeline_path.as_ref();

        if let Some(timeline) = self.cache.get(timeline_path) {
            return Ok(timeline.clone());
        }

        let timeline = Arc::new(AnimationTimeline::from_json_file(timeline_path)?);

        self.cache.insert(timeline_path.to_path_buf(), timeline.clone());

        Ok(timeline)
    }

    /// Forget a cached timeline so the next `get` reads the file again
    pub fn evict(&mut self, timeline_path: impl AsRef<Path>) -> Option<Arc<AnimationTimeline>> {
        self.cache.remove(timeline_path.as_ref())
    }
}
