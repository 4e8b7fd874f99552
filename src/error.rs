use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `resume` was called with no timeline, while already playing, or after the run completed
    #[error("there is no playback to resume")]
    NothingToResume,
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
