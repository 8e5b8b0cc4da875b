//! Downloaded post data (`static/api/posts.json`)

use std::fs;
use std::path::Path;

use crate::content::RemotePost;
use crate::error::{Error, Result};

/// Write the fetched records as a JSON array, creating parent directories
pub fn write(path: &Path, posts: &[RemotePost]) -> Result<()> {
    let io_err = |e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string(posts).map_err(|e| io_err(e.into()))?;
    fs::write(path, json).map_err(io_err)?;

    tracing::info!("Posts downloaded to {:?}", path);
    Ok(())
}

/// Read the artifact back. A missing, empty or unparseable file is an error.
pub fn read(path: &Path) -> Result<Vec<RemotePost>> {
    let missing = |reason: String| Error::ArtifactMissing {
        path: path.to_path_buf(),
        reason,
    };

    let data = fs::read_to_string(path).map_err(|e| missing(e.to_string()))?;
    if data.trim().is_empty() {
        return Err(missing("no post data".to_string()));
    }

    serde_json::from_str(&data).map_err(|e| missing(e.to_string()))
}
