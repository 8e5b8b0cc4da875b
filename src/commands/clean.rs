//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Clean the public directory and the downloaded post data
pub fn run(blog: &Blog) -> Result<()> {
    if blog.public_dir.exists() {
        fs::remove_dir_all(&blog.public_dir)?;
        tracing::info!("Deleted: {:?}", blog.public_dir);
    }

    if blog.artifact_path.exists() {
        fs::remove_file(&blog.artifact_path)?;
        tracing::info!("Deleted: {:?}", blog.artifact_path);
    }

    Ok(())
}
