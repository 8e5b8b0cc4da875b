//! Download posts from the content API

use anyhow::{Context, Result};

use crate::api::{artifact, ContentClient};
use crate::Blog;

/// Fetch the post listing and write it to the artifact path
pub async fn run(blog: &Blog) -> Result<()> {
    let client = ContentClient::new(&blog.config.api)?;
    tracing::info!("Downloading posts from {}", client.posts_url());

    let posts = client
        .posts()
        .await
        .context("Could not download posts")?;
    artifact::write(&blog.artifact_path, &posts)?;

    Ok(())
}
