//! Print the route manifest of the downloaded posts

use anyhow::Result;

use crate::api::artifact;
use crate::generator::routes;
use crate::Blog;

/// Route manifest from the artifact; fails when the artifact is missing or empty
pub fn manifest(blog: &Blog) -> Result<Vec<String>> {
    let posts = artifact::read(&blog.artifact_path)?;
    Ok(routes::manifest(posts.iter().map(|p| p.slug.as_str())))
}

/// Print one route per line
pub fn run(blog: &Blog) -> Result<()> {
    for route in manifest(blog)? {
        println!("{}", route);
    }
    Ok(())
}
