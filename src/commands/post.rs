//! Look up a single downloaded post by slug

use anyhow::Result;

use crate::api::ContentClient;
use crate::content::RemotePost;
use crate::generator::routes;
use crate::{Blog, Error};

/// Fetch one post and print its summary. A missing slug prints a 404 notice.
pub async fn run(blog: &Blog, slug: &str) -> Result<()> {
    let client = ContentClient::new(&blog.config.api)?;

    match client.post(slug).await {
        Ok(post) => {
            print!("{}", summary(&post));
            Ok(())
        }
        Err(Error::NotFound(slug)) => {
            tracing::warn!("No post with slug {}", slug);
            println!("404: post not found: {}", slug);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Title, date, route and content of a post
fn summary(post: &RemotePost) -> String {
    let mut out = format!("{}\n", post.title().unwrap_or(&post.slug));
    if let Some(date) = post.date() {
        out.push_str(&format!("  date:  {}\n", date));
    }
    out.push_str(&format!("  route: {}\n", routes::post_route(&post.slug)));
    if let Some(content) = post.content() {
        out.push_str(&format!("\n{}\n", content.trim()));
    }
    out
}
