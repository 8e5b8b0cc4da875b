//! List site content

use anyhow::Result;

use crate::api::artifact;
use crate::content;
use crate::generator::routes;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let items = content::enumerate(&blog.source_dir)?;
            println!("Posts ({}):", items.len());
            for item in items {
                match item {
                    Ok(item) => {
                        let (slug, date) = content::parse_identifier(&item.identifier);
                        let date = date
                            .map(|d| d.format("%Y-%m-%d").to_string())
                            .unwrap_or_else(|| "----------".to_string());
                        println!("  {} - {} [{}]", date, slug, item.identifier);
                    }
                    Err(e) => println!("  error: {}", e),
                }
            }
        }
        "remote" => {
            let posts = artifact::read(&blog.artifact_path)?;
            println!("Downloaded posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date().unwrap_or("unknown"),
                    post.title().unwrap_or(&post.slug),
                    post.slug
                );
            }
        }
        "route" | "routes" => {
            let posts = artifact::read(&blog.artifact_path)?;
            let manifest = routes::manifest(posts.iter().map(|p| p.slug.as_str()));
            println!("Routes ({}):", manifest.len());
            for route in manifest {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, remote, route",
                content_type
            );
        }
    }

    Ok(())
}
