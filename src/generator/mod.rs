//! Generator module - writes post pages, post data and the route manifest

pub mod routes;

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{html_escape, MarkdownRenderer, NormalizedPost, RemotePost};
use crate::{Blog, Error};

/// Highlight stylesheet, relative to the public directory
const STYLESHEET_PATH: &str = "css/highlight.css";

/// Static output writer
pub struct Generator {
    blog: Blog,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Write every output file and return the route manifest.
    ///
    /// Routes for downloaded posts come first, followed by local posts.
    /// Nothing is written if any local post has a slug that is not a plain
    /// relative path.
    pub fn generate(
        &self,
        remote: &[RemotePost],
        posts: &[NormalizedPost],
        renderer: &MarkdownRenderer,
    ) -> Result<Vec<String>> {
        if let Some(post) = posts.iter().find(|p| !routes::is_valid_slug(&p.slug)) {
            return Err(Error::InvalidSlug {
                slug: post.slug.clone(),
                title: post.title().unwrap_or(&post.slug).to_string(),
            }
            .into());
        }

        fs::create_dir_all(&self.blog.public_dir)?;

        let highlight = renderer.options().highlight;
        if highlight {
            self.generate_stylesheet(renderer)?;
        }

        for post in posts {
            self.generate_post_page(post, highlight)?;
        }

        self.generate_post_data(posts)?;

        let manifest = routes::manifest(
            remote
                .iter()
                .map(|p| p.slug.as_str())
                .chain(posts.iter().map(|p| p.slug.as_str())),
        );
        self.generate_routes(&manifest)?;

        Ok(manifest)
    }

    /// Write the CSS for highlighted code blocks
    fn generate_stylesheet(&self, renderer: &MarkdownRenderer) -> Result<()> {
        let path = self.blog.public_dir.join(STYLESHEET_PATH);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        write_file(&path, &renderer.stylesheet()?)
    }

    /// Write `posts/<slug>/index.html`
    fn generate_post_page(&self, post: &NormalizedPost, stylesheet: bool) -> Result<()> {
        let dir = self
            .blog
            .public_dir
            .join(routes::post_route(&post.slug).trim_start_matches('/'));
        fs::create_dir_all(&dir)?;

        let html = render_page(&self.blog, post, stylesheet);
        write_file(&dir.join("index.html"), &html)
    }

    /// Write `api/posts.json` with every normalized post
    fn generate_post_data(&self, posts: &[NormalizedPost]) -> Result<()> {
        let dir = self.blog.public_dir.join("api");
        fs::create_dir_all(&dir)?;

        let json = serde_json::to_string(posts)?;
        write_file(&dir.join("posts.json"), &json)
    }

    /// Write `routes.json`
    fn generate_routes(&self, manifest: &[String]) -> Result<()> {
        let json = serde_json::to_string_pretty(manifest)?;
        write_file(&self.blog.public_dir.join("routes.json"), &json)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}

/// Minimal standalone page for a post
fn render_page(blog: &Blog, post: &NormalizedPost, stylesheet: bool) -> String {
    let title = post.title().unwrap_or(&post.slug);
    let date = post
        .date
        .map(|d| {
            format!(
                "<time datetime=\"{}\">{}</time>\n",
                d.format("%Y-%m-%d"),
                d.format("%B %-d, %Y")
            )
        })
        .unwrap_or_default();
    let stylesheet = if stylesheet {
        format!("<link rel=\"stylesheet\" href=\"{}\">\n", STYLESHEET_PATH)
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | {site}</title>
<base href="{root}">
{stylesheet}</head>
<body>
<article>
<h1>{title}</h1>
{date}{body}</article>
</body>
</html>
"#,
        title = html_escape(title),
        site = html_escape(&blog.config.title),
        root = html_escape(&blog.config.root),
        stylesheet = stylesheet,
        date = date,
        body = post.body,
    )
}
