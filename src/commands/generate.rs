//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::api::artifact;
use crate::content::{self, RawContentItem};
use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    // Downloaded posts are required, the build has no routes without them
    let remote = artifact::read(&blog.artifact_path)?;

    let items = load_items(blog)?;
    let renderer = blog.renderer();
    let posts = content::normalize_all(items, &renderer)?;

    tracing::info!(
        "Loaded {} downloaded posts and {} local posts",
        remote.len(),
        posts.len()
    );

    let manifest = Generator::new(blog).generate(&remote, &posts, &renderer)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} routes in {:.2}s",
        manifest.len(),
        duration.as_secs_f64()
    );

    Ok(())
}

/// Raw items from the posts directory; files that fail to load are skipped
fn load_items(blog: &Blog) -> Result<Vec<RawContentItem>> {
    if !blog.source_dir.exists() {
        tracing::debug!("No posts directory at {:?}", blog.source_dir);
        return Ok(Vec::new());
    }

    let items = content::enumerate(&blog.source_dir)?
        .into_iter()
        .filter_map(|item| item.ok())
        .collect();

    Ok(items)
}

/// Watch for file changes and regenerate
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if blog.source_dir.exists() {
        watcher.watch(&blog.source_dir, notify::RecursiveMode::Recursive)?;
    }

    if blog.artifact_path.exists() {
        watcher.watch(&blog.artifact_path, notify::RecursiveMode::NonRecursive)?;
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce bursts of events from a single save
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = run(blog) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::Error;
    use std::fs;
    use tempfile::TempDir;

    fn blog(tmp: &TempDir) -> Blog {
        Blog::with_config(tmp.path().to_path_buf(), SiteConfig::default())
    }

    #[test]
    fn test_generate_requires_artifact() {
        let tmp = TempDir::new().unwrap();
        let err = run(&blog(&tmp)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ArtifactMissing { .. })
        ));
    }

    #[test]
    fn test_generate_site() {
        let tmp = TempDir::new().unwrap();
        let blog = blog(&tmp);

        fs::create_dir_all(blog.artifact_path.parent().unwrap()).unwrap();
        fs::write(&blog.artifact_path, r#"[{"slug": "remote-post"}]"#).unwrap();

        fs::create_dir_all(&blog.source_dir).unwrap();
        fs::write(
            blog.source_dir.join("2017-02-03-first.md"),
            "---\ntitle: First\n---\nSome *text*\n",
        )
        .unwrap();
        fs::write(blog.source_dir.join("broken.md"), "---\ntitle: [\n---\n").unwrap();

        run(&blog).unwrap();

        let routes: Vec<String> = serde_json::from_str(
            &fs::read_to_string(blog.public_dir.join("routes.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(routes, vec!["/posts/remote-post", "/posts/first"]);

        let page = fs::read_to_string(blog.public_dir.join("posts/first/index.html")).unwrap();
        assert!(page.contains("<p>Some <em>text</em></p>"));
    }

    #[test]
    fn test_generate_without_local_posts() {
        let tmp = TempDir::new().unwrap();
        let blog = blog(&tmp);
        fs::create_dir_all(blog.artifact_path.parent().unwrap()).unwrap();
        fs::write(&blog.artifact_path, "[]").unwrap();

        run(&blog).unwrap();
        assert!(blog.public_dir.join("routes.json").exists());
    }
}
