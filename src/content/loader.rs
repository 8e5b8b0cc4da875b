//! Content loader - enumerates raw posts under the content root

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, RawContentItem};
use crate::error::{Error, Result};

/// Outcome for a single source file
pub type ItemResult = Result<RawContentItem>;

/// Enumerate every Markdown file under `source_dir`.
///
/// Files are visited in file-name order so repeated runs agree. A file that
/// cannot be read or whose front-matter is invalid takes an `Err` slot in the
/// result without stopping the walk.
pub fn enumerate(source_dir: &Path) -> Result<Vec<ItemResult>> {
    fs::read_dir(source_dir).map_err(|e| Error::SourceRead {
        path: source_dir.to_path_buf(),
        source: e,
    })?;

    let mut items = Vec::new();

    for entry in WalkDir::new(source_dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| source_dir.to_path_buf());
                tracing::warn!("Failed to read {:?}: {}", path, e);
                items.push(Err(Error::SourceRead {
                    path,
                    source: e.into(),
                }));
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file() && is_markdown_file(path) {
            let item = load_item(source_dir, path);
            if let Err(e) = &item {
                tracing::warn!("Failed to load post {:?}: {}", path, e);
            }
            items.push(item);
        }
    }

    tracing::debug!("Enumerated {} posts in {:?}", items.len(), source_dir);

    Ok(items)
}

/// Read one Markdown file into a raw item
fn load_item(source_dir: &Path, path: &Path) -> ItemResult {
    let content = fs::read_to_string(path).map_err(|e| Error::SourceRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let (fm, body) = FrontMatter::parse(path, &content)?;

    let identifier = identifier_for(source_dir, path);
    Ok(RawContentItem::new(identifier, body).with_attributes(fm.attributes))
}

/// Path relative to the content root, without extension, `/`-separated
pub fn identifier_for(source_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(source_dir).unwrap_or(path);
    let without_ext = relative.with_extension("");

    without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
