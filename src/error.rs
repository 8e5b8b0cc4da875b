//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading, fetching and normalizing posts
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read {path:?}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid front-matter in {path:?}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Invalid response from content API: {0}")]
    InvalidResponse(String),

    #[error("Invalid slug {slug:?} for post {title:?}")]
    InvalidSlug { slug: String, title: String },

    #[error("Post data unavailable at {path:?}: {reason}")]
    ArtifactMissing { path: PathBuf, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
