//! Route manifest for the static build

use std::collections::HashSet;
use std::path::{Component, Path};

/// Route of a single post page
pub fn post_route(slug: &str) -> String {
    format!("/posts/{}", slug)
}

/// Whether a slug can be used as a path below `posts/`: non-empty and made
/// only of plain path segments (no `..`, `.`, root or prefix)
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && Path::new(slug)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Routes for a sequence of slugs, in order, without duplicates
pub fn manifest<'a, I>(slugs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    slugs
        .into_iter()
        .filter(|slug| seen.insert(*slug))
        .map(post_route)
        .collect()
}
