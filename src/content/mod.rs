//! Content module - handles posts and content processing

mod frontmatter;
pub mod loader;
mod markdown;
pub mod normalize;
mod post;

pub use frontmatter::{parse_date_string, Attributes, FrontMatter};
pub use loader::enumerate;
pub use markdown::{MarkdownRenderer, RenderOptions};
pub use normalize::{normalize, normalize_all, normalize_item, parse_identifier};
pub use post::{NormalizedPost, RawContentItem, RemotePost};

pub(crate) use markdown::html_escape;
