//! Configuration module

mod site;

pub use site::ApiConfig;
pub use site::HighlightConfig;
pub use site::SiteConfig;
