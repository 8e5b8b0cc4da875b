//! CLI commands

pub mod clean;
pub mod download;
pub mod generate;
pub mod list;
pub mod post;
pub mod routes;
