//! Configuration loading and application.
mod analyzer;
pub(crate) mod apply;
mod loader;
pub mod types;


pub use analyzer::{AnalyzerConfig, MIN_BOUNDARIES};
pub use apply::apply_config;
pub use loader::load_config;

#[cfg(test)]
pub(crate) use loader::load_config_file;
