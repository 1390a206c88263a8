mod app;
mod config;
mod input;
mod quantile;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use input::{InputError, MalformedKind};
pub use quantile::QuantileError;
