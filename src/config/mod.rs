#[allow(clippy::module_inception)]
mod config;

pub use config::{Config, EnsemblConfig, MysqlConfig, PASSWORD_ENV};
