pub mod cli;
pub mod commands;
pub mod config;
pub mod ensembl;
pub mod error;
pub mod export;
pub mod intervals;
pub mod stats;
pub mod utils;
