pub mod fetch_ensembl;
pub mod init_config;
pub mod repeat_stats;
