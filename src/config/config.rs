use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable consulted before `mysql.password`.
pub const PASSWORD_ENV: &str = "ENSEMBL_MYSQL_PASSWORD";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "intron-repeat-tools", "intron-repeat-tools")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_download_timeout")]
    pub download_timeout: u64,
    #[serde(default)]
    pub ensembl: EnsemblConfig,
    #[serde(default)]
    pub mysql: MysqlConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsemblConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory names to mirror; a directory is kept when any pattern matches
    #[serde(default = "default_database_patterns")]
    pub database_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MysqlConfig {
    #[serde(default = "default_mysql_host")]
    pub host: String,
    #[serde(default = "default_mysql_port")]
    pub port: u16,
    #[serde(default = "default_mysql_user")]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

fn default_download_timeout() -> u64 {
    300
}

fn default_base_url() -> String {
    "https://ftp.ensembl.org/pub/current_mysql".to_string()
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("current_mysql"))
        .unwrap_or_else(|| PathBuf::from("current_mysql"))
}

fn default_database_patterns() -> Vec<String> {
    vec![
        r"^[a-z]+_[a-z]+_core_[0-9]{2,}_\w+".to_string(),
        r"^ensembl_[aco][a-z]{6,8}_[0-9]{2,}$".to_string(),
    ]
}

fn default_mysql_host() -> String {
    "localhost".to_string()
}

fn default_mysql_port() -> u16 {
    3306
}

fn default_mysql_user() -> String {
    "root".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_timeout: default_download_timeout(),
            ensembl: EnsemblConfig::default(),
            mysql: MysqlConfig::default(),
        }
    }
}

impl Default for EnsemblConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_dir: default_data_dir(),
            database_patterns: default_database_patterns(),
        }
    }
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            host: default_mysql_host(),
            port: default_mysql_port(),
            user: default_mysql_user(),
            password: None,
        }
    }
}

impl MysqlConfig {
    /// Password from the environment, falling back to the config file.
    pub fn resolve_password(&self) -> Option<String> {
        std::env::var(PASSWORD_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .or_else(|| self.password.clone())
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load the user config, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::path() {
            if config_path.exists() {
                match fs::read_to_string(&config_path) {
                    Ok(content) => match Self::from_toml_str(&content) {
                        Ok(config) => return config,
                        Err(e) => warn!("Ignoring invalid {}: {}", config_path.display(), e),
                    },
                    Err(e) => warn!("Cannot read {}: {}", config_path.display(), e),
                }
            }
        }
        Config::default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::path().context("Failed to determine project directories")?;
        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir)
                .with_context(|| format!("Creating {}", config_dir.display()))?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)
            .with_context(|| format!("Writing {}", config_path.display()))?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mysql.port, 3306);
        assert_eq!(config.ensembl.database_patterns.len(), 2);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
download_timeout = 60

[mysql]
user = "ensembl"
port = 3307
"#,
        )
        .unwrap();
        assert_eq!(config.download_timeout, 60);
        assert_eq!(config.mysql.user, "ensembl");
        assert_eq!(config.mysql.port, 3307);
        assert_eq!(config.mysql.host, "localhost");
        assert_eq!(config.ensembl.base_url, default_base_url());
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.ensembl.data_dir = PathBuf::from("/data/mirror");
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("password"));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
