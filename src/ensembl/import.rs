use log::{info, warn};
use std::fs::File;
use std::path::Path;
use std::process::Command;

use super::fetch::decompressed_name;
use super::validate_database_name;
use crate::config::MysqlConfig;
use crate::error::EnsemblError;
use crate::utils::external_tools::run_checked;

/// Checksum listing shipped in every release directory.
const CHECKSUMS_FILE: &str = "CHECKSUMS";

/// Table dump extension; each `<table>.txt` is loaded into `<table>`.
const TABLE_DUMP_EXTENSION: &str = ".txt";

pub fn schema_file_name(database: &str) -> String {
    format!("{database}.sql")
}

/// Decompressed table dumps of a database, in listing order. The schema and
/// checksum files are left out.
pub fn data_files(database: &str, files: &[String]) -> Vec<String> {
    let schema = schema_file_name(database);
    files
        .iter()
        .map(|f| decompressed_name(f))
        .filter(|name| *name != CHECKSUMS_FILE && *name != schema)
        .filter(|name| name.ends_with(TABLE_DUMP_EXTENSION))
        .map(str::to_string)
        .collect()
}

/// Thin wrapper over the `mysql` and `mysqlimport` clients.
///
/// The password travels in `MYSQL_PWD` so it never shows up in process
/// listings or error messages.
pub struct MysqlClient<'a> {
    config: &'a MysqlConfig,
    password: Option<String>,
}

impl<'a> MysqlClient<'a> {
    pub fn new(config: &'a MysqlConfig) -> Self {
        let password = config.resolve_password();
        if password.is_none() {
            warn!("No MySQL password configured; connecting without one");
        }
        Self { config, password }
    }

    fn command(&self, tool: &str) -> Command {
        let mut command = Command::new(tool);
        command
            .arg("-h")
            .arg(&self.config.host)
            .arg("-u")
            .arg(&self.config.user)
            .arg("-P")
            .arg(self.config.port.to_string());
        if let Some(password) = &self.password {
            command.env("MYSQL_PWD", password);
        }
        command
    }

    pub fn recreate_command(&self, database: &str) -> Result<Command, EnsemblError> {
        let database = validate_database_name(database)?;
        let mut command = self.command("mysql");
        command.arg("-e").arg(format!(
            "DROP DATABASE IF EXISTS `{database}`; CREATE DATABASE IF NOT EXISTS `{database}`"
        ));
        Ok(command)
    }

    pub fn schema_command(&self, database: &str, schema: &Path) -> Result<Command, EnsemblError> {
        let database = validate_database_name(database)?;
        let mut command = self.command("mysql");
        command.arg(database).stdin(File::open(schema)?);
        Ok(command)
    }

    pub fn import_command(&self, database: &str, data: &Path) -> Result<Command, EnsemblError> {
        let database = validate_database_name(database)?;
        let mut command = self.command("mysqlimport");
        command
            .arg("--fields_escaped_by=\\\\")
            .arg(database)
            .arg("-L")
            .arg(data);
        Ok(command)
    }
}

/// Drop and recreate `database`, load its schema, then import every table
/// dump found in `dir`. Returns the number of tables imported.
pub fn import_database(
    client: &MysqlClient<'_>,
    database: &str,
    dir: &Path,
    files: &[String],
) -> Result<usize, EnsemblError> {
    run_checked(&mut client.recreate_command(database)?)?;

    let schema = dir.join(schema_file_name(database));
    if schema.exists() {
        run_checked(&mut client.schema_command(database, &schema)?)?;
    } else {
        warn!("{} has no schema file {}", database, schema.display());
    }

    let mut imported = 0;
    for name in data_files(database, files) {
        let path = dir.join(&name);
        if !path.exists() {
            warn!("Skipping missing table dump {}", path.display());
            continue;
        }
        run_checked(&mut client.import_command(database, &path)?)?;
        imported += 1;
    }
    info!("{}: imported {} tables", database, imported);
    Ok(imported)
}
