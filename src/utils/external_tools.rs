use anyhow::{Context, Result};
use log::debug;
use std::process::Command;

use crate::error::EnsemblError;

/// Fails early when a MySQL command-line client is not on `PATH`.
pub fn check_mysql_client(tool: &str) -> Result<()> {
    Command::new(tool)
        .arg("--version")
        .output()
        .with_context(|| {
            format!("{tool} not found. Please install the MySQL client tools and ensure they are in your PATH")
        })
        .map(|_| ())
}

/// Shell-like rendering of a command for messages; secrets never appear in
/// arguments so nothing is masked.
pub fn describe(command: &Command) -> String {
    let mut parts = vec![command.get_program().to_string_lossy().into_owned()];
    parts.extend(command.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run a prepared command to completion, mapping a non-zero exit to
/// [`EnsemblError::ToolFailed`].
pub fn run_checked(command: &mut Command) -> Result<(), EnsemblError> {
    let description = describe(command);
    debug!("Running {}", description);
    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(EnsemblError::ToolFailed {
            command: description,
            status: status.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_program_and_args() {
        let mut command = Command::new("mysqlimport");
        command.args(["-h", "localhost", "-L", "gene.txt"]);
        assert_eq!(describe(&command), "mysqlimport -h localhost -L gene.txt");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let err = run_checked(&mut Command::new("false")).unwrap_err();
        assert!(matches!(err, EnsemblError::ToolFailed { ref command, .. } if command == "false"));
        run_checked(&mut Command::new("true")).unwrap();
    }
}
