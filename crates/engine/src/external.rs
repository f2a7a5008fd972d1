//! External boundary steps
//!
//! The dependency installer and generator runner are opaque black boxes to
//! the orchestrator: it blocks until each completes, and success or failure
//! is binary. [`CommandStep`] runs a configured command line in the project
//! root, surfacing the tool's output verbatim on failure.

use crate::error::{Error, Result};
use ashiba_core::path::AbsPath;

/// An opaque, blocking external step
pub trait ExternalStep {
    /// Name of the step for logging and error messages
    fn name(&self) -> &str;

    /// Run the step to completion inside the project root
    fn run(&self, project_root: &AbsPath) -> Result<()>;
}

/// External step that executes a command line
///
/// The command is parsed with shell-words (no shell is involved, so there is
/// no injection surface) and executed via duct with stderr folded into
/// stdout, which is captured and surfaced verbatim when the tool fails.
#[derive(Debug, Clone)]
pub struct CommandStep {
    name: String,
    command: String,
}

impl CommandStep {
    /// Create a step that runs `command` in the project root
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }

    /// The configured command line
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl ExternalStep for CommandStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(&self, project_root: &AbsPath) -> Result<()> {
        let parts = shell_words::split(&self.command).map_err(|e| Error::ExternalStep {
            step: self.name.clone(),
            message: format!("failed to parse command '{}': {e}", self.command),
        })?;

        let (program, args) = parts.split_first().ok_or_else(|| Error::ExternalStep {
            step: self.name.clone(),
            message: "empty command".to_string(),
        })?;

        which::which(program).map_err(|_| Error::ExternalStep {
            step: self.name.clone(),
            message: format!("command not found: {program}"),
        })?;

        tracing::debug!(step = %self.name, program, ?args, "Executing external step");

        let output = duct::cmd(program, args)
            .dir(project_root.as_path())
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|e| Error::ExternalStep {
                step: self.name.clone(),
                message: format!("failed to start '{program}': {e}"),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::ExternalStep {
                step: self.name.clone(),
                message: String::from_utf8_lossy(&output.stdout).into_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn successful_command_returns_ok() {
        let temp = TempDir::new().unwrap();
        let root = AbsPath::from_path(temp.path()).unwrap();
        let step = CommandStep::new("touch", "touch marker.txt");

        step.run(&root).unwrap();
        assert!(temp.path().join("marker.txt").exists());
    }

    #[test]
    fn failing_command_surfaces_diagnostics() {
        let temp = TempDir::new().unwrap();
        let root = AbsPath::from_path(temp.path()).unwrap();
        let step = CommandStep::new("install", "sh -c 'echo dependency conflict >&2; exit 1'");

        let err = step.run(&root).unwrap_err();
        match err {
            Error::ExternalStep { step, message } => {
                assert_eq!(step, "install");
                assert!(message.contains("dependency conflict"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_is_reported() {
        let temp = TempDir::new().unwrap();
        let root = AbsPath::from_path(temp.path()).unwrap();
        let step = CommandStep::new("install", "definitely-not-a-real-binary-ashiba");

        let err = step.run(&root).unwrap_err();
        assert!(matches!(err, Error::ExternalStep { .. }));
    }

    #[test]
    fn empty_command_is_rejected() {
        let temp = TempDir::new().unwrap();
        let root = AbsPath::from_path(temp.path()).unwrap();
        let step = CommandStep::new("install", "");

        assert!(step.run(&root).is_err());
    }
}
