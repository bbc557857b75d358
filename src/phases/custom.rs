use std::collections::HashMap;

use tracing::debug;

use crate::config::Definition;
use crate::error::{GbrowseError, Result};
use crate::process::CommandRunner;

/// Resolves phases that are not builtins
pub trait CustomPhaseExecutor {
    /// Resolve the ref for the custom phase `id`
    fn execute(&self, id: &str) -> Result<String>;
}

/// Executes user definitions from the configuration
pub struct DefinitionExecutor {
    definitions: HashMap<String, Definition>,
    runner: CommandRunner,
}

impl DefinitionExecutor {
    /// Index `definitions` by id. A later definition replaces an earlier one with the same id.
    pub fn new(definitions: &[Definition], runner: CommandRunner) -> Self {
        let definitions = definitions
            .iter()
            .map(|def| (def.id.clone(), def.clone()))
            .collect();
        DefinitionExecutor {
            definitions,
            runner,
        }
    }
}

impl CustomPhaseExecutor for DefinitionExecutor {
    /// Run the command registered for `id` and return its trimmed output
    ///
    /// # Returns
    /// * `Ok(String)` - stdout of the command
    /// * `Err(DefinitionNotFound)` - no definition has this id
    /// * `Err(Execution)` - empty command, spawn failure or non-zero exit
    fn execute(&self, id: &str) -> Result<String> {
        let def = self
            .definitions
            .get(id)
            .ok_or_else(|| GbrowseError::DefinitionNotFound(id.to_string()))?;

        let (program, args) = def.command.split_first().ok_or_else(|| {
            GbrowseError::execution(format!("definition {}", id), "empty command")
        })?;

        debug!(id, command = ?def.command, "custom phase");
        self.runner.run(program, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str, command: &[&str]) -> Definition {
        Definition {
            id: id.to_string(),
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_not_found() {
        let executor = DefinitionExecutor::new(&[], CommandRunner::default());
        let err = executor.execute("missing").unwrap_err();
        assert!(matches!(err, GbrowseError::DefinitionNotFound(ref id) if id == "missing"));
    }

    #[cfg(unix)]
    #[test]
    fn test_found() {
        let executor = DefinitionExecutor::new(
            &[def("echo-master", &["echo", "master"])],
            CommandRunner::default(),
        );
        assert_eq!(executor.execute("echo-master").unwrap(), "master");
    }

    #[cfg(unix)]
    #[test]
    fn test_last_definition_wins() {
        let executor = DefinitionExecutor::new(
            &[def("ref", &["echo", "first"]), def("ref", &["echo", "second"])],
            CommandRunner::default(),
        );
        assert_eq!(executor.execute("ref").unwrap(), "second");
    }

    #[test]
    fn test_empty_command() {
        let executor = DefinitionExecutor::new(&[def("blank", &[])], CommandRunner::default());
        let err = executor.execute("blank").unwrap_err();
        assert!(matches!(err, GbrowseError::Execution { .. }));
        assert!(err.to_string().contains("definition blank"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_surfaces_stderr() {
        let executor = DefinitionExecutor::new(
            &[def("bad", &["sh", "-c", "echo nope >&2; exit 1"])],
            CommandRunner::default(),
        );
        let err = executor.execute("bad").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
