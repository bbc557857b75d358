use tracing::debug;

use crate::domain::{Builtin, Phase};
use crate::error::{GbrowseError, PhaseErrors, PhaseFailure, Result};
use crate::git::GitClient;
use crate::phases::custom::CustomPhaseExecutor;
use crate::process::CancelToken;

/// Resolves a single phase into a ref
pub trait PhaseExecutor {
    fn execute(&self, phase: &Phase) -> Result<String>;
}

/// Runs builtins against git and everything else against the custom executor
pub struct GitPhaseExecutor<'a, G: GitClient + ?Sized, C: CustomPhaseExecutor + ?Sized> {
    git: &'a G,
    custom: &'a C,
}

impl<'a, G: GitClient + ?Sized, C: CustomPhaseExecutor + ?Sized> GitPhaseExecutor<'a, G, C> {
    pub fn new(git: &'a G, custom: &'a C) -> Self {
        GitPhaseExecutor { git, custom }
    }

    fn execute_builtin(&self, builtin: Builtin) -> Result<String> {
        match builtin {
            Builtin::Branch => {
                let name = self.git.head_object_name()?;
                if name == "HEAD" {
                    return Err(GbrowseError::GetBranch("got HEAD".to_string()));
                }
                Ok(name)
            }
            Builtin::DefaultBranch => self.git.default_branch(),
            Builtin::Tag => {
                // a failing query counts as detached
                if let Ok(current) = self.git.show_current() {
                    if !current.is_empty() {
                        return Err(GbrowseError::GetTag(
                            "not in detached HEAD state".to_string(),
                        ));
                    }
                }
                self.git.describe_tag()
            }
            Builtin::Commit => self.git.commit_hash(),
        }
    }
}

impl<G: GitClient + ?Sized, C: CustomPhaseExecutor + ?Sized> PhaseExecutor
    for GitPhaseExecutor<'_, G, C>
{
    fn execute(&self, phase: &Phase) -> Result<String> {
        match phase.builtin() {
            Some(builtin) => self.execute_builtin(builtin),
            None => self.custom.execute(phase.as_str()),
        }
    }
}

/// `phases` followed by the mandatory `commit` fallback
pub fn with_commit_fallback(phases: &[Phase]) -> Vec<Phase> {
    let mut actual = phases.to_vec();
    actual.push(Builtin::Commit.into());
    actual
}

/// Tries phases in order until one yields a ref
pub struct PhaseResolver<'a, E: PhaseExecutor + ?Sized> {
    executor: &'a E,
    cancel: CancelToken,
}

impl<'a, E: PhaseExecutor + ?Sized> PhaseResolver<'a, E> {
    pub fn new(executor: &'a E, cancel: CancelToken) -> Self {
        PhaseResolver { executor, cancel }
    }

    /// Resolve the ref to embed in the url.
    ///
    /// `commit` is always tried last. The first success wins; if every phase
    /// fails the error lists each failure with its index and name. An
    /// interruption stops the loop at once.
    pub fn resolve(&self, phases: &[Phase]) -> Result<String> {
        let mut failures = Vec::new();

        for (index, phase) in with_commit_fallback(phases).into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(GbrowseError::Cancelled);
            }

            debug!(index, phase = %phase, "phase");
            match self.executor.execute(&phase) {
                Ok(resolved) => return Ok(resolved),
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    debug!(index, phase = %phase, error = %e, "phase failed");
                    failures.push(PhaseFailure {
                        index,
                        phase,
                        source: Box::new(e),
                    });
                }
            }
        }

        Err(GbrowseError::Phases(PhaseErrors(failures)))
    }
}
