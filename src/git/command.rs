use regex::Regex;

use crate::error::{GbrowseError, Result};
use crate::git::GitClient;
use crate::process::CommandRunner;

/// Default git executable
pub const DEFAULT_GIT: &str = "git";

/// [GitClient] backed by a git executable
pub struct GitCommand {
    program: String,
    runner: CommandRunner,
}

impl GitCommand {
    /// Create a client that runs `program` (e.g. "git" or a mock binary)
    pub fn new(program: impl Into<String>, runner: CommandRunner) -> Self {
        GitCommand {
            program: program.into(),
            runner,
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        self.runner.run(&self.program, args)
    }
}

impl GitClient for GitCommand {
    fn default_branch(&self) -> Result<String> {
        let report = self.run(&["remote", "show", "origin"])?;
        parse_default_branch(&report)
    }

    fn remote_origin_url(&self) -> Result<String> {
        self.run(&["config", "--get", "remote.origin.url"])
    }

    fn head_object_name(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "@"])
    }

    fn show_prefix(&self) -> Result<String> {
        self.run(&["rev-parse", "--show-prefix"])
    }

    fn relative_path(&self, path: &str) -> Result<String> {
        self.run(&["ls-files", "--full-name", path])
    }

    fn describe_tag(&self) -> Result<String> {
        self.run(&["describe", "--tags", "--abbrev=0"])
    }

    fn show_current(&self) -> Result<String> {
        self.run(&["branch", "--show-current"])
    }

    fn commit_hash(&self) -> Result<String> {
        self.run(&["rev-parse", "@"])
    }
}

/// Extract the branch from the `HEAD branch: <name>` line of `git remote show`
pub fn parse_default_branch(report: &str) -> Result<String> {
    let re = Regex::new(r"HEAD branch:([^:\n]*)")
        .map_err(|e| GbrowseError::git(format!("invalid pattern: {}", e)))?;

    let branch = re
        .captures_iter(report)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().replace(' ', "").trim().to_string())
        .find(|branch| !branch.is_empty());

    branch.ok_or_else(|| GbrowseError::git(format!("cannot find default branch from {}", report)))
}
