//! Git metadata queries
//!
//! This module provides a trait-based abstraction over the read-only git
//! queries gbrowse needs, allowing the ref resolution and url assembly to run
//! against a real git executable or against an in-memory mock.
//!
//! # Overview
//!
//! - [command::GitCommand]: runs the configured git executable
//! - [mock::MockGit]: canned answers for tests
//!
//! Every query returns the trimmed standard output of the corresponding git
//! invocation. Failures carry the command line and the raw stderr.

pub mod command;
pub mod mock;

pub use command::GitCommand;
pub use mock::MockGit;

use crate::error::Result;

/// Read-only git metadata queries
///
/// ## Implementations
///
/// - [GitCommand](command::GitCommand): spawns `git` (or `GBROWSE_GIT`)
/// - [MockGit](mock::MockGit): test double
pub trait GitClient: Send + Sync {
    /// Default branch of `origin`, parsed from `git remote show origin`
    fn default_branch(&self) -> Result<String>;

    /// Url of `origin` as configured, e.g. `git@github.com:o/r.git`
    fn remote_origin_url(&self) -> Result<String>;

    /// Abbreviated name of the current ref; `HEAD` when detached
    fn head_object_name(&self) -> Result<String>;

    /// Path of the working directory relative to the repository root
    ///
    /// Empty at the root, otherwise ends with `/`.
    fn show_prefix(&self) -> Result<String>;

    /// Repository-relative name of `path`
    fn relative_path(&self, path: &str) -> Result<String>;

    /// Nearest reachable tag
    fn describe_tag(&self) -> Result<String>;

    /// Current branch name; empty when detached
    fn show_current(&self) -> Result<String>;

    /// Full hash of the current commit
    fn commit_hash(&self) -> Result<String>;
}
