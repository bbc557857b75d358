//! Ref resolution
//!
//! A phase list is tried in order, with `commit` appended as the last resort:
//! - builtins (`branch`, `default_branch`, `tag`, `commit`) query git
//! - any other name runs the matching command from the configuration

pub mod custom;
pub mod resolver;

pub use custom::{CustomPhaseExecutor, DefinitionExecutor};
pub use resolver::{with_commit_fallback, GitPhaseExecutor, PhaseExecutor, PhaseResolver};
