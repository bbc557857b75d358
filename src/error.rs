use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

use crate::domain::Phase;

/// Unified error type for gbrowse operations
#[derive(Error, Debug)]
pub enum GbrowseError {
    #[error("invalid target {target}: line number is not an integer")]
    InvalidLineNumber {
        target: String,
        #[source]
        source: ParseIntError,
    },

    #[error("GetBranch: {0}")]
    GetBranch(String),

    #[error("GetTag: {0}")]
    GetTag(String),

    #[error("DefinitionNotFound: {0}")]
    DefinitionNotFound(String),

    #[error("failed to run {command}: {detail}")]
    Execution { command: String, detail: String },

    #[error("Git output error: {0}")]
    Git(String),

    #[error("interrupted")]
    Cancelled,

    #[error("{0}")]
    Phases(PhaseErrors),

    #[error("failed to build url: {0}")]
    Build(Box<GbrowseError>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to browse: {0}")]
    Browse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gbrowse
pub type Result<T> = std::result::Result<T, GbrowseError>;

impl GbrowseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GbrowseError::Config(msg.into())
    }

    /// Create an execution error for a command line
    pub fn execution(command: impl Into<String>, detail: impl Into<String>) -> Self {
        GbrowseError::Execution {
            command: command.into(),
            detail: detail.into(),
        }
    }

    /// Create an error for unexpected git output
    pub fn git(msg: impl Into<String>) -> Self {
        GbrowseError::Git(msg.into())
    }

    /// Create a browser launch error
    pub fn browse(msg: impl Into<String>) -> Self {
        GbrowseError::Browse(msg.into())
    }

    /// Wrap a failure that happened while assembling the url
    pub fn build(source: GbrowseError) -> Self {
        GbrowseError::Build(Box::new(source))
    }

    /// True if this error, or the error it wraps, is an interruption
    pub fn is_cancelled(&self) -> bool {
        match self {
            GbrowseError::Cancelled => true,
            GbrowseError::Build(inner) => inner.is_cancelled(),
            _ => false,
        }
    }
}

/// A single failed phase attempt
#[derive(Debug)]
pub struct PhaseFailure {
    pub index: usize,
    pub phase: Phase,
    pub source: Box<GbrowseError>,
}

impl fmt::Display for PhaseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase[{}] {}: {}", self.index, self.phase, self.source)
    }
}

/// Every failure of a resolution run, in attempt order
#[derive(Debug, Default)]
pub struct PhaseErrors(pub Vec<PhaseFailure>);

impl PhaseErrors {
    pub fn failures(&self) -> &[PhaseFailure] {
        &self.0
    }
}

impl fmt::Display for PhaseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no phase was attempted");
        }
        let lines: Vec<String> = self.0.iter().map(|failure| failure.to_string()).collect();
        write!(f, "{}", lines.join("\n"))
    }
}
