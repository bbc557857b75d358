pub mod browse;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod phases;
pub mod process;
pub mod url;

pub use error::{GbrowseError, Result};
