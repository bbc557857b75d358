//! Per-invocation workflow
//!
//! Wires configuration, git, the phase resolver and the browser together.
//! Kept separate from the clap parser so it can be called programmatically.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::browse;
use crate::config::{self, ConfigSources, EnvConfig};
use crate::domain::{parse_phase_list, Phase, Target};
use crate::git::GitCommand;
use crate::phases::{DefinitionExecutor, GitPhaseExecutor, PhaseResolver};
use crate::process::{CancelToken, CommandRunner};
use crate::url;

/// Arguments for the browse workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowseArgs {
    /// `PATH` or `PATH:LINUM`; `None` opens the working directory
    pub target: Option<String>,

    /// Inline JSON or path, overrides `GBROWSE_CONFIG`
    pub config: Option<String>,

    /// Comma-separated phases, overrides the configured ones
    pub phase: Option<String>,

    /// Print the url instead of opening it
    pub print: bool,

    /// Lowest config layer, usually [config::default_config_path]
    pub default_config: Option<PathBuf>,
}

/// Result of a successful browse workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseResult {
    pub url: String,

    /// Whether the browser was launched
    pub opened: bool,
}

/// Main browse workflow
///
/// 1. Load layered configuration and apply `--phase`
/// 2. Parse the target
/// 3. Build the url
/// 4. Print it to `out`, or open it
pub fn run_browse<W: Write>(
    args: &BrowseArgs,
    env: &EnvConfig,
    cancel: &CancelToken,
    out: &mut W,
) -> Result<BrowseResult> {
    let sources = ConfigSources {
        default_file: args.default_config.clone(),
        env: env.config.clone(),
        flag: args.config.clone(),
    };
    let config = config::load_config(&sources).with_phases(phase_override(args.phase.as_deref()));
    debug!(phases = ?config.phases, "effective phases");

    let target = Target::parse(args.target.as_deref().unwrap_or("")).context("parse target")?;

    let runner = CommandRunner::new(cancel.clone());
    let git = GitCommand::new(env.git.as_str(), runner.clone());
    let custom = DefinitionExecutor::new(&config.definitions, runner);
    let executor = GitPhaseExecutor::new(&git, &custom);
    let resolver = PhaseResolver::new(&executor, cancel.clone());

    let url = url::build(&git, &target, &resolver, &config.phases).context("build url")?;

    if args.print {
        write!(out, "{}", url)?;
        out.flush()?;
        return Ok(BrowseResult { url, opened: false });
    }

    browse::open_url(&url).context("browse")?;
    Ok(BrowseResult { url, opened: true })
}

/// Phases from `--phase`; a flag naming no phase leaves the configured ones
fn phase_override(flag: Option<&str>) -> Option<Vec<Phase>> {
    flag.map(parse_phase_list).filter(|phases| !phases.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_override() {
        assert_eq!(
            phase_override(Some("branch, tag")),
            Some(vec![Phase::new("branch"), Phase::new("tag")])
        );
        assert_eq!(phase_override(None), None);
    }

    #[test]
    fn test_blank_phase_flag_is_unset() {
        assert_eq!(phase_override(Some("")), None);
        assert_eq!(phase_override(Some("  ")), None);
        assert_eq!(phase_override(Some(" , ,")), None);
    }
}
