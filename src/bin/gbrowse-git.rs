//! gbrowse-git -- mock git command for exercising gbrowse without a repository
//!
//! Answers the git invocations gbrowse makes from the JSON object in
//! `GBROWSE_GIT_CONFIG`, e.g. `{"commit_hash": "abc123", "show_prefix": "pre/"}`.

use std::process::ExitCode;

use serde::Deserialize;

const ENV_MOCK_CONFIG: &str = "GBROWSE_GIT_CONFIG";

const USAGE: &str = "gbrowse-git -- Mock git command for gbrowse

Usage:
  gbrowse-git [args]

Environment variables:
  GBROWSE_GIT_CONFIG
    mock values as JSON";

#[derive(Debug, Default, Deserialize)]
struct MockConfig {
    default_branch: Option<String>,
    remote_origin_url: Option<String>,
    head_object_name: Option<String>,
    show_prefix: Option<String>,
    relative_path: Option<String>,
    describe_tag: Option<String>,
    show_current: Option<String>,
    commit_hash: Option<String>,
}

const REMOTE_SHOW: &[&str] = &["remote", "show", "origin"];
const REMOTE_URL: &[&str] = &["config", "--get", "remote.origin.url"];
const HEAD_NAME: &[&str] = &["rev-parse", "--abbrev-ref", "@"];
const SHOW_PREFIX: &[&str] = &["rev-parse", "--show-prefix"];
const LS_FILES: &[&str] = &["ls-files", "--full-name"];
const DESCRIBE: &[&str] = &["describe", "--tags", "--abbrev=0"];
const SHOW_CURRENT: &[&str] = &["branch", "--show-current"];
const COMMIT: &[&str] = &["rev-parse", "@"];

impl MockConfig {
    /// Argument prefixes and their answers, first match wins
    fn mappings(&self) -> Vec<(&'static [&'static str], Option<String>)> {
        vec![
            (
                REMOTE_SHOW,
                self.default_branch
                    .as_ref()
                    .map(|branch| format!("HEAD branch: {}", branch)),
            ),
            (REMOTE_URL, self.remote_origin_url.clone()),
            (HEAD_NAME, self.head_object_name.clone()),
            (SHOW_PREFIX, self.show_prefix.clone()),
            (LS_FILES, self.relative_path.clone()),
            (DESCRIBE, self.describe_tag.clone()),
            (SHOW_CURRENT, self.show_current.clone()),
            (COMMIT, self.commit_hash.clone()),
        ]
    }
}

fn has_prefix(args: &[String], prefix: &[&str]) -> bool {
    args.len() >= prefix.len() && args.iter().zip(prefix).all(|(arg, p)| arg.as_str() == *p)
}

fn main() -> ExitCode {
    let raw = std::env::var(ENV_MOCK_CONFIG).unwrap_or_else(|_| "{}".to_string());
    let config: MockConfig = match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid {}: {}", ENV_MOCK_CONFIG, e);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let found = config
        .mappings()
        .into_iter()
        .find(|(prefix, _)| has_prefix(&args, prefix));

    match found {
        Some((_, Some(value))) => {
            print!("{}", value);
            ExitCode::SUCCESS
        }
        Some((prefix, None)) => {
            eprintln!("not configured: {}", prefix.join(" "));
            ExitCode::FAILURE
        }
        None => {
            eprintln!("not found, config={}, args={:?}", raw, args);
            eprintln!("{}", USAGE);
            ExitCode::FAILURE
        }
    }
}
