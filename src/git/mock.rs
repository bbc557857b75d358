use crate::error::{GbrowseError, Result};
use crate::git::GitClient;

/// Mock git client for testing without a repository
///
/// Unset answers fail like a git invocation would.
#[derive(Debug, Clone, Default)]
pub struct MockGit {
    pub default_branch: Option<String>,
    pub remote_origin_url: Option<String>,
    pub head_object_name: Option<String>,
    pub show_prefix: Option<String>,
    pub relative_path: Option<String>,
    pub describe_tag: Option<String>,
    pub show_current: Option<String>,
    pub commit_hash: Option<String>,
}

impl MockGit {
    /// Create a new mock where every query fails
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_branch(mut self, value: impl Into<String>) -> Self {
        self.default_branch = Some(value.into());
        self
    }

    pub fn with_remote_origin_url(mut self, value: impl Into<String>) -> Self {
        self.remote_origin_url = Some(value.into());
        self
    }

    pub fn with_head_object_name(mut self, value: impl Into<String>) -> Self {
        self.head_object_name = Some(value.into());
        self
    }

    pub fn with_show_prefix(mut self, value: impl Into<String>) -> Self {
        self.show_prefix = Some(value.into());
        self
    }

    pub fn with_relative_path(mut self, value: impl Into<String>) -> Self {
        self.relative_path = Some(value.into());
        self
    }

    pub fn with_describe_tag(mut self, value: impl Into<String>) -> Self {
        self.describe_tag = Some(value.into());
        self
    }

    pub fn with_show_current(mut self, value: impl Into<String>) -> Self {
        self.show_current = Some(value.into());
        self
    }

    pub fn with_commit_hash(mut self, value: impl Into<String>) -> Self {
        self.commit_hash = Some(value.into());
        self
    }
}

fn answer(value: &Option<String>, query: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| GbrowseError::execution(format!("mock git {}", query), "not configured"))
}

impl GitClient for MockGit {
    fn default_branch(&self) -> Result<String> {
        answer(&self.default_branch, "default_branch")
    }

    fn remote_origin_url(&self) -> Result<String> {
        answer(&self.remote_origin_url, "remote_origin_url")
    }

    fn head_object_name(&self) -> Result<String> {
        answer(&self.head_object_name, "head_object_name")
    }

    fn show_prefix(&self) -> Result<String> {
        answer(&self.show_prefix, "show_prefix")
    }

    fn relative_path(&self, _path: &str) -> Result<String> {
        answer(&self.relative_path, "relative_path")
    }

    fn describe_tag(&self) -> Result<String> {
        answer(&self.describe_tag, "describe_tag")
    }

    fn show_current(&self) -> Result<String> {
        answer(&self.show_current, "show_current")
    }

    fn commit_hash(&self) -> Result<String> {
        answer(&self.commit_hash, "commit_hash")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_git_answers() {
        let git = MockGit::new()
            .with_commit_hash("abc123")
            .with_show_prefix("pre/");

        assert_eq!(git.commit_hash().unwrap(), "abc123");
        assert_eq!(git.show_prefix().unwrap(), "pre/");
    }

    #[test]
    fn test_mock_git_unset_fails() {
        let git = MockGit::default();
        let err = git.describe_tag().unwrap_err();
        assert!(err.to_string().contains("describe_tag"));
    }
}
