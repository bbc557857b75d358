use std::fmt;
use std::str::FromStr;

use crate::error::{GbrowseError, Result};

/// What to open: a path inside the repository and an optional line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Target {
    path: String,
    linum: Option<u64>,
}

impl Target {
    /// Create a target; a line number of zero means "no line"
    pub fn new(path: impl Into<String>, linum: Option<u64>) -> Self {
        Target {
            path: path.into(),
            linum: linum.filter(|n| *n > 0),
        }
    }

    /// Create a target without line number
    pub fn path_only(path: impl Into<String>) -> Self {
        Target::new(path, None)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn linum(&self) -> Option<u64> {
        self.linum
    }

    /// Parse `PATH` or `PATH:LINUM`.
    ///
    /// Only the first `:` separates; everything after it must be an integer.
    /// Integers below 1 are accepted but produce a target without line.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once(':') {
            Some((path, linum)) => {
                let n: i64 = linum
                    .parse()
                    .map_err(|source| GbrowseError::InvalidLineNumber {
                        target: raw.to_string(),
                        source,
                    })?;
                Ok(Target::new(path, u64::try_from(n).ok()))
            }
            None => Ok(Target::path_only(raw)),
        }
    }
}

impl FromStr for Target {
    type Err = GbrowseError;

    fn from_str(s: &str) -> Result<Self> {
        Target::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.linum {
            Some(linum) => write!(f, "{}:{}", self.path, linum),
            None => write!(f, "{}", self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path() {
        let target = Target::parse("src/main.rs").unwrap();
        assert_eq!(target.path(), "src/main.rs");
        assert_eq!(target.linum(), None);
    }

    #[test]
    fn test_parse_path_with_line() {
        let target = Target::parse("dir/file:10").unwrap();
        assert_eq!(target, Target::new("dir/file", Some(10)));
    }

    #[test]
    fn test_parse_empty_is_root() {
        let target = Target::parse("").unwrap();
        assert_eq!(target.path(), "");
        assert_eq!(target.linum(), None);
    }

    #[test]
    fn test_parse_rejects_non_integer_line() {
        let err = Target::parse("file:abc").unwrap_err();
        assert!(matches!(err, GbrowseError::InvalidLineNumber { .. }));
        assert!(err.to_string().contains("file:abc"));
    }

    #[test]
    fn test_parse_rejects_empty_line() {
        assert!(Target::parse("file:").is_err());
    }

    #[test]
    fn test_only_first_colon_separates() {
        // "b:3" is not an integer, so the whole thing is rejected
        assert!(Target::parse("a:b:3").is_err());
    }

    #[test]
    fn test_non_positive_line_is_absent() {
        assert_eq!(Target::parse("file:0").unwrap().linum(), None);
        assert_eq!(Target::parse("file:-4").unwrap().linum(), None);
        assert_eq!(Target::parse("file:0").unwrap().path(), "file");
    }

    #[test]
    fn test_display() {
        assert_eq!(Target::new("a/b", Some(3)).to_string(), "a/b:3");
        assert_eq!(Target::path_only("a/b").to_string(), "a/b");
    }

    #[test]
    fn test_from_str() {
        let target: Target = "lib.rs:7".parse().unwrap();
        assert_eq!(target.linum(), Some(7));
    }
}
