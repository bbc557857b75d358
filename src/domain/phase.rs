use std::fmt;

use serde::{Deserialize, Serialize};

/// Ref-resolution strategies understood without configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Branch,
    DefaultBranch,
    Tag,
    Commit,
}

impl Builtin {
    /// Get the phase name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Branch => "branch",
            Builtin::DefaultBranch => "default_branch",
            Builtin::Tag => "tag",
            Builtin::Commit => "commit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "branch" => Some(Builtin::Branch),
            "default_branch" => Some(Builtin::DefaultBranch),
            "tag" => Some(Builtin::Tag),
            "commit" => Some(Builtin::Commit),
            _ => None,
        }
    }
}

/// A named strategy for obtaining a ref.
///
/// Either one of the [Builtin] names or the id of a custom definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phase(String);

impl Phase {
    pub fn new(name: impl Into<String>) -> Self {
        Phase(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `None` means the phase must be looked up among custom definitions
    pub fn builtin(&self) -> Option<Builtin> {
        Builtin::from_name(&self.0)
    }
}

impl From<Builtin> for Phase {
    fn from(builtin: Builtin) -> Self {
        Phase::new(builtin.name())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a comma-separated phase list such as `branch,tag`
pub fn parse_phase_list(value: &str) -> Vec<Phase> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Phase::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_round_trip() {
        for builtin in [
            Builtin::Branch,
            Builtin::DefaultBranch,
            Builtin::Tag,
            Builtin::Commit,
        ] {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
    }

    #[test]
    fn test_custom_phase_is_not_builtin() {
        assert_eq!(Phase::new("echo-master").builtin(), None);
        assert_eq!(Phase::new("Branch").builtin(), None);
    }

    #[test]
    fn test_phase_from_builtin() {
        assert_eq!(Phase::from(Builtin::DefaultBranch).as_str(), "default_branch");
    }

    #[test]
    fn test_parse_phase_list() {
        assert_eq!(
            parse_phase_list("branch, tag ,,custom"),
            vec![Phase::new("branch"), Phase::new("tag"), Phase::new("custom")]
        );
        assert!(parse_phase_list("").is_empty());
    }

    #[test]
    fn test_phase_deserializes_from_plain_string() {
        let phases: Vec<Phase> = serde_json::from_str(r#"["tag","x"]"#).unwrap();
        assert_eq!(phases, vec![Phase::new("tag"), Phase::new("x")]);
    }
}
