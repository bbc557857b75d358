//! Command-line surface

pub mod orchestration;

use std::ffi::OsString;

pub use orchestration::{run_browse, BrowseArgs, BrowseResult};

/// Flags that are also accepted with a single dash, e.g. `-print`
const SINGLE_DASH_FLAGS: [&str; 3] = ["print", "config", "phase"];

/// Rewrite `-print`, `-config x`, `-phase=a,b` into their `--` forms.
///
/// Everything after a bare `--` is left alone.
pub fn normalize_flag_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            let rewritten = arg.to_str().and_then(|text| rewrite(text, &mut passthrough));
            rewritten.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

fn rewrite(text: &str, passthrough: &mut bool) -> Option<String> {
    if *passthrough {
        return None;
    }
    if text == "--" {
        *passthrough = true;
        return None;
    }
    match text.strip_prefix('-') {
        Some(rest) if !rest.starts_with('-') && is_single_dash_flag(rest) => {
            Some(format!("-{}", text))
        }
        _ => None,
    }
}

fn is_single_dash_flag(rest: &str) -> bool {
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    SINGLE_DASH_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_flag_args(args.iter().map(OsString::from))
            .into_iter()
            .map(|arg| arg.into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_single_dash_flags() {
        assert_eq!(
            normalize(&["gbrowse", "-print", "-phase", "tag", "-config={}", "file:3"]),
            vec!["gbrowse", "--print", "--phase", "tag", "--config={}", "file:3"]
        );
    }

    #[test]
    fn test_other_args_untouched() {
        assert_eq!(
            normalize(&["gbrowse", "-p", "--print", "-h", "-printer"]),
            vec!["gbrowse", "-p", "--print", "-h", "-printer"]
        );
    }

    #[test]
    fn test_after_double_dash() {
        assert_eq!(
            normalize(&["gbrowse", "--", "-print"]),
            vec!["gbrowse", "--", "-print"]
        );
    }
}
