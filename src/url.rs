//! Assembly of the browsable url

use std::fs;

use tracing::debug;

use crate::domain::{repo_url, Phase, Target};
use crate::error::{GbrowseError, Result};
use crate::git::GitClient;
use crate::phases::{PhaseExecutor, PhaseResolver};

/// Build `<repo>/blob/<ref>/<path>[#L<linum>]` for `target`.
///
/// Directories (and the empty target) are located with the show-prefix of the
/// working directory; anything else, including paths missing from disk, is
/// looked up with git. Segments are not url-encoded.
pub fn build<G, E>(
    git: &G,
    target: &Target,
    resolver: &PhaseResolver<'_, E>,
    phases: &[Phase],
) -> Result<String>
where
    G: GitClient + ?Sized,
    E: PhaseExecutor + ?Sized,
{
    assemble(git, target, resolver, phases).map_err(GbrowseError::build)
}

fn assemble<G, E>(
    git: &G,
    target: &Target,
    resolver: &PhaseResolver<'_, E>,
    phases: &[Phase],
) -> Result<String>
where
    G: GitClient + ?Sized,
    E: PhaseExecutor + ?Sized,
{
    let repo_url = repo_url::normalize(&git.remote_origin_url()?);
    let reference = resolver.resolve(phases)?;

    let path = if target.path().is_empty() || is_directory(target.path()) {
        join_path(&git.show_prefix()?, target.path())
    } else {
        git.relative_path(target.path())?
    };

    let fragment = target
        .linum()
        .map(|linum| format!("#L{}", linum))
        .unwrap_or_default();

    debug!(repo_url = %repo_url, reference = %reference, path = %path, "url parts");
    Ok(format!("{}/blob/{}/{}{}", repo_url, reference, path, fragment))
}

/// A failing stat counts as "not a directory"
fn is_directory(path: &str) -> bool {
    fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
}

/// Join two slash-separated paths, dropping empty and `.` segments and
/// collapsing `..`
pub fn join_path(prefix: &str, path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in prefix.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), None | Some(&"..")) {
                    segments.push("..");
                } else {
                    segments.pop();
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
