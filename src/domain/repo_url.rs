/// Literal rewrites applied in order; later ones consume the output of earlier ones.
const REPLACEMENTS: [(&str, &str); 6] = [
    (":", "/"),
    ("git@", "https///"),
    ("git///", "https///"),
    (".git", ""),
    ("https///", "https://"),
    ("ssh///https:", "https:"),
];

/// Convert a git remote url into the https url of the repository web page.
///
/// Handles the scp-like form (`git@host:owner/repo.git`), `git://`, `ssh://git@`
/// and `https://` remotes. Anything else is rewritten on a best-effort basis.
pub fn normalize(remote_url: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(remote_url.to_string(), |value, (from, to)| {
            value.replace(from, to)
        })
}
