use tracing::debug;

use crate::error::{GbrowseError, Result};

/// Open `url` in the default browser without waiting for it
pub fn open_url(url: &str) -> Result<()> {
    debug!(url, "open");
    open::that_detached(url).map_err(|e| GbrowseError::browse(format!("{}: {}", url, e)))
}
