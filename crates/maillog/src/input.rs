use std::path::Path;

use anyhow::Result;

/// Reject a log path that does not exist or is not a regular file.
pub fn check_log_path(path: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            anyhow::bail!("specified log file does not exist: {}", path.display())
        }
        Err(e) => anyhow::bail!("can't open log file {}: {}", path.display(), e),
    };

    if metadata.is_dir() {
        anyhow::bail!("specified log path is not a file: {}", path.display());
    }

    Ok(())
}
