use std::fs;
use std::path::Path;

/// Writes `contents` to `path` via a temporary file in the same directory,
/// then renames it into place, so a crash mid-write never leaves a
/// truncated state file behind.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> anyhow::Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
