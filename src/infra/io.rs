use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};
use similar::TextDiff;

/// Result of writing a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Result of comparing a generated file against what is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    Missing,
    /// Unified diff from the file on disk to the fresh output
    Stale { diff: String },
}

/// Read `path`, treating a missing file as `None`.
fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Write `contents` to `path` unless the file already holds exactly those
/// bytes. Parent directories are created as needed.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome> {
    if read_existing(path)?.as_deref() == Some(contents) {
        return Ok(WriteOutcome::Unchanged);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    write_atomic(path, contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(WriteOutcome::Written)
}

/// Compare the fresh output against the file on disk without touching it.
pub fn check_up_to_date(path: &Path, contents: &str) -> Result<CheckOutcome> {
    let Some(existing) = read_existing(path)? else {
        return Ok(CheckOutcome::Missing);
    };

    if existing == contents {
        return Ok(CheckOutcome::UpToDate);
    }

    let label = path.display().to_string();
    let diff = TextDiff::from_lines(existing.as_str(), contents)
        .unified_diff()
        .context_radius(3)
        .header(&label, &format!("{label} (generated)"))
        .to_string();

    Ok(CheckOutcome::Stale { diff })
}

/// Atomic write: same-directory tempfile, then rename over the target.
/// The target keeps its permissions; a new file gets `0o644` on Unix.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    #[cfg(unix)]
    let perms = fs::metadata(path)
        .map(|m| m.permissions())
        .unwrap_or_else(|_| std::os::unix::fs::PermissionsExt::from_mode(0o644));
    #[cfg(not(unix))]
    let perms = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    fs::set_permissions(tmp.path(), perms).context("Failed to set output permissions")?;
    #[cfg(not(unix))]
    if let Some(perms) = perms {
        fs::set_permissions(tmp.path(), perms).context("Failed to set output permissions")?;
    }

    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
