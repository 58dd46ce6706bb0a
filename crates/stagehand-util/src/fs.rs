use std::path::{Path, PathBuf};

/// Name of the publish manifest file marking a project root.
pub const MANIFEST_FILENAME: &str = "Publish.toml";

/// Walk up from `start` looking for a directory containing `Publish.toml`.
/// Returns the project root, or `None` if no manifest is found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(MANIFEST_FILENAME).is_file() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// Ensure a directory exists, creating it and any parents if needed.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
