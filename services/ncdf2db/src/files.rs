//! Input file discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// List the WRF output files directly under `basedir` whose name
/// starts with `prefix`, sorted by name. Model output is stamped
/// `prefix_YYYY-MM-DD_HH:MM:SS`, so name order is time order.
pub fn list_input_files(basedir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(basedir).min_depth(1).max_depth(1) {
        let entry =
            entry.with_context(|| format!("reading base folder {}", basedir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(prefix))
        {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}
