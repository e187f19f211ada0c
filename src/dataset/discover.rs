use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::DatasetSettings;

fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim().trim_start_matches('.').to_ascii_lowercase();
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.to_ascii_lowercase() == wanted)
        .unwrap_or(false)
}

/// List candidate dataset files under `data_dir`, sorted by path.
///
/// Used to tell the user what is actually on disk when the configured
/// tracks file cannot be loaded.
pub fn discover(data_dir: &Path, settings: &DatasetSettings) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(data_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && has_extension(path, &settings.extension) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files
}
