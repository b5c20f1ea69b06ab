//! Dictionary file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::types::error::Result;

/// File extensions recognized as Mobipocket dictionaries.
pub const DICTIONARY_EXTENSIONS: &[&str] = &["azw", "mobi"];

/// The conventional dictionary folder, `~/Dictionaries`.
pub fn default_dictionary_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Dictionaries"))
}

/// Lists dictionary files directly inside `dir`, sorted by file name.
///
/// Extensions match case-insensitively. Subdirectories are not searched.
pub fn discover(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut found = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if is_dictionary_file(&path) {
            found.push(path);
        } else {
            debug!("Skipping non-dictionary file {}", path.display());
        }
    }

    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    info!("Found {} dictionaries in {}", found.len(), dir.display());
    Ok(found)
}

pub fn is_dictionary_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            DICTIONARY_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
