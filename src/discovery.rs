//! Finding map files to lint.
//!
//! Paths named on the command line are taken as-is; directories are walked
//! recursively for `.dmm` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{MapError, Result};

/// Extension of map files picked up from directories.
pub const MAP_EXTENSION: &str = "dmm";

/// Expand `paths` into the map files to lint.
///
/// Files are kept in argument order. Each directory contributes its `.dmm`
/// files in sorted order. A path that does not exist is an error.
pub fn collect_map_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(scan_directory(path));
        } else if path.exists() {
            files.push(path.clone());
        } else {
            return Err(MapError::Io {
                path: path.clone(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    Ok(files)
}

/// All `.dmm` files under `root`, sorted.
pub fn scan_directory(root: &Path) -> Vec<PathBuf> {
    let mut maps: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_map_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    maps.sort();
    maps
}

pub fn is_map_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MAP_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_map_file() {
        assert!(is_map_file(Path::new("maps/station.dmm")));
        assert!(is_map_file(Path::new("OLD.DMM")));
        assert!(!is_map_file(Path::new("station.dmm.bak")));
        assert!(!is_map_file(Path::new("tgmlint.yaml")));
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("away/ruins")).unwrap();
        fs::write(dir.path().join("station.dmm"), "").unwrap();
        fs::write(dir.path().join("away/ruins/ruin.dmm"), "").unwrap();
        fs::write(dir.path().join("away/notes.txt"), "").unwrap();
        fs::write(dir.path().join("away/beach.dmm"), "").unwrap();

        let found = scan_directory(dir.path());
        assert_eq!(
            found,
            vec![
                dir.path().join("away/beach.dmm"),
                dir.path().join("away/ruins/ruin.dmm"),
                dir.path().join("station.dmm"),
            ]
        );
    }

    #[test]
    fn test_collect_keeps_explicit_files() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("odd.txt");
        fs::write(&odd, "").unwrap();
        fs::create_dir(dir.path().join("maps")).unwrap();
        fs::write(dir.path().join("maps/a.dmm"), "").unwrap();

        let found = collect_map_files(&[odd.clone(), dir.path().join("maps")]).unwrap();
        assert_eq!(found, vec![odd, dir.path().join("maps/a.dmm")]);
    }

    #[test]
    fn test_collect_missing_path() {
        let dir = tempdir().unwrap();
        let err = collect_map_files(&[dir.path().join("gone.dmm")]).unwrap_err();
        assert!(matches!(err, MapError::Io { .. }));
    }
}
