//! Existence filtering for candidate path lists.

use std::fs;
use std::path::{Path, PathBuf};

/// True when `path` exists and the current process can read it.
pub fn exists_and_readable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => fs::read_dir(path).is_ok(),
        Ok(_) => fs::File::open(path).is_ok(),
        Err(_) => false,
    }
}

/// Drop candidates that do not exist, deduplicating while preserving
/// first-seen order.
pub fn filter_existing(candidates: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(candidates.len());
    for path in candidates {
        if out.contains(&path) || !exists_and_readable(&path) {
            continue;
        }
        out.push(path);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_paths_are_dropped() {
        let tmp = TempDir::new().unwrap();
        let present = tmp.path().join("present");
        fs::create_dir(&present).unwrap();

        let filtered = filter_existing(vec![
            tmp.path().join("absent"),
            present.clone(),
            tmp.path().join("also-absent"),
        ]);
        assert_eq!(filtered, [present]);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir(&a).unwrap();
        fs::create_dir(&b).unwrap();

        let filtered = filter_existing(vec![a.clone(), b.clone(), a.clone()]);
        assert_eq!(filtered, [a, b]);
    }

    #[test]
    fn files_count_as_existing() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("settings.yml");
        fs::write(&file, "all: {}").unwrap();

        assert!(exists_and_readable(&file));
        assert!(!exists_and_readable(&tmp.path().join("missing.yml")));
    }
}
