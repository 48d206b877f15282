use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::diff::FileSet;
use crate::error::GistError;

/// Read an explicit list of paths into a FileSet keyed by base filename.
///
/// Two paths with the same base filename collapse to one entry, last read
/// wins. Content must be UTF-8 text.
pub fn read_files<P: AsRef<Path>>(paths: &[P]) -> Result<FileSet, GistError> {
    let mut files = FileSet::new();
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GistError::FileNotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(|_| GistError::FileNotFound(path.to_path_buf()))?;
        let content =
            String::from_utf8(bytes).map_err(|_| GistError::Decode(path.to_path_buf()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| GistError::Decode(path.to_path_buf()))?;
        files.insert(name.to_string(), content);
    }
    Ok(files)
}

/// Glob `patterns` inside `dir` and read every match. Matches are deduped
/// across patterns and directories are skipped.
pub fn collect_directory(dir: &Path, patterns: &[String]) -> Result<FileSet, GistError> {
    if !dir.is_dir() {
        return Err(GistError::FileNotFound(dir.to_path_buf()));
    }

    let mut matched: BTreeSet<PathBuf> = BTreeSet::new();
    for pattern in patterns {
        let full = dir.join(pattern);
        let full = full
            .to_str()
            .ok_or_else(|| GistError::BadPattern(pattern.clone()))?;
        let entries =
            glob::glob(full).map_err(|_| GistError::BadPattern(pattern.clone()))?;
        for entry in entries.flatten() {
            if entry.is_file() {
                matched.insert(entry);
            }
        }
    }

    if matched.is_empty() {
        return Err(GistError::NoMatchingFiles {
            dir: dir.to_path_buf(),
            patterns: patterns.to_vec(),
        });
    }

    let paths: Vec<PathBuf> = matched.into_iter().collect();
    read_files(&paths)
}
