use std::fs;
use std::path::{Path, PathBuf};

/// File extensions treated as lesson documents.
pub const LESSON_EXTENSIONS: [&str; 2] = ["lesson", "md"];

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid lessons directory: {0}")]
    InvalidLessonsDir(String),
}

/// Read a lesson file and return its content
pub fn read_lesson(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Whether `path` has a lesson file extension
pub fn is_lesson_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LESSON_EXTENSIONS.contains(&ext))
}

/// Scan for lesson files under `root`, sorted by path
pub fn scan_lesson_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    validate_lessons_dir(root)?;

    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if is_lesson_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_lessons_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidLessonsDir(format!(
            "directory does not exist: {}",
            path.display()
        )));
    }

    Ok(())
}
