//! JSON persistence helpers for files kept under ~/.skirmish/.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.skirmish/ directory path, creating it if needed.
pub fn skirmish_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".skirmish");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.skirmish/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(skirmish_dir()?.join(filename))
}

/// Read a file to a string, or `None` if it does not exist.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_path_format() {
        let path = save_path("test.json").expect("save_path should succeed");
        assert!(path.to_string_lossy().ends_with(".skirmish/test.json"));
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let found = read_if_exists(&dir.path().join("nope.json")).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_save_creates_parents_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let data = vec!["hello".to_string(), "world".to_string()];
        save_json(&path, &data).expect("save should succeed");

        let json = read_if_exists(&path).unwrap().unwrap();
        let loaded: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, data);
    }
}
