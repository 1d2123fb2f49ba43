//! Dataset loading from the sentence directory.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dataset::record::{CategoryId, Hitokoto};
use crate::dataset::store::Dataset;

/// Errors that abort a dataset load.
///
/// A single unreadable category file is not one of them; it is logged and skipped.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The data directory itself is missing or unreadable.
    #[error("data directory {} is not accessible: {}", .path.display(), .source)]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data directory path points at something other than a directory.
    #[error("data directory {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// A background load task died before producing a dataset.
    #[error("dataset load task failed: {0}")]
    Task(String),
}

/// Why a single category was skipped.
#[derive(Debug, Error)]
enum CategoryError {
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load `<data_dir>/<id>.json` for every category.
///
/// Categories that cannot be read or parsed are omitted from the result.
pub fn load(data_dir: &Path, categories: &[CategoryId]) -> Result<Dataset, DatasetError> {
    let metadata = fs::metadata(data_dir).map_err(|source| DatasetError::DataDir {
        path: data_dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(DatasetError::NotADirectory(data_dir.to_path_buf()));
    }

    let mut dataset = Dataset::new();
    for id in categories {
        match load_category(data_dir, id) {
            Ok(records) => {
                tracing::debug!(category = %id, count = records.len(), "Category loaded");
                dataset.insert(id.clone(), records);
            }
            Err(e) => {
                tracing::warn!(category = %id, error = %e, "Skipping category");
            }
        }
    }

    Ok(dataset)
}

fn load_category(data_dir: &Path, id: &CategoryId) -> Result<Vec<Hitokoto>, CategoryError> {
    let content = fs::read_to_string(data_dir.join(id.file_name()))?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ids(list: &[&str]) -> Vec<CategoryId> {
        list.iter().map(|id| CategoryId::from(*id)).collect()
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn loads_categories_in_requested_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", r#"[{"hitokoto":"hi","from":"x"}]"#);
        write(&dir, "b.json", r#"[{"hitokoto":"hello world"},{"hitokoto":"yo"}]"#);

        let dataset = load(dir.path(), &ids(&["b", "a"])).unwrap();
        let order: Vec<&str> = dataset.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(dataset.get("b").unwrap().len(), 2);
        assert_eq!(
            dataset.get("a").unwrap()[0].get("from"),
            Some(&serde_json::Value::from("x"))
        );
    }

    #[test]
    fn missing_and_malformed_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", r#"[{"hitokoto":"hi"}]"#);
        write(&dir, "b.json", "{not json");
        write(&dir, "c.json", r#"{"hitokoto":"not an array"}"#);

        let dataset = load(dir.path(), &ids(&["a", "b", "c", "d"])).unwrap();
        assert_eq!(dataset.category_count(), 1);
        assert!(dataset.contains("a"));
        assert!(!dataset.contains("b"));
        assert!(!dataset.contains("c"));
        assert!(!dataset.contains("d"));
    }

    #[test]
    fn empty_array_is_a_loaded_category() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", "[]");

        let dataset = load(dir.path(), &ids(&["a"])).unwrap();
        assert_eq!(dataset.get("a"), Some(&[][..]));
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = load(&missing, &ids(&["a"])).unwrap_err();
        assert!(matches!(err, DatasetError::DataDir { .. }));
    }

    #[test]
    fn file_instead_of_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", "[]");
        let err = load(&dir.path().join("a.json"), &ids(&["a"])).unwrap_err();
        assert!(matches!(err, DatasetError::NotADirectory(_)));
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", r#"[{"hitokoto":"one"},{"hitokoto":"two"}]"#);
        write(&dir, "b.json", r#"[{"hitokoto":"three","from_who":"me"}]"#);

        let categories = ids(&["a", "b"]);
        let first = load(dir.path(), &categories).unwrap();
        let second = load(dir.path(), &categories).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.counts(), second.counts());
    }
}
