use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::Result, utils::persistence::write_atomic};

use super::KeyValueBackend;

const VALUE_EXTENSION: &str = "json";

/// File-backed key/value store: each key lives in `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueBackend for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.value_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.value_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "value".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path().join("store")).expect("json store");
        (store, temp)
    }

    #[test]
    fn set_get_remove_roundtrip() {
        let (mut store, _guard) = store_with_temp_dir();
        assert_eq!(store.get("saavr_theme").unwrap(), None);

        store.set("saavr_theme", "\"light\"").unwrap();
        assert_eq!(store.get("saavr_theme").unwrap().as_deref(), Some("\"light\""));

        store.remove("saavr_theme").unwrap();
        assert_eq!(store.get("saavr_theme").unwrap(), None);
        store.remove("saavr_theme").expect("removing a missing key is fine");
    }

    #[test]
    fn keys_cannot_escape_the_root() {
        let (store, _guard) = store_with_temp_dir();
        let path = store.value_path("../../etc/passwd");
        assert_eq!(path.parent(), Some(store.root()));
        assert_eq!(store.value_path("///").file_name().unwrap(), "value.json");
    }

    #[test]
    fn overwrite_leaves_no_temp_file() {
        let (mut store, _guard) = store_with_temp_dir();
        store.set("saavr_v3_4_income", "100").unwrap();
        store.set("saavr_v3_4_income", "250").unwrap();
        assert_eq!(store.get("saavr_v3_4_income").unwrap().as_deref(), Some("250"));
        let leftovers = fs::read_dir(store.root())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
