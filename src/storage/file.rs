//! JSON file store used by the CLI. The whole file is a flat object of string
//! values; every write rewrites it through a temporary file and a rename. On
//! unix the file is created with mode `0600`.

use super::TokenStore;
use crate::api::AppError;
use std::{
    collections::BTreeMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::debug;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within the process
    guard: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Storage(format!(
                    "Invalid token store {}: {err}",
                    self.path.display()
                ))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(AppError::Storage(format!(
                "Failed to read {}: {err}",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), AppError> {
        let contents = serde_json::to_vec_pretty(items)
            .map_err(|err| AppError::Serialization(format!("Failed to encode store: {err}")))?;

        let tmp_path = self.path.with_extension("tmp");
        let storage_err = |err: std::io::Error| {
            AppError::Storage(format!("Failed to write {}: {err}", self.path.display()))
        };

        let mut file = open_private(&tmp_path).map_err(storage_err)?;
        file.write_all(&contents).map_err(storage_err)?;
        file.sync_all().map_err(storage_err)?;
        fs::rename(&tmp_path, &self.path).map_err(storage_err)?;

        debug!("token store updated: {}", self.path.display());

        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl TokenStore for FileStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| AppError::Storage("Token store lock poisoned".to_string()))?;

        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| AppError::Storage("Token store lock poisoned".to_string()))?;

        Ok(self.read_all()?.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn missing_file_reads_as_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path().join("session.json"));
        assert_eq!(store.get_item("access_token")?, None);
        Ok(())
    }

    #[test]
    fn values_survive_a_new_store() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        let store = FileStore::new(&path);
        store.set_item("access_token", "A")?;
        store.set_item("refresh_token", "R")?;

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get_item("access_token")?, Some("A".to_string()));
        assert_eq!(reopened.get_item("refresh_token")?, Some("R".to_string()));

        let raw: BTreeMap<String, String> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(raw.len(), 2);
        Ok(())
    }

    #[test]
    fn corrupt_file_is_a_storage_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "not json")?;

        let store = FileStore::new(&path);
        assert!(matches!(store.get_item("user_id"), Err(AppError::Storage(_))));
        assert!(matches!(
            store.set_item("user_id", "42"),
            Err(AppError::Storage(_))
        ));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        FileStore::new(&path).set_item("access_token", "A")?;

        let mode = fs::metadata(&path)?.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        Ok(())
    }
}
