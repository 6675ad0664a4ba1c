use super::TokenStore;
use crate::api::AppError;
use std::{collections::BTreeMap, sync::Mutex};

/// In-process store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().map_or(0, |items| items.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStore for MemoryStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| AppError::Storage("Token store lock poisoned".to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        let items = self
            .items
            .lock()
            .map_err(|_| AppError::Storage("Token store lock poisoned".to_string()))?;
        Ok(items.get(key).cloned())
    }
}
