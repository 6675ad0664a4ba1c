//! Durable client-side storage for the values handed back on login. Values are
//! plain strings with no expiry metadata and no encryption, mirroring browser
//! local storage. Stored values must never be logged.

mod file;
mod memory;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;

use crate::api::{AppError, LoginData};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_ID_KEY: &str = "user_id";

/// Key/value storage that outlives the controller.
pub trait TokenStore: Send + Sync {
    /// # Errors
    /// Returns `AppError::Storage` if the value cannot be persisted.
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// # Errors
    /// Returns `AppError::Storage` if the store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
}

/// Persists both tokens and the user id from a successful login.
///
/// # Errors
/// Returns the first storage error; earlier writes are not rolled back.
pub fn store_login(store: &dyn TokenStore, data: &LoginData) -> Result<(), AppError> {
    store.set_item(ACCESS_TOKEN_KEY, &data.tokens.access)?;
    store.set_item(REFRESH_TOKEN_KEY, &data.tokens.refresh)?;
    store.set_item(USER_ID_KEY, &data.id.to_string())?;
    Ok(())
}
