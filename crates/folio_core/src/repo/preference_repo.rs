//! Preference store contract and implementations.
//!
//! # Responsibility
//! - Read and write single string values by key.
//! - Keep storage details out of the theme service.
//!
//! # Invariants
//! - Keys are non-empty after trimming.
//! - `set` followed by `get` on the same store returns the written value.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PreferenceResult<T> = Result<T, PreferenceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    EmptyKey,
    /// Backend read/write failure, carried as text so every backend fits.
    Backend(String),
}

impl Display for PreferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "preference key must not be empty"),
            Self::Backend(message) => write!(f, "preference store failure: {message}"),
        }
    }
}

impl Error for PreferenceError {}

/// Persisted string key-value access.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> PreferenceResult<()>;
}

fn normalize_key(key: &str) -> PreferenceResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(PreferenceError::EmptyKey);
    }
    Ok(trimmed)
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        let key = normalize_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PreferenceResult<()> {
        let key = normalize_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use sqlite::SqlitePreferenceStore;

#[cfg(not(target_arch = "wasm32"))]
mod sqlite {
    use super::{normalize_key, PreferenceError, PreferenceResult, PreferenceStore};
    use crate::db::migrations::{latest_version, schema_version};
    use crate::db::DbError;
    use rusqlite::{params, Connection, OptionalExtension};

    /// Store backed by the migrated `preferences` table.
    pub struct SqlitePreferenceStore {
        conn: Connection,
    }

    impl SqlitePreferenceStore {
        /// Wraps a connection returned by `open_preferences_db*`.
        ///
        /// # Errors
        /// - Returns an error when the schema is not fully migrated.
        pub fn try_new(conn: Connection) -> Result<Self, DbError> {
            let version = schema_version(&conn)?;
            if version != latest_version() {
                return Err(DbError::UnsupportedSchemaVersion {
                    db_version: version,
                    latest_supported: latest_version(),
                });
            }
            Ok(Self { conn })
        }
    }

    impl PreferenceStore for SqlitePreferenceStore {
        fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
            let key = normalize_key(key)?;
            self.conn
                .query_row(
                    "SELECT value FROM preferences WHERE key = ?1;",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
                .map_err(backend)
        }

        fn set(&mut self, key: &str, value: &str) -> PreferenceResult<()> {
            let key = normalize_key(key)?;
            self.conn
                .execute(
                    "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = CAST(strftime('%s', 'now') AS INTEGER) * 1000;",
                    params![key, value],
                )
                .map(|_| ())
                .map_err(backend)
        }
    }

    fn backend(err: rusqlite::Error) -> PreferenceError {
        PreferenceError::Backend(err.to_string())
    }
}
