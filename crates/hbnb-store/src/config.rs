//! Storage configuration from environment-style keys
//!
//! Read once at process start. `from_lookup` takes any key→value source so
//! tests never touch the real environment.

use std::path::PathBuf;

use hbnb_core::storage::BackendKind;
use hbnb_core_types::Sensitive;

use crate::errors::{config_error, Result};

pub const KEY_TYPE_STORAGE: &str = "HBNB_TYPE_STORAGE";
pub const KEY_FILE_PATH: &str = "HBNB_FILE_PATH";
pub const KEY_MYSQL_HOST: &str = "HBNB_MYSQL_HOST";
pub const KEY_MYSQL_DB: &str = "HBNB_MYSQL_DB";
pub const KEY_MYSQL_USER: &str = "HBNB_MYSQL_USER";
pub const KEY_MYSQL_PWD: &str = "HBNB_MYSQL_PWD";
pub const KEY_ENV: &str = "HBNB_ENV";

pub const DEFAULT_FILE_PATH: &str = "file.json";
pub const DEFAULT_HOST: &str = "localhost";

/// Environment marker that resets the relational schema at startup
pub const TEST_ENV: &str = "test";

/// Relational connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    /// Informational; SQLite has no server
    pub host: String,
    /// Database file location
    pub database: PathBuf,
    pub user: String,
    pub password: Sensitive<String>,
    /// Drop every table once before the first reload
    pub reset_schema: bool,
}

impl DbConfig {
    /// Settings for a database file with the defaults for everything else
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            database: database.into(),
            user: String::new(),
            password: Sensitive::default(),
            reset_schema: false,
        }
    }
}

/// Full storage configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend: BackendKind,
    pub file_path: PathBuf,
    /// Present only when the relational backend is selected
    pub db: Option<DbConfig>,
}

impl Config {
    /// File backend writing to `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: BackendKind::File,
            file_path: path.into(),
            db: None,
        }
    }

    /// Relational backend with the given settings
    pub fn db(db: DbConfig) -> Self {
        Self {
            backend: BackendKind::Db,
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            db: Some(db),
        }
    }

    /// Read configuration from the process environment
    ///
    /// # Errors
    ///
    /// `Config` when the relational backend is selected without a database.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration from an arbitrary key→value source
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// `Config` when the relational backend is selected without a database.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let backend = BackendKind::from_setting(get(KEY_TYPE_STORAGE).as_deref());
        let file_path = get(KEY_FILE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_PATH));

        let db = match backend {
            BackendKind::File => None,
            BackendKind::Db => {
                let database = get(KEY_MYSQL_DB).ok_or_else(|| {
                    config_error(format!("{KEY_MYSQL_DB} is required when {KEY_TYPE_STORAGE}=db"))
                })?;
                Some(DbConfig {
                    host: get(KEY_MYSQL_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
                    database: PathBuf::from(database),
                    user: get(KEY_MYSQL_USER).unwrap_or_default(),
                    password: Sensitive::new(get(KEY_MYSQL_PWD).unwrap_or_default()),
                    reset_schema: get(KEY_ENV).as_deref() == Some(TEST_ENV),
                })
            }
        };

        Ok(Self {
            backend,
            file_path,
            db,
        })
    }
}
