//! Storage selector
//!
//! Builds the one storage instance a process uses, chosen from
//! configuration at startup.

use hbnb_core::storage::{BackendKind, Storage};

use crate::config::Config;
use crate::db::DbStorage;
use crate::errors::{config_error, Result};
use crate::file::FileStorage;

/// Construct the configured backend and run its initial `reload`
///
/// # Errors
///
/// `Config` when the relational backend is selected without settings,
/// otherwise whatever the backend's constructor or `reload` reports.
pub fn open(config: &Config) -> Result<Box<dyn Storage>> {
    let mut storage: Box<dyn Storage> = match config.backend {
        BackendKind::File => Box::new(FileStorage::new(&config.file_path)),
        BackendKind::Db => {
            let db = config
                .db
                .clone()
                .ok_or_else(|| config_error("relational backend selected without settings"))?;
            Box::new(DbStorage::new(db)?)
        }
    };
    storage.reload()?;
    tracing::info!(backend = %storage.backend(), "storage engine ready");
    Ok(storage)
}
