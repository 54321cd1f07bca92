//! Atomic write primitives
//!
//! Uses temp→rename so a reader never sees a half-written document

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{io_error, Result};

/// Sibling path the document is staged at before the rename
pub fn temp_path(target_path: &Path) -> PathBuf {
    let mut name = target_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}

/// Atomically replace the file at `target_path` with `content`
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_document_dir", e))?;
        }
    }

    let temp = temp_path(target_path);
    fs::write(&temp, content).map_err(|e| io_error("write_document_temp", e))?;

    if let Err(e) = fs::rename(&temp, target_path) {
        let _ = fs::remove_file(&temp);
        return Err(io_error("rename_document_temp", e));
    }

    Ok(())
}
