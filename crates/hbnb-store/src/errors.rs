//! Error handling for hbnb-store
//!
//! Wraps hbnb-core HbnbError with store-specific helpers

use hbnb_core::errors::HbnbError;
use rusqlite::ffi;
use rusqlite::ErrorCode;

/// Result type alias using HbnbError
pub type Result<T> = std::result::Result<T, HbnbError>;

/// Create a database error from rusqlite::Error with no entity context
pub fn from_rusqlite(err: rusqlite::Error) -> HbnbError {
    classify_rusqlite("database", err)
}

/// Classify a rusqlite::Error raised while writing `entity`
///
/// Constraint violations map onto Validation or Integrity so callers can
/// tell a bad entity from a broken database.
pub fn classify_rusqlite(entity: &str, err: rusqlite::Error) -> HbnbError {
    let reason = err.to_string();
    let rusqlite::Error::SqliteFailure(failure, _) = &err else {
        return persistence(&reason);
    };
    match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_NOTNULL | ffi::SQLITE_CONSTRAINT_CHECK => {
            return HbnbError::Validation {
                entity: entity.to_string(),
                reason,
            }
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        | ffi::SQLITE_CONSTRAINT_UNIQUE => {
            return HbnbError::Integrity {
                entity: entity.to_string(),
                reason,
            }
        }
        _ => {}
    }
    match failure.code {
        ErrorCode::CannotOpen | ErrorCode::NotADatabase => HbnbError::Connection { reason },
        _ => persistence(&reason),
    }
}

fn persistence(reason: &str) -> HbnbError {
    HbnbError::Persistence {
        op: "sqlite".to_string(),
        reason: reason.to_string(),
    }
}

/// Operation attempted with no open relational session
pub fn no_session() -> HbnbError {
    HbnbError::Connection {
        reason: "no active session; call reload() first".to_string(),
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> HbnbError {
    HbnbError::Io {
        op: operation.to_string(),
        reason: err.to_string(),
    }
}

/// Create a document decoding error
pub fn document_error(reason: impl Into<String>) -> HbnbError {
    HbnbError::Serialization {
        reason: reason.into(),
    }
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> HbnbError {
    HbnbError::Config {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::errors::ErrorKind;

    fn failure(extended_code: i32) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(extended_code), Some("boom".to_string()))
    }

    #[test]
    fn test_not_null_is_validation() {
        let err = classify_rusqlite("User.1", failure(ffi::SQLITE_CONSTRAINT_NOTNULL));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("User.1"));
    }

    #[test]
    fn test_check_is_validation() {
        let err = classify_rusqlite("Review.1", failure(ffi::SQLITE_CONSTRAINT_CHECK));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_foreign_key_is_integrity() {
        let err = classify_rusqlite("Place.1", failure(ffi::SQLITE_CONSTRAINT_FOREIGNKEY));
        assert_eq!(err.kind(), ErrorKind::Integrity);
        let err = classify_rusqlite("Place.1", failure(ffi::SQLITE_CONSTRAINT_UNIQUE));
        assert_eq!(err.kind(), ErrorKind::Integrity);
    }

    #[test]
    fn test_cannot_open_is_connection() {
        let err = from_rusqlite(failure(ffi::SQLITE_CANTOPEN));
        assert_eq!(err.kind(), ErrorKind::Connection);
        let err = from_rusqlite(failure(ffi::SQLITE_NOTADB));
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[test]
    fn test_other_failures_are_persistence() {
        let err = from_rusqlite(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.kind(), ErrorKind::Persistence);
        let err = from_rusqlite(failure(ffi::SQLITE_BUSY));
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }

    #[test]
    fn test_io_error_keeps_operation() {
        let err = io_error(
            "write_document",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("write_document"));
    }
}
