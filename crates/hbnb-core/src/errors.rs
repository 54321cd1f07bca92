use thiserror::Error;

/// Result type alias using HbnbError
pub type Result<T> = std::result::Result<T, HbnbError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code that tests, logs and the CLI can match
/// on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Not-null or length constraint rejected a write (relational only)
    Validation,
    /// A foreign key names a row that does not exist
    Integrity,
    /// The backend session could not be established or is closed
    Connection,
    /// A type discriminator names no known entity type
    UnknownType,
    /// An attribute in a mapping has the wrong shape
    InvalidAttribute,
    Config,
    Io,
    Serialization,
    Persistence,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ERR_VALIDATION",
            ErrorKind::Integrity => "ERR_INTEGRITY",
            ErrorKind::Connection => "ERR_CONNECTION",
            ErrorKind::UnknownType => "ERR_UNKNOWN_TYPE",
            ErrorKind::InvalidAttribute => "ERR_INVALID_ATTRIBUTE",
            ErrorKind::Config => "ERR_CONFIG",
            ErrorKind::Io => "ERR_IO",
            ErrorKind::Serialization => "ERR_SERIALIZATION",
            ErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Error taxonomy for storage and model operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HbnbError {
    /// A required column was left unset or a string exceeded its declared length
    #[error("Validation failed for {entity}: {reason}")]
    Validation { entity: String, reason: String },

    /// A foreign key does not reference an existing row
    #[error("Integrity violation for {entity}: {reason}")]
    Integrity { entity: String, reason: String },

    /// Backend unreachable, or the session is not open
    #[error("Connection failure: {reason}")]
    Connection { reason: String },

    /// Type discriminator does not name one of the six entity types
    #[error("Unknown entity type: {type_name}")]
    UnknownType { type_name: String },

    /// Mapping attribute has the wrong type or format
    #[error("Invalid attribute for {type_name}: {reason}")]
    InvalidAttribute { type_name: String, reason: String },

    /// Configuration is missing or malformed
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Filesystem failure
    #[error("I/O error in '{op}': {reason}")]
    Io { op: String, reason: String },

    /// Document could not be encoded or decoded
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Any other backend failure
    #[error("Persistence error in '{op}': {reason}")]
    Persistence { op: String, reason: String },
}

impl HbnbError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            HbnbError::Validation { .. } => ErrorKind::Validation,
            HbnbError::Integrity { .. } => ErrorKind::Integrity,
            HbnbError::Connection { .. } => ErrorKind::Connection,
            HbnbError::UnknownType { .. } => ErrorKind::UnknownType,
            HbnbError::InvalidAttribute { .. } => ErrorKind::InvalidAttribute,
            HbnbError::Config { .. } => ErrorKind::Config,
            HbnbError::Io { .. } => ErrorKind::Io,
            HbnbError::Serialization { .. } => ErrorKind::Serialization,
            HbnbError::Persistence { .. } => ErrorKind::Persistence,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// True for failures the caller can fix by correcting the entity and resubmitting
    pub fn is_constraint_failure(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Integrity)
    }
}

impl From<serde_json::Error> for HbnbError {
    fn from(err: serde_json::Error) -> Self {
        HbnbError::Serialization {
            reason: err.to_string(),
        }
    }
}
