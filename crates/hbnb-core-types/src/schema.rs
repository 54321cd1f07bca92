//! Canonical schema constants for structured logging
//!
//! Every storage operation logs with these keys so captured events can be
//! asserted on without string drift between crates.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Storage identifiers
pub const FIELD_BACKEND: &str = "backend";
pub const FIELD_ENTITY_KIND: &str = "entity_kind";
pub const FIELD_ENTITY_KEY: &str = "entity_key";

// Collection sizes
pub const FIELD_STAGED_LEN: &str = "staged_len";
pub const FIELD_RESULT_LEN: &str = "result_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_ALL: &str = "storage.all";
pub const OP_GET: &str = "storage.get";
pub const OP_NEW: &str = "storage.new";
pub const OP_SAVE: &str = "storage.save";
pub const OP_DELETE: &str = "storage.delete";
pub const OP_RELOAD: &str = "storage.reload";
pub const OP_RELATED: &str = "storage.related";
pub const OP_CLOSE: &str = "storage.close";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_ENTITY_KEY.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_op_names_share_prefix() {
        for op in [
            OP_ALL, OP_GET, OP_NEW, OP_SAVE, OP_DELETE, OP_RELOAD, OP_RELATED, OP_CLOSE,
        ] {
            assert!(op.starts_with("storage."), "{op} should be namespaced");
        }
    }
}
