use chrono::{DateTime, Duration, NaiveDateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Textual timestamp format used by `to_dict()` and every persisted form
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// Accepts any fractional precision, including none
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Current UTC time at the precision the persisted formats can carry
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Render a timestamp in the fixed textual format
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp written in the fixed textual format
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_PARSE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Serde adapter for the fixed textual timestamp format
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}

/// Identity and timestamps shared by every entity
///
/// `id` and `created_at` are fixed at construction. `updated_at` moves
/// forward only through a successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseModel {
    id: String,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub(crate) updated_at: DateTime<Utc>,
}

impl BaseModel {
    /// Fresh identity with `created_at == updated_at`
    pub fn new() -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Advance `updated_at` to now, strictly past its previous value
    pub(crate) fn touch(&mut self) {
        let floor = self.updated_at + Duration::microseconds(1);
        self.updated_at = now().max(floor);
    }

    /// Supply identity and timestamps a reconstruction mapping left out
    ///
    /// Missing `updated_at` takes the value of `created_at` so a rebuilt
    /// instance still reads as never saved.
    pub(crate) fn fill_defaults(map: &mut Map<String, Value>) {
        map.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        let created = map
            .entry("created_at")
            .or_insert_with(|| Value::String(format_timestamp(&now())))
            .clone();
        map.entry("updated_at").or_insert(created);
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_new_base_has_equal_timestamps() {
        let base = BaseModel::new();
        assert_eq!(base.created_at(), base.updated_at());
        assert_eq!(base.id().len(), 36);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = BaseModel::new();
        let b = BaseModel::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_now_is_microsecond_precision() {
        let ts = now();
        assert_eq!(ts.nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_touch_is_strictly_increasing() {
        let mut base = BaseModel::new();
        let before = base.updated_at();
        base.touch();
        assert!(base.updated_at() > before);
        assert!(base.updated_at() > base.created_at());

        let second = base.updated_at();
        base.touch();
        assert!(base.updated_at() > second);
    }

    #[test]
    fn test_timestamp_format_round_trip() {
        let ts = now();
        let text = format_timestamp(&ts);
        assert_eq!(parse_timestamp(&text), Some(ts));
    }

    #[test]
    fn test_timestamp_format_shape() {
        let ts = parse_timestamp("2017-06-14T22:31:03.285259").unwrap();
        assert_eq!(format_timestamp(&ts), "2017-06-14T22:31:03.285259");
    }

    #[test]
    fn test_parse_accepts_missing_fraction() {
        let ts = parse_timestamp("2017-06-14T22:31:03").unwrap();
        assert_eq!(format_timestamp(&ts), "2017-06-14T22:31:03.000000");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_fill_defaults_keeps_given_identity() {
        let mut map = Map::new();
        map.insert("id".into(), Value::String("abc".into()));
        map.insert(
            "created_at".into(),
            Value::String("2017-06-14T22:31:03.285259".into()),
        );
        BaseModel::fill_defaults(&mut map);

        assert_eq!(map["id"], "abc");
        assert_eq!(map["updated_at"], "2017-06-14T22:31:03.285259");
    }

    #[test]
    fn test_fill_defaults_generates_missing_identity() {
        let mut map = Map::new();
        BaseModel::fill_defaults(&mut map);

        assert!(map["id"].as_str().is_some_and(|id| id.len() == 36));
        assert_eq!(map["created_at"], map["updated_at"]);
    }
}
