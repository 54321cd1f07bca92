//! Row ↔ entity mapping
//!
//! Each table is described once by its column list. Values cross the
//! boundary through the entity's `to_dict`/`from_dict` mapping, so adding
//! an attribute means adding a column name here and nowhere else.

use hbnb_core::model::{Entity, EntityKind};
use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Number, Value};

use crate::errors::Result;

const BASE_COLUMNS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Column names of the table holding `kind`, in table order
pub fn columns(kind: EntityKind) -> Vec<&'static str> {
    let own: &[&str] = match kind {
        EntityKind::State | EntityKind::Amenity => &["name"],
        EntityKind::User => &["email", "password", "first_name", "last_name"],
        EntityKind::City => &["state_id", "name"],
        EntityKind::Place => &[
            "city_id",
            "user_id",
            "name",
            "description",
            "number_rooms",
            "number_bathrooms",
            "max_guest",
            "price_by_night",
            "latitude",
            "longitude",
        ],
        EntityKind::Review => &["place_id", "user_id", "text"],
    };
    BASE_COLUMNS.iter().chain(own).copied().collect()
}

/// `SELECT <columns> FROM <table>` with no filter
pub fn select_sql(kind: EntityKind) -> String {
    format!("SELECT {} FROM {}", columns(kind).join(", "), kind.table())
}

/// Insert-or-update by id that never touches `created_at` on update
///
/// `ON CONFLICT DO UPDATE` rewrites the row in place, so dependents are not
/// cascaded the way `INSERT OR REPLACE` would.
pub fn upsert_sql(kind: EntityKind) -> String {
    let cols = columns(kind);
    let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
    let updates: Vec<String> = cols
        .iter()
        .filter(|c| !matches!(**c, "id" | "created_at"))
        .map(|c| format!("{c} = excluded.{c}"))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT(id) DO UPDATE SET {}",
        kind.table(),
        cols.join(", "),
        placeholders.join(", "),
        updates.join(", ")
    )
}

/// Column values for `entity`, in `columns()` order. Unset attributes bind NULL.
pub fn to_row(entity: &Entity) -> Vec<SqlValue> {
    let dict = entity.to_dict();
    columns(entity.kind())
        .into_iter()
        .map(|col| dict.get(col).map_or(SqlValue::Null, json_to_sql))
        .collect()
}

/// Rebuild an entity from column values in `columns()` order
pub fn from_row(kind: EntityKind, values: Vec<SqlValue>) -> Result<Entity> {
    let mut map = Map::new();
    for (col, value) in columns(kind).into_iter().zip(values) {
        if let Some(json) = sql_to_json(value) {
            map.insert(col.to_string(), json);
        }
    }
    Entity::from_dict(kind, map)
}

fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map_or(SqlValue::Null, SqlValue::Real),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn sql_to_json(value: SqlValue) -> Option<Value> {
    match value {
        SqlValue::Null | SqlValue::Blob(_) => None,
        SqlValue::Integer(i) => Some(Value::Number(i.into())),
        SqlValue::Real(f) => Number::from_f64(f).map(Value::Number),
        SqlValue::Text(s) => Some(Value::String(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::model::{Model, Place, User};

    #[test]
    fn test_every_table_starts_with_base_columns() {
        for kind in EntityKind::all() {
            assert_eq!(&columns(*kind)[..3], &BASE_COLUMNS);
        }
    }

    #[test]
    fn test_upsert_never_updates_identity() {
        let sql = upsert_sql(EntityKind::City);
        assert!(sql.starts_with("INSERT INTO cities (id, created_at, updated_at, state_id, name)"));
        assert!(sql.contains("ON CONFLICT(id) DO UPDATE SET updated_at = excluded.updated_at"));
        assert!(!sql.contains("id = excluded.id"));
        assert!(!sql.contains("created_at = excluded.created_at"));
    }

    #[test]
    fn test_unset_attributes_bind_null() {
        let user = User {
            email: Some("a@b.c".to_string()),
            ..User::new()
        };
        let row = to_row(&user.into_entity());
        assert_eq!(row[3], SqlValue::Text("a@b.c".to_string()));
        assert_eq!(row[4], SqlValue::Null);
    }

    #[test]
    fn test_place_row_types() {
        let place = Place {
            number_rooms: 3,
            latitude: Some(37.5),
            ..Place::new()
        };
        let row = to_row(&place.clone().into_entity());
        assert_eq!(row[7], SqlValue::Integer(3));
        assert_eq!(row[11], SqlValue::Real(37.5));
        assert_eq!(row[12], SqlValue::Null);

        let rebuilt = from_row(EntityKind::Place, row).unwrap();
        assert_eq!(rebuilt, place.into_entity());
    }
}
