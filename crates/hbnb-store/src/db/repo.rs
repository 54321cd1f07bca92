//! SQL statements against the HBNB tables
//!
//! Writers take a `Transaction`, readers a plain `Connection`.

use hbnb_core::model::{Entity, EntityKind, Link, Relation};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction};

use super::mapping::{columns, from_row, select_sql, to_row, upsert_sql};
use crate::errors::{classify_rusqlite, from_rusqlite, Result};

/// Insert or update one entity row
pub fn upsert(tx: &Transaction, entity: &Entity) -> Result<()> {
    tx.execute(&upsert_sql(entity.kind()), params_from_iter(to_row(entity)))
        .map_err(|e| classify_rusqlite(&entity.key(), e))?;
    Ok(())
}

/// Add association rows for every amenity the place lists
///
/// Existing links are kept; linking is add-only.
pub fn link_amenities(tx: &Transaction, place_id: &str, amenity_ids: &[String]) -> Result<()> {
    let mut stmt = tx
        .prepare_cached(
            "INSERT INTO place_amenity (place_id, amenity_id) VALUES (?1, ?2)
             ON CONFLICT(place_id, amenity_id) DO NOTHING",
        )
        .map_err(from_rusqlite)?;
    for amenity_id in amenity_ids {
        stmt.execute(params![place_id, amenity_id])
            .map_err(|e| classify_rusqlite(&EntityKind::Place.key(place_id), e))?;
    }
    Ok(())
}

/// Delete one row; dependents go with it through `ON DELETE CASCADE`
pub fn delete(tx: &Transaction, kind: EntityKind, id: &str) -> Result<usize> {
    tx.execute(&format!("DELETE FROM {} WHERE id = ?1", kind.table()), [id])
        .map_err(|e| classify_rusqlite(&kind.key(id), e))
}

fn read_row(kind: EntityKind, row: &Row<'_>) -> rusqlite::Result<Vec<SqlValue>> {
    (0..columns(kind).len()).map(|i| row.get(i)).collect()
}

/// Rows to entities, filling Place `amenity_ids` from the association table
fn hydrate(conn: &Connection, kind: EntityKind, rows: Vec<Vec<SqlValue>>) -> Result<Vec<Entity>> {
    rows.into_iter()
        .map(|values| {
            let mut entity = from_row(kind, values)?;
            if let Entity::Place(place) = &mut entity {
                place.amenity_ids = amenity_ids(conn, place.base.id())?;
            }
            Ok(entity)
        })
        .collect()
}

fn query(
    conn: &Connection,
    kind: EntityKind,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Entity>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(args, |row| read_row(kind, row))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    hydrate(conn, kind, rows)
}

/// Every row of `kind`, ordered by id
pub fn select_all(conn: &Connection, kind: EntityKind) -> Result<Vec<Entity>> {
    let sql = format!("{} ORDER BY id", select_sql(kind));
    query(conn, kind, &sql, &[])
}

/// The row of `kind` with this id
pub fn select_one(conn: &Connection, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
    let sql = format!("{} WHERE id = ?1", select_sql(kind));
    let values = conn
        .query_row(&sql, [id], |row| read_row(kind, row))
        .optional()
        .map_err(from_rusqlite)?;
    match values {
        Some(values) => Ok(hydrate(conn, kind, vec![values])?.pop()),
        None => Ok(None),
    }
}

/// Children of `parent_id` along `relation`, ordered by id
pub fn select_related(
    conn: &Connection,
    relation: Relation,
    parent_id: &str,
) -> Result<Vec<Entity>> {
    let child = relation.child();
    let sql = match (relation.link(), relation) {
        (Link::ForeignKey(attr), _) => {
            format!("{} WHERE {attr} = ?1 ORDER BY id", select_sql(child))
        }
        (Link::Association, Relation::PlaceAmenities) => format!(
            "{} WHERE id IN (SELECT amenity_id FROM place_amenity WHERE place_id = ?1) ORDER BY id",
            select_sql(child)
        ),
        (Link::Association, _) => format!(
            "{} WHERE id IN (SELECT place_id FROM place_amenity WHERE amenity_id = ?1) ORDER BY id",
            select_sql(child)
        ),
    };
    query(conn, child, &sql, &[&parent_id])
}

/// Amenity ids linked to a place, in link order
pub fn amenity_ids(conn: &Connection, place_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare_cached("SELECT amenity_id FROM place_amenity WHERE place_id = ?1 ORDER BY rowid")
        .map_err(from_rusqlite)?;
    let ids = stmt
        .query_map([place_id], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(ids)
}
