//! Repository for the `items` table.

use larder_core::item_query::{Condition, ItemQuery, SortOrder};
use larder_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::item::{Item, ItemRow, NewItem};

/// Column list for `items` queries.
const ITEM_COLUMNS: &str = "\
    id, name, quantity, unit, location, category, expiry, status, created_at";

/// Provides CRUD and filtered listing for inventory items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a prepared item, returning its generated id.
    pub async fn insert(pool: &PgPool, item: &NewItem) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO items \
                (name, quantity, unit, location, category, expiry, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(&item.location)
        .bind(&item.category)
        .bind(item.expiry)
        .bind(item.status.code())
        .bind(item.created_at)
        .fetch_one(pool)
        .await
    }

    /// Find an item by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ItemRow>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, ItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List items matching every condition of `query`, in its sort order.
    pub async fn find(pool: &PgPool, query: &ItemQuery) -> Result<Vec<ItemRow>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_item_filter(&query.conditions);
        let order_clause = order_by(query.sort);

        let sql = match query.limit {
            Some(_) => format!(
                "SELECT {ITEM_COLUMNS} FROM items {where_clause} {order_clause} LIMIT ${bind_idx}"
            ),
            None => format!("SELECT {ITEM_COLUMNS} FROM items {where_clause} {order_clause}"),
        };

        let mut q = bind_item_values(sqlx::query_as::<_, ItemRow>(&sql), &bind_values);
        if let Some(limit) = query.limit {
            q = q.bind(limit);
        }
        q.fetch_all(pool).await
    }

    /// Overwrite every mutable column of an existing item.
    ///
    /// Returns `true` if a row was replaced.
    pub async fn replace(pool: &PgPool, item: &Item) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE items SET \
                name = $2, quantity = $3, unit = $4, location = $5, \
                category = $6, expiry = $7, status = $8 \
             WHERE id = $1",
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(&item.location)
        .bind(&item.category)
        .bind(item.expiry)
        .bind(item.status.code())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an item by id, returning the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// Dynamic filter helpers
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built item queries.
enum BindValue {
    SmallInt(i16),
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from query conditions.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if there are no conditions, or starts with `WHERE `.
fn build_item_filter(conditions: &[Condition]) -> (String, Vec<BindValue>, u32) {
    let mut clauses: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    for condition in conditions {
        match condition {
            Condition::Matches { field, pattern } => {
                // `~` is an unanchored, case-sensitive POSIX regex match.
                clauses.push(format!("{} ~ ${bind_idx}", field.column()));
                bind_idx += 1;
                bind_values.push(BindValue::Text(pattern.clone()));
            }
            Condition::StatusIs(status) => {
                clauses.push(format!("status = ${bind_idx}"));
                bind_idx += 1;
                bind_values.push(BindValue::SmallInt(status.code()));
            }
            Condition::ExpiresWithin { after, until } => {
                clauses.push(format!(
                    "expiry > ${bind_idx} AND expiry <= ${}",
                    bind_idx + 1
                ));
                bind_idx += 2;
                bind_values.push(BindValue::Timestamp(*after));
                bind_values.push(BindValue::Timestamp(*until));
            }
        }
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

fn order_by(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Storage => "ORDER BY id",
        SortOrder::CreatedAsc => "ORDER BY created_at ASC, id ASC",
        SortOrder::CreatedDesc => "ORDER BY created_at DESC, id DESC",
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_item_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::SmallInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use larder_core::item_query::{SearchCriteria, TextField};
    use larder_core::status::Status;
    use larder_core::types::EPOCH;

    use super::*;

    #[test]
    fn no_conditions_yield_empty_where_clause() {
        let (clause, values, idx) = build_item_filter(&[]);
        assert!(clause.is_empty());
        assert!(values.is_empty());
        assert_eq!(idx, 1);
    }

    #[test]
    fn search_conditions_use_regex_operator() {
        let query = ItemQuery::search(&SearchCriteria {
            query: "Ri".into(),
            category: "dals".into(),
            location: "all".into(),
            recent: "true".into(),
        });
        let (clause, values, idx) = build_item_filter(&query.conditions);
        assert_eq!(clause, "WHERE name ~ $1 AND category ~ $2");
        assert_eq!(values.len(), 2);
        assert_eq!(idx, 3);
        assert_eq!(order_by(query.sort), "ORDER BY created_at DESC, id DESC");
    }

    #[test]
    fn expiry_window_takes_two_binds() {
        let until = Utc.with_ymd_and_hms(2026, 10, 21, 0, 0, 0).unwrap();
        let conditions = [
            Condition::StatusIs(Status::Low),
            Condition::ExpiresWithin { after: EPOCH, until },
        ];
        let (clause, values, idx) = build_item_filter(&conditions);
        assert_eq!(clause, "WHERE status = $1 AND expiry > $2 AND expiry <= $3");
        assert_eq!(values.len(), 3);
        assert_eq!(idx, 4);
    }

    #[test]
    fn text_field_columns() {
        assert_eq!(TextField::Name.column(), "name");
        assert_eq!(TextField::Location.column(), "location");
    }
}
