//! Repository for the `grocery_list_entries` snapshot table.

use sqlx::PgPool;

use crate::models::grocery::GroceryEntry;

/// Column list for `grocery_list_entries` queries.
const GROCERY_COLUMNS: &str = "item_id, name, quantity, unit, category, location, generated_at";

pub struct GroceryRepo;

impl GroceryRepo {
    /// Replace the whole grocery list in a single transaction.
    ///
    /// Entries whose item no longer exists are skipped; the referenced item
    /// row is key-share locked so it cannot vanish before commit. Returns the
    /// number of entries written.
    pub async fn replace_all(pool: &PgPool, entries: &[GroceryEntry]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM grocery_list_entries")
            .execute(&mut *tx)
            .await?;

        let mut written = 0;
        for entry in entries {
            let result = sqlx::query(
                "INSERT INTO grocery_list_entries \
                    (item_id, name, quantity, unit, category, location, generated_at) \
                 SELECT id, $2, $3, $4, $5, $6, $7 FROM items WHERE id = $1 FOR KEY SHARE",
            )
            .bind(entry.item_id)
            .bind(&entry.name)
            .bind(entry.quantity)
            .bind(&entry.unit)
            .bind(&entry.category)
            .bind(&entry.location)
            .bind(entry.generated_at)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }

    /// The current grocery list, in the order it was generated.
    pub async fn list(pool: &PgPool) -> Result<Vec<GroceryEntry>, sqlx::Error> {
        let query = format!("SELECT {GROCERY_COLUMNS} FROM grocery_list_entries ORDER BY id");
        sqlx::query_as::<_, GroceryEntry>(&query).fetch_all(pool).await
    }
}
