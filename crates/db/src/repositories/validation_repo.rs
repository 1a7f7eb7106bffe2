//! Repository for the `validations` audit table.

use sqlx::PgPool;
use tokpa_core::types::DbId;

use crate::models::validation::Validation;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, price_entry_id, admin_id, decision, reason, created_at";

/// Read access to the review audit trail. Rows are written only by
/// `EntryRepo::apply_decision`, inside the decision transaction.
pub struct ValidationRepo;

impl ValidationRepo {
    /// All decisions recorded for one entry, newest first.
    pub async fn list_for_entry(
        pool: &PgPool,
        price_entry_id: DbId,
    ) -> Result<Vec<Validation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM validations \
             WHERE price_entry_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Validation>(&query)
            .bind(price_entry_id)
            .fetch_all(pool)
            .await
    }
}
