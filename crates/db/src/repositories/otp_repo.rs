//! Repository for the `otps` table.

use sqlx::PgPool;
use tokpa_core::types::DbId;

use crate::models::otp::{CreateOtp, Otp};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, phone, code, used, expires_at, created_at";

/// Provides persistence for one-time login codes.
pub struct OtpRepo;

impl OtpRepo {
    /// Insert a freshly generated code, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOtp) -> Result<Otp, sqlx::Error> {
        let query = format!(
            "INSERT INTO otps (phone, code, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Otp>(&query)
            .bind(&input.phone)
            .bind(&input.code)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Mark every still-active code for a phone as used.
    ///
    /// Called before issuing a new code so at most one code per phone is
    /// redeemable at any time. Returns the count of invalidated codes.
    pub async fn invalidate_active(pool: &PgPool, phone: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE otps SET used = true \
             WHERE phone = $1 AND used = false AND expires_at > NOW()",
        )
        .bind(phone)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Find the newest redeemable code matching phone and code.
    ///
    /// Only returns codes that are unused and not expired.
    pub async fn find_valid(
        pool: &PgPool,
        phone: &str,
        code: &str,
    ) -> Result<Option<Otp>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM otps \
             WHERE phone = $1 AND code = $2 AND used = false AND expires_at > NOW() \
             ORDER BY created_at DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Otp>(&query)
            .bind(phone)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Consume a code. Returns `true` if the row was updated.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE otps SET used = true WHERE id = $1 AND used = false")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
