//! Repository for the `agents` table.

use sqlx::PgPool;
use tokpa_core::types::DbId;

use crate::models::agent::{Agent, CreateAgent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, phone, role, created_at, updated_at";

/// Provides CRUD operations for agents.
pub struct AgentRepo;

impl AgentRepo {
    /// Insert a new agent, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAgent) -> Result<Agent, sqlx::Error> {
        let query = format!(
            "INSERT INTO agents (name, phone, role) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agent>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(input.role)
            .fetch_one(pool)
            .await
    }

    /// Find an agent by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE id = $1");
        sqlx::query_as::<_, Agent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an agent by phone number (the login identity).
    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents WHERE phone = $1");
        sqlx::query_as::<_, Agent>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// List all agents, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Agent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agents ORDER BY created_at DESC");
        sqlx::query_as::<_, Agent>(&query).fetch_all(pool).await
    }
}
