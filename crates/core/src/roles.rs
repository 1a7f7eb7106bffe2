//! Agent roles and their well-known names.
//!
//! The string constants must match the `agent_role` Postgres enum created in
//! the migrations; JWT claims carry the role as one of these strings.

use serde::{Deserialize, Serialize};

pub const ROLE_AGENT: &str = "AGENT";
pub const ROLE_ADMIN: &str = "ADMIN";

/// Role stored on an agent record. Field agents submit entries; admins also
/// review them and manage reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "agent_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Agent,
    Admin,
}

impl Role {
    /// The wire/claims representation of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Agent => ROLE_AGENT,
            Role::Admin => ROLE_ADMIN,
        }
    }
}
