//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create struct carrying the insertable fields

pub mod agent;
pub mod market;
pub mod otp;
pub mod price_entry;
pub mod product;
pub mod refresh_token;
pub mod validation;
