//! HTTP API for the market-price collection backend.
//!
//! Everything the binary wires together lives here so integration tests can
//! build the exact same router against a test database.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
pub mod sync;
