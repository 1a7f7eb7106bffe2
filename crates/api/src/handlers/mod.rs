//! HTTP handlers, one module per resource.

pub mod admin;
pub mod agents;
pub mod auth;
pub mod markets;
pub mod products;
pub mod sync;
