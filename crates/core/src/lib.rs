//! Domain types and rules for the tokpa market-price collection platform.
//!
//! Everything here is database- and HTTP-agnostic: identifier aliases, the
//! entry/validation vocabulary, the sync outcome contract, quota rules, and
//! OTP code generation. The `tokpa-db` and `tokpa-api` crates build on top.

pub mod entry;
pub mod error;
pub mod otp;
pub mod roles;
pub mod types;
pub mod validate;
