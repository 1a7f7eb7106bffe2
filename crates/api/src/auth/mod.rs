//! Token issuance and validation for OTP-authenticated agents.

pub mod jwt;
