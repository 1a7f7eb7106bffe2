//! One-time-password codes for the phone login flow.

use rand::Rng;

/// How long a generated code stays redeemable, in seconds (5 minutes).
pub const OTP_TTL_SECS: i64 = 300;

/// Generate a random 6-digit login code.
///
/// Codes are drawn from 100000..=999999 so they always print as six digits.
/// Delivery is out of scope here; the auth handler stores the code and (in
/// development) writes it to the debug log in place of an SMS gateway.
pub fn generate_code() -> String {
    rand::rng().random_range(100_000..1_000_000u32).to_string()
}
