//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod agent_repo;
pub mod entry_repo;
pub mod market_repo;
pub mod otp_repo;
pub mod product_repo;
pub mod refresh_token_repo;
pub mod validation_repo;

pub use agent_repo::AgentRepo;
pub use entry_repo::EntryRepo;
pub use market_repo::MarketRepo;
pub use otp_repo::OtpRepo;
pub use product_repo::ProductRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use validation_repo::ValidationRepo;
