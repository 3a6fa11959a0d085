//! # Shared Data Transfer Objects Library
//!
//! This library defines the value objects exchanged between the RateForge
//! client layers: formatted market snapshots, quote previews, positions,
//! and dashboard bundles. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::market`]**: Formatted market snapshot views
//!   - **[`dto::trade`]**: Quotes, positions, balances, dashboards
//! - **[`utils`]**: Shared display helpers
//!   - **[`utils::format_address`]**: Format hex addresses for display
//!   - **[`utils::format_amount`]**: Thousands-separated amount strings
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON with the default `serde` behavior:
//! snake_case field names, enums mapped to their wire strings, and both
//! `Serialize` and `Deserialize` derived for bidirectional use.

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
