//! # Data Transfer Objects (DTOs)
//!
//! Value objects shared across the client core: formatted market views,
//! quote previews, positions, and dashboard bundles.
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Status / side enums**: serialize to their wire strings
//!   (`"ACTIVE"`, `"PAUSED"`, `"1D"`, ...)
//! - **All types**: implement both `Serialize` and `Deserialize`

pub mod market;
pub mod trade;

pub use market::*;
pub use trade::*;
