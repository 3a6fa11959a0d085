//! # RateForge Client Core
//!
//! Headless client core for the RateForge interest-rate-swap protocol:
//! configuration, typed RPC reads, market formatting, preview arithmetic,
//! transaction batch submission, and generation-tagged fetch state.
//!
//! Rendering is out of scope; this crate ends where display state begins.

pub mod app;
pub mod core;
pub mod preview;
pub mod services;
pub mod utils;
