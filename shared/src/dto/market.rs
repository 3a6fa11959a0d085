//! # Market View DTOs
//!
//! Formatted, human-unit market snapshots as produced by the client's
//! market formatter. These are immutable value objects: every read of a
//! market constructs a fresh view, and a view is never mutated in place.
//!
//! All rate-like fields are percentages (converted from on-chain basis
//! points), all monetary fields are human token units (scaled by the
//! market's own decimals), and all addresses are lowercase `0x` hex.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a market accepts new positions.
///
/// Derived from the on-chain status variant tag alone: the empty variant
/// means active, any populated variant means paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "PAUSED")]
    Paused,
}

impl MarketStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, MarketStatus::Active)
    }
}

/// Live floating rate and its freshness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateView {
    /// Current time-weighted rate, percent.
    pub current_pct: f64,
    /// When the oracle last ticked.
    pub last_updated: DateTime<Utc>,
}

/// Pool balances in human token units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolView {
    pub total_collateral: f64,
    pub locked_fixed: f64,
    pub locked_floating: f64,
    /// `total_collateral - locked_fixed - locked_floating`, computed after
    /// scaling. Negative values are passed through as a signal of an
    /// inconsistent on-chain state, never clamped.
    pub available_liquidity: f64,
}

/// Risk and configuration parameters for one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    pub liquidation_threshold_pct: f64,
    pub initial_margin_multiplier_pct: f64,
    pub min_margin_floor_pct: f64,

    pub swap_term_days: f64,
    pub min_hold_period_minutes: f64,

    pub swap_fee_pct: f64,
    pub early_exit_fee_pct: f64,
    pub liquidation_bonus_pct: f64,
    pub fee_spread_pct: f64,

    pub max_utilization_pct: f64,

    /// Notional bounds in human token units.
    pub min_notional: f64,
    pub max_notional: f64,

    pub max_oracle_staleness_seconds: u64,
    pub max_rate_change_pct: f64,

    pub min_rate_pct: f64,
    pub max_rate_pct: f64,

    pub is_lp_permissioned: bool,
}

/// Lifetime counters for one market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketStats {
    pub total_swaps: u64,
    pub active_swaps: u64,
}

/// Protocol-level configuration, shared by every market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolConfigView {
    pub protocol_fee_pct: f64,
    /// Treasury address, lowercase hex.
    pub treasury: String,
    pub max_markets: u64,
    pub paused: bool,
}

/// A formatted market snapshot.
///
/// Identity is the pair id; two views of the same pair from different reads
/// are distinct snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketView {
    pub pair_id: u64,
    pub status: MarketStatus,

    /// Lowercase hex addresses.
    pub oracle: String,
    pub curator: String,
    pub collateral_token: String,

    pub decimals: u8,

    pub rate: RateView,
    pub pool: PoolView,
    pub params: MarketParams,
    pub stats: MarketStats,
}
