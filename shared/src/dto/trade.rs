//! # Trade & Position DTOs
//!
//! Quote previews, swap positions, health status, token balances, and the
//! aggregated dashboard bundles the read layer assembles.

use serde::{Deserialize, Serialize};

use super::market::MarketView;

/// An exact token amount plus its display form.
///
/// `base_units` is the decimal rendering of the raw integer and stays
/// exact; `formatted` is the human value and is lossy above ~2^53 base
/// units. Anything that feeds a transaction must use `base_units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub base_units: String,
    pub formatted: f64,
}

/// ERC-20 balance for one account, with the token's decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub balance: TokenAmount,
    pub decimals: u8,
}

/// On-chain quote for a prospective swap, unit-converted for display.
///
/// Every figure here comes verbatim from the protocol's quote entrypoint;
/// the client never derives them independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePreview {
    /// Spot oracle rate the quote was priced against, bps.
    pub oracle_rate_bps: u64,
    /// Rate the position would actually receive, bps.
    pub final_rate_bps: u64,
    /// Pool-imbalance adjustment applied to the base rate, bps.
    pub imbalance_adjustment_bps: i64,
    pub collateral_required: TokenAmount,
    pub lp_collateral_locked: TokenAmount,
    /// Utilization cap of the market the quote belongs to, percent.
    pub utilization_cap_pct: f64,
}

/// On-chain quote for a given side and notional, decoded and scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub base_rate_bps: u64,
    pub final_rate_bps: u64,
    pub imbalance_adjustment_bps: i64,
    pub required_collateral: TokenAmount,
    pub lp_collateral_to_lock: TokenAmount,
}

/// Pool analytics for the market dashboard.
///
/// Deliberately carries only ratios and counters, so it can be fetched
/// concurrently with the market snapshot (no dependency on the market's
/// decimals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolAnalytics {
    pub utilization_pct: f64,
    /// Fixed/floating imbalance, percent of total notional.
    pub imbalance_pct: f64,
    pub fixed_taker_count: u64,
    pub floating_taker_count: u64,
}

/// A single open or settled swap position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapView {
    pub swap_id: String,
    pub pair_id: u64,
    /// `"FIXED"` or `"FLOATING"`.
    pub side: String,
    pub notional: TokenAmount,
    pub collateral: TokenAmount,
    pub entry_rate_pct: f64,
    pub start_time: u64,
    pub maturity_time: u64,
    pub is_active: bool,
}

/// Liquidation health for one swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub margin_ratio_pct: f64,
    pub liquidation_threshold_pct: f64,
    pub is_liquidatable: bool,
}

/// Market page bundle: market plus analytics, fetched concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDashboard {
    pub market: MarketView,
    pub analytics: PoolAnalytics,
}

/// Swap position bundle: position, health, and live TWA rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapDashboard {
    pub swap: SwapView,
    pub health: HealthStatus,
    pub twa_rate_bps: u64,
}

/// Preview term selector for the trade dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Duration {
    #[serde(rename = "1D")]
    D1,
    #[serde(rename = "7D")]
    D7,
    #[serde(rename = "30D")]
    D30,
}

impl Duration {
    pub fn days(&self) -> u32 {
        match self {
            Duration::D1 => 1,
            Duration::D7 => 7,
            Duration::D30 => 30,
        }
    }
}
