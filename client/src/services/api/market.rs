//! # Protocol Read Endpoints
//!
//! Typed wrappers over `forge_call`, one per read entrypoint, plus the
//! market snapshot formatter and the concurrent dashboard aggregators.
//!
//! ## Aggregation Contract
//!
//! Dashboard bundles fan out their independent sub-queries concurrently
//! and join with all-or-nothing semantics: if any sub-query fails, the
//! bundle fails and no partial result is returned. There is no implicit
//! retry anywhere in this module.

use serde::Deserialize;
use serde_json::Value;

use lib_chain::{scale, Address, SwapSide, U256, WireU256};
use shared::dto::market::{
    MarketParams, MarketStats, MarketStatus, MarketView, PoolView, ProtocolConfigView, RateView,
};
use shared::dto::trade::{
    HealthStatus, MarketDashboard, PoolAnalytics, SwapDashboard, SwapQuote, SwapView, TradePreview,
};

use crate::core::error::{AppError, Result};
use crate::services::api::token_amount;
use crate::services::rpc::RpcClient;

// ==================== RAW WIRE TYPES ====================

/// Market record exactly as the contract returns it. All `u256` fields are
/// two-limb wire values; felt addresses are decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMarket {
    pub pair_id: u64,
    /// Status enum variant as a JSON object. The discriminator is the tag
    /// alone: an empty object is the active variant.
    pub status: Value,
    pub rate_oracle: String,
    pub curator: String,
    pub collateral_token: String,
    pub decimals: u8,
    pub rate_index: RawRateIndex,
    pub pool: RawPool,
    pub params: RawParams,
    pub total_swaps_created: u64,
    pub active_swap_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRateIndex {
    pub last_rate_bps: u64,
    pub last_update_time: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPool {
    pub total_collateral: WireU256,
    pub locked_for_fixed: WireU256,
    pub locked_for_floating: WireU256,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawParams {
    pub liquidation_threshold_bps: u64,
    pub initial_margin_multiplier_bps: u64,
    pub min_margin_floor_bps: u64,
    pub swap_term_seconds: u64,
    pub min_hold_period_seconds: u64,
    pub swap_fee_bps: u64,
    pub early_exit_fee_bps: u64,
    pub liquidation_bonus_bps: u64,
    pub fee_spread_bps: u64,
    pub max_utilization_bps: u64,
    pub min_notional: WireU256,
    pub max_notional_per_swap: WireU256,
    pub max_oracle_staleness_seconds: u64,
    pub max_rate_change_per_update_bps: u64,
    pub min_rate_bps: u64,
    pub max_rate_bps: u64,
    pub is_lp_permissioned: u8,
}

#[derive(Debug, Clone, Deserialize)]
struct RawAnalytics {
    utilization_bps: u64,
    imbalance_bps: i64,
    fixed_taker_count: u64,
    floating_taker_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct RawProtocolConfig {
    protocol_fee_bps: u64,
    treasury: String,
    max_markets: u64,
    paused: u8,
}

#[derive(Debug, Clone, Deserialize)]
struct RawSwap {
    swap_id: WireU256,
    pair_id: u64,
    side: u8,
    notional: WireU256,
    collateral: WireU256,
    entry_rate_bps: u64,
    start_time: u64,
    maturity_time: u64,
    is_active: u8,
}

#[derive(Debug, Clone, Deserialize)]
struct RawHealth {
    margin_ratio_bps: u64,
    liquidation_threshold_bps: u64,
    is_liquidatable: u8,
}

#[derive(Debug, Clone, Deserialize)]
struct RawQuote {
    base_rate_bps: u64,
    final_rate_bps: u64,
    imbalance_adjustment_bps: i64,
    required_collateral: WireU256,
    lp_collateral_to_lock: WireU256,
}

// ==================== MARKET FORMATTER ====================

/// Format a raw on-chain market record into a [`MarketView`].
///
/// Pure function; constructed fresh on every read. Monetary figures are
/// decoded through the wire codec and scaled with the market's own
/// decimals field, never a hardcoded value. Rates arrive in basis points
/// and leave as percentages.
pub fn format_market(raw: RawMarket) -> Result<MarketView> {
    let decimals = raw.decimals;
    let amount = |w: &WireU256| scale::to_human(w.to_u256(), decimals);
    let pct = |bps: u64| scale::bps_to_percent(bps as i64);

    let total_collateral = amount(&raw.pool.total_collateral);
    let locked_fixed = amount(&raw.pool.locked_for_fixed);
    let locked_floating = amount(&raw.pool.locked_for_floating);

    Ok(MarketView {
        pair_id: raw.pair_id,
        status: format_status(&raw.status),

        oracle: to_hex_address(&raw.rate_oracle)?,
        curator: to_hex_address(&raw.curator)?,
        collateral_token: to_hex_address(&raw.collateral_token)?,

        decimals,

        rate: RateView {
            current_pct: pct(raw.rate_index.last_rate_bps),
            last_updated: chrono::DateTime::from_timestamp(
                raw.rate_index.last_update_time as i64,
                0,
            )
            .ok_or_else(|| {
                AppError::Rpc(format!(
                    "invalid rate timestamp: {}",
                    raw.rate_index.last_update_time
                ))
            })?,
        },

        pool: PoolView {
            total_collateral,
            locked_fixed,
            locked_floating,
            // computed after scaling; may go negative on an inconsistent
            // on-chain state and is passed through unclamped
            available_liquidity: total_collateral - locked_fixed - locked_floating,
        },

        params: MarketParams {
            liquidation_threshold_pct: pct(raw.params.liquidation_threshold_bps),
            initial_margin_multiplier_pct: pct(raw.params.initial_margin_multiplier_bps),
            min_margin_floor_pct: pct(raw.params.min_margin_floor_bps),

            swap_term_days: scale::seconds_to_days(raw.params.swap_term_seconds),
            min_hold_period_minutes: scale::seconds_to_minutes(raw.params.min_hold_period_seconds),

            swap_fee_pct: pct(raw.params.swap_fee_bps),
            early_exit_fee_pct: pct(raw.params.early_exit_fee_bps),
            liquidation_bonus_pct: pct(raw.params.liquidation_bonus_bps),
            fee_spread_pct: pct(raw.params.fee_spread_bps),

            max_utilization_pct: pct(raw.params.max_utilization_bps),

            min_notional: amount(&raw.params.min_notional),
            max_notional: amount(&raw.params.max_notional_per_swap),

            max_oracle_staleness_seconds: raw.params.max_oracle_staleness_seconds,
            max_rate_change_pct: pct(raw.params.max_rate_change_per_update_bps),

            min_rate_pct: pct(raw.params.min_rate_bps),
            max_rate_pct: pct(raw.params.max_rate_bps),

            is_lp_permissioned: raw.params.is_lp_permissioned == 1,
        },

        stats: MarketStats {
            total_swaps: raw.total_swaps_created,
            active_swaps: raw.active_swap_count,
        },
    })
}

/// Status is a tag-only discriminator: the empty variant object means
/// active; any populated variant means paused. No value comparison.
fn format_status(status: &Value) -> MarketStatus {
    match status.as_object() {
        Some(fields) if fields.is_empty() => MarketStatus::Active,
        _ => MarketStatus::Paused,
    }
}

fn to_hex_address(felt: &str) -> Result<String> {
    Ok(Address::parse(felt)?.to_hex())
}

fn decode_side(side: u8) -> Result<&'static str> {
    match side {
        0 => Ok("FIXED"),
        1 => Ok("FLOATING"),
        other => Err(AppError::Rpc(format!("unknown swap side: {other}"))),
    }
}

fn decode_bps(wire: &WireU256, what: &str) -> Result<u64> {
    let value = wire.to_u256();
    if value.bits() > 64 {
        return Err(AppError::Rpc(format!("{what} out of range: {value}")));
    }
    Ok(value.as_u64())
}

// ==================== READ ENDPOINTS ====================

/// Formatted market snapshot for a pair.
#[tracing::instrument(skip(client))]
pub async fn get_market(client: &RpcClient, pair_id: &str) -> Result<MarketView> {
    let raw: RawMarket = client
        .call_as(
            client.config().protocol_address,
            "get_market",
            vec![pair_id.to_string()],
        )
        .await?;
    format_market(raw)
}

/// Pool analytics for a pair.
pub async fn get_pool_analytics(client: &RpcClient, pair_id: &str) -> Result<PoolAnalytics> {
    let raw: RawAnalytics = client
        .call_as(
            client.config().protocol_address,
            "get_pool_analytics",
            vec![pair_id.to_string()],
        )
        .await?;
    Ok(PoolAnalytics {
        utilization_pct: scale::bps_to_percent(raw.utilization_bps as i64),
        imbalance_pct: scale::bps_to_percent(raw.imbalance_bps),
        fixed_taker_count: raw.fixed_taker_count,
        floating_taker_count: raw.floating_taker_count,
    })
}

/// Protocol-level risk params.
pub async fn get_protocol_config(client: &RpcClient) -> Result<ProtocolConfigView> {
    let raw: RawProtocolConfig = client
        .call_as(
            client.config().protocol_address,
            "get_protocol_config",
            vec![],
        )
        .await?;
    Ok(ProtocolConfigView {
        protocol_fee_pct: scale::bps_to_percent(raw.protocol_fee_bps as i64),
        treasury: to_hex_address(&raw.treasury)?,
        max_markets: raw.max_markets,
        paused: raw.paused == 1,
    })
}

/// Full swap struct. `decimals` are the swap market's decimals.
pub async fn get_swap(client: &RpcClient, swap_id: U256, decimals: u8) -> Result<SwapView> {
    let raw: RawSwap = client
        .call_as(
            client.config().protocol_address,
            "get_swap",
            WireU256::from_u256(swap_id).to_calldata().to_vec(),
        )
        .await?;
    Ok(SwapView {
        swap_id: raw.swap_id.to_u256().to_string(),
        pair_id: raw.pair_id,
        side: decode_side(raw.side)?.to_string(),
        notional: token_amount(&raw.notional, decimals),
        collateral: token_amount(&raw.collateral, decimals),
        entry_rate_pct: scale::bps_to_percent(raw.entry_rate_bps as i64),
        start_time: raw.start_time,
        maturity_time: raw.maturity_time,
        is_active: raw.is_active == 1,
    })
}

/// Health / liquidation info.
pub async fn get_swap_health(client: &RpcClient, swap_id: U256) -> Result<HealthStatus> {
    let raw: RawHealth = client
        .call_as(
            client.config().protocol_address,
            "get_health_status",
            WireU256::from_u256(swap_id).to_calldata().to_vec(),
        )
        .await?;
    Ok(HealthStatus {
        margin_ratio_pct: scale::bps_to_percent(raw.margin_ratio_bps as i64),
        liquidation_threshold_pct: scale::bps_to_percent(raw.liquidation_threshold_bps as i64),
        is_liquidatable: raw.is_liquidatable == 1,
    })
}

/// Current TWA rate for live PnL preview, in basis points.
pub async fn get_current_twa(client: &RpcClient, swap_id: U256) -> Result<u64> {
    let raw: WireU256 = client
        .call_as(
            client.config().protocol_address,
            "get_current_twa",
            WireU256::from_u256(swap_id).to_calldata().to_vec(),
        )
        .await?;
    decode_bps(&raw, "twa rate")
}

/// On-chain quote for a side and base-unit notional.
///
/// The quote figures are authoritative; this wrapper only unit-converts
/// them for display.
pub async fn get_swap_quote(
    client: &RpcClient,
    pair_id: &str,
    side: SwapSide,
    notional: U256,
    decimals: u8,
) -> Result<SwapQuote> {
    let raw = get_raw_quote(client, pair_id, side, notional).await?;
    Ok(format_quote(raw, decimals))
}

async fn get_raw_quote(
    client: &RpcClient,
    pair_id: &str,
    side: SwapSide,
    notional: U256,
) -> Result<RawQuote> {
    let mut calldata = vec![pair_id.to_string(), side.discriminant().to_string()];
    calldata.extend(WireU256::from_u256(notional).to_calldata());
    client
        .call_as(client.config().protocol_address, "get_swap_quote", calldata)
        .await
}

fn format_quote(raw: RawQuote, decimals: u8) -> SwapQuote {
    SwapQuote {
        base_rate_bps: raw.base_rate_bps,
        final_rate_bps: raw.final_rate_bps,
        imbalance_adjustment_bps: raw.imbalance_adjustment_bps,
        required_collateral: token_amount(&raw.required_collateral, decimals),
        lp_collateral_to_lock: token_amount(&raw.lp_collateral_to_lock, decimals),
    }
}

// ==================== DASHBOARD AGGREGATORS ====================

/// Market page bundle: market + analytics, fetched concurrently.
#[tracing::instrument(skip(client))]
pub async fn get_market_dashboard(client: &RpcClient, pair_id: &str) -> Result<MarketDashboard> {
    let (market, analytics) = tokio::try_join!(
        get_market(client, pair_id),
        get_pool_analytics(client, pair_id),
    )?;

    Ok(MarketDashboard { market, analytics })
}

/// Trade preview bundle: market + quote, fetched concurrently.
///
/// `notional` is in base units; the human conversion happened at the input
/// boundary where the market's decimals were already known.
pub async fn get_trade_preview(
    client: &RpcClient,
    pair_id: &str,
    side: SwapSide,
    notional: U256,
) -> Result<TradePreview> {
    let (market, raw_quote) = tokio::try_join!(
        get_market(client, pair_id),
        get_raw_quote(client, pair_id, side, notional),
    )?;

    let quote = format_quote(raw_quote, market.decimals);
    Ok(TradePreview {
        oracle_rate_bps: quote.base_rate_bps,
        final_rate_bps: quote.final_rate_bps,
        imbalance_adjustment_bps: quote.imbalance_adjustment_bps,
        collateral_required: quote.required_collateral,
        lp_collateral_locked: quote.lp_collateral_to_lock,
        utilization_cap_pct: market.params.max_utilization_pct,
    })
}

/// Swap position bundle: swap + health + live TWA, fetched concurrently.
pub async fn get_swap_dashboard(
    client: &RpcClient,
    swap_id: U256,
    decimals: u8,
) -> Result<SwapDashboard> {
    let (swap, health, twa_rate_bps) = tokio::try_join!(
        get_swap(client, swap_id, decimals),
        get_swap_health(client, swap_id),
        get_current_twa(client, swap_id),
    )?;

    Ok(SwapDashboard {
        swap,
        health,
        twa_rate_bps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(low: u64) -> Value {
        json!({ "low": low.to_string(), "high": "0" })
    }

    fn raw_market_json(status: Value) -> Value {
        json!({
            "pair_id": 1,
            "status": status,
            "rate_oracle": "5",
            "curator": "600",
            "collateral_token": "77705923",
            "decimals": 6,
            "rate_index": {
                "last_rate_bps": 512,
                "last_update_time": 1_700_000_000u64,
            },
            "pool": {
                "total_collateral": wire(1_000_000_000),
                "locked_for_fixed": wire(200_000_000),
                "locked_for_floating": wire(100_000_000),
            },
            "params": {
                "liquidation_threshold_bps": 8_000,
                "initial_margin_multiplier_bps": 40_000,
                "min_margin_floor_bps": 500,
                "swap_term_seconds": 86_400u64 * 30,
                "min_hold_period_seconds": 600,
                "swap_fee_bps": 10,
                "early_exit_fee_bps": 50,
                "liquidation_bonus_bps": 300,
                "fee_spread_bps": 25,
                "max_utilization_bps": 9_000,
                "min_notional": wire(10_000_000),
                "max_notional_per_swap": wire(500_000_000_000),
                "max_oracle_staleness_seconds": 3_600,
                "max_rate_change_per_update_bps": 200,
                "min_rate_bps": 100,
                "max_rate_bps": 2_000,
                "is_lp_permissioned": 0,
            },
            "total_swaps_created": 42,
            "active_swap_count": 7,
        })
    }

    fn formatted(status: Value) -> MarketView {
        let raw: RawMarket = serde_json::from_value(raw_market_json(status)).unwrap();
        format_market(raw).unwrap()
    }

    #[test]
    fn test_status_empty_variant_is_active() {
        assert_eq!(formatted(json!({})).status, MarketStatus::Active);
    }

    #[test]
    fn test_status_populated_variant_is_paused() {
        let view = formatted(json!({ "paused_at": 1_699_999_000u64 }));
        assert_eq!(view.status, MarketStatus::Paused);
    }

    #[test]
    fn test_pool_scaled_by_market_decimals() {
        let view = formatted(json!({}));
        assert_eq!(view.pool.total_collateral, 1000.0);
        assert_eq!(view.pool.locked_fixed, 200.0);
        assert_eq!(view.pool.locked_floating, 100.0);
        assert_eq!(view.pool.available_liquidity, 700.0);
    }

    #[test]
    fn test_available_liquidity_can_go_negative() {
        let mut raw = raw_market_json(json!({}));
        raw["pool"]["total_collateral"] = wire(100_000_000);
        let raw: RawMarket = serde_json::from_value(raw).unwrap();
        let view = format_market(raw).unwrap();
        assert_eq!(view.pool.available_liquidity, -200.0);
    }

    #[test]
    fn test_rates_exposed_as_percent() {
        let view = formatted(json!({}));
        assert_eq!(view.rate.current_pct, 5.12);
        assert_eq!(view.params.liquidation_threshold_pct, 80.0);
        assert_eq!(view.params.max_utilization_pct, 90.0);
        assert_eq!(view.params.max_rate_pct, 20.0);
    }

    #[test]
    fn test_time_params_in_display_units() {
        let view = formatted(json!({}));
        assert_eq!(view.params.swap_term_days, 30.0);
        assert_eq!(view.params.min_hold_period_minutes, 10.0);
        assert_eq!(view.params.max_oracle_staleness_seconds, 3_600);
    }

    #[test]
    fn test_addresses_rendered_as_hex() {
        let view = formatted(json!({}));
        assert_eq!(view.oracle, "0x5");
        assert_eq!(view.curator, "0x258");
        assert_eq!(view.collateral_token, "0x4a1b2c3");
    }

    #[test]
    fn test_notional_bounds_scaled() {
        let view = formatted(json!({}));
        assert_eq!(view.params.min_notional, 10.0);
        assert_eq!(view.params.max_notional, 500_000.0);
    }

    #[test]
    fn test_lp_permission_flag() {
        let view = formatted(json!({}));
        assert!(!view.params.is_lp_permissioned);

        let mut raw = raw_market_json(json!({}));
        raw["params"]["is_lp_permissioned"] = json!(1);
        let raw: RawMarket = serde_json::from_value(raw).unwrap();
        assert!(format_market(raw).unwrap().params.is_lp_permissioned);
    }

    #[test]
    fn test_decode_side() {
        assert_eq!(decode_side(0).unwrap(), "FIXED");
        assert_eq!(decode_side(1).unwrap(), "FLOATING");
        assert!(decode_side(2).is_err());
    }

    #[test]
    fn test_decode_bps_rejects_oversized_values() {
        let ok = WireU256::from_u256(U256::from(500u64));
        assert_eq!(decode_bps(&ok, "rate").unwrap(), 500);

        let too_big = WireU256::from_u256(U256::from(u128::MAX));
        assert!(decode_bps(&too_big, "rate").is_err());
    }

    #[test]
    fn test_format_quote_scales_amounts() {
        let raw = RawQuote {
            base_rate_bps: 500,
            final_rate_bps: 523,
            imbalance_adjustment_bps: 23,
            required_collateral: WireU256::from_u256(U256::from(250_000_000u64)),
            lp_collateral_to_lock: WireU256::from_u256(U256::from(1_000_000_000u64)),
        };
        let quote = format_quote(raw, 6);
        assert_eq!(quote.required_collateral.formatted, 250.0);
        assert_eq!(quote.required_collateral.base_units, "250000000");
        assert_eq!(quote.lp_collateral_to_lock.formatted, 1000.0);
    }
}
