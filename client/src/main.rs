//! # RateForge Terminal
//!
//! Thin entry point: load environment, initialize tracing, validate the
//! configuration, and log a market dashboard snapshot for the requested
//! pair.

use tracing::info;
use tracing_subscriber::EnvFilter;

use client::core::config::Config;
use client::services::api::market::get_market_dashboard;
use client::services::rpc::RpcClient;
use shared::utils::{format_amount, truncate_address};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("client=info,warn")),
        )
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let pair_id = std::env::args().nth(1).unwrap_or_else(|| "1".to_string());
    let client = RpcClient::new(config);

    let dashboard = get_market_dashboard(&client, &pair_id).await?;
    let market = &dashboard.market;

    info!(
        pair_id = market.pair_id,
        status = ?market.status,
        collateral_token = %truncate_address(&market.collateral_token),
        rate_pct = market.rate.current_pct,
        term_days = market.params.swap_term_days,
        available_liquidity = %format_amount(market.pool.available_liquidity),
        utilization_pct = dashboard.analytics.utilization_pct,
        "Market dashboard loaded"
    );

    Ok(())
}
