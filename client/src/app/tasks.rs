//! # Fetch Tasks
//!
//! Async tasks that fan reads out to the protocol service and deliver
//! results back through the event channel. Each task captures the fetch
//! generation it started under; the state layer drops results whose
//! generation was superseded while the request was in flight.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use tokio::spawn;
use tracing::debug;

use lib_chain::Address;

use crate::app::state::{AppEvent, AppState};
use crate::core::service::ProtocolService;

/// Fetch the market dashboard for a pair.
///
/// Skips if a dashboard fetch is already in flight (prevents task
/// pileup); otherwise spawns the read and sends the tagged result.
pub fn fetch_market_dashboard(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    service: Arc<dyn ProtocolService>,
    pair_id: String,
) {
    // Capture the generation and set the flag with minimal lock duration
    let generation = {
        let mut state = state.write();
        if state.fetching_dashboard {
            return;
        }
        state.fetching_dashboard = true;
        state.generation()
    }; // Lock released here

    spawn(async move {
        let result = service
            .get_market_dashboard(&pair_id)
            .await
            .map_err(|e| e.to_string());

        {
            state.write().fetching_dashboard = false;
        }

        let _ = event_tx
            .send(AppEvent::DashboardLoaded { generation, result })
            .await;
    });
}

/// Fetch the wallet balance for the active account on a token.
///
/// No-op when the session is not connected; the balance simply stays
/// unknown, which is not an error.
pub fn fetch_wallet_balance(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    service: Arc<dyn ProtocolService>,
    token: Address,
) {
    let (generation, account) = {
        let mut state = state.write();
        let Some(account) = state.account.account() else {
            debug!("Skipping balance fetch: not connected");
            return;
        };
        if state.fetching_balance {
            return;
        }
        state.fetching_balance = true;
        (state.generation(), account)
    };

    spawn(async move {
        let result = service
            .get_token_balance(token, account)
            .await
            .map_err(|e| e.to_string());

        {
            state.write().fetching_balance = false;
        }

        let _ = event_tx
            .send(AppEvent::BalanceLoaded { generation, result })
            .await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use lib_chain::{SwapSide, U256};
    use shared::dto::market::{MarketView, ProtocolConfigView};
    use shared::dto::trade::{
        HealthStatus, MarketDashboard, PoolAnalytics, SwapDashboard, SwapQuote, SwapView,
        TokenAmount, TokenBalance, TradePreview,
    };

    use crate::core::error::{AppError, Result};
    use crate::services::session::SessionStatus;

    struct MockService {
        balance: f64,
    }

    #[async_trait]
    impl ProtocolService for MockService {
        async fn get_market(&self, _pair_id: &str) -> Result<MarketView> {
            Err(AppError::Rpc("unused".to_string()))
        }
        async fn get_pool_analytics(&self, _pair_id: &str) -> Result<PoolAnalytics> {
            Err(AppError::Rpc("unused".to_string()))
        }
        async fn get_protocol_config(&self) -> Result<ProtocolConfigView> {
            Err(AppError::Rpc("unused".to_string()))
        }
        async fn get_swap(&self, _swap_id: U256, _decimals: u8) -> Result<SwapView> {
            Err(AppError::Rpc("unused".to_string()))
        }
        async fn get_swap_health(&self, _swap_id: U256) -> Result<HealthStatus> {
            Err(AppError::Rpc("unused".to_string()))
        }
        async fn get_current_twa(&self, _swap_id: U256) -> Result<u64> {
            Err(AppError::Rpc("unused".to_string()))
        }
        async fn get_swap_quote(
            &self,
            _pair_id: &str,
            _side: SwapSide,
            _notional: U256,
            _decimals: u8,
        ) -> Result<SwapQuote> {
            Err(AppError::Rpc("unused".to_string()))
        }
        async fn get_token_balance(
            &self,
            _token: Address,
            _account: Address,
        ) -> Result<TokenBalance> {
            Ok(TokenBalance {
                balance: TokenAmount {
                    base_units: format!("{}", (self.balance * 1e6) as u64),
                    formatted: self.balance,
                },
                decimals: 6,
            })
        }
        async fn get_market_dashboard(&self, _pair_id: &str) -> Result<MarketDashboard> {
            Err(AppError::Rpc("market not deployed".to_string()))
        }
        async fn get_trade_preview(
            &self,
            _pair_id: &str,
            _side: SwapSide,
            _notional: U256,
        ) -> Result<TradePreview> {
            Err(AppError::Rpc("unused".to_string()))
        }
        async fn get_swap_dashboard(&self, _swap_id: U256, _decimals: u8) -> Result<SwapDashboard> {
            Err(AppError::Rpc("unused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_balance_fetch_delivers_tagged_event() {
        let state = Arc::new(RwLock::new(AppState::new()));
        state
            .write()
            .set_account(SessionStatus::Connected(Address::parse("0x3").unwrap()));
        let (tx, rx) = async_channel::unbounded();
        let service = Arc::new(MockService { balance: 42.0 });

        fetch_wallet_balance(
            state.clone(),
            tx,
            service,
            Address::parse("0x7").unwrap(),
        );

        let event = rx.recv().await.unwrap();
        state.write().apply(event);

        let state = state.read();
        assert_eq!(state.wallet_balance.as_ref().unwrap().balance.formatted, 42.0);
        assert!(!state.fetching_balance);
    }

    #[tokio::test]
    async fn test_balance_fetch_skipped_when_disconnected() {
        let state = Arc::new(RwLock::new(AppState::new()));
        let (tx, rx) = async_channel::unbounded();
        let service = Arc::new(MockService { balance: 42.0 });

        fetch_wallet_balance(state, tx, service, Address::parse("0x7").unwrap());

        // no task was spawned, so the channel closes with no event
        assert!(rx.is_empty());
    }

    #[tokio::test]
    async fn test_stale_dashboard_result_dropped_after_pair_switch() {
        let state = Arc::new(RwLock::new(AppState::new()));
        state.write().set_active_pair(Some("1".to_string()));
        let (tx, rx) = async_channel::unbounded();
        let service = Arc::new(MockService { balance: 0.0 });

        fetch_market_dashboard(state.clone(), tx, service, "1".to_string());

        // pair changes while the fetch is in flight
        state.write().set_active_pair(Some("2".to_string()));

        let event = rx.recv().await.unwrap();
        state.write().apply(event);

        // the error from the superseded fetch never surfaces
        let state = state.read();
        assert!(state.last_error.is_none());
        assert!(state.dashboard.is_none());
    }

    #[tokio::test]
    async fn test_dashboard_fetch_deduplicates_while_in_flight() {
        let state = Arc::new(RwLock::new(AppState::new()));
        state.write().fetching_dashboard = true;
        let (tx, rx) = async_channel::unbounded();
        let service = Arc::new(MockService { balance: 0.0 });

        fetch_market_dashboard(state, tx, service, "1".to_string());
        assert!(rx.is_empty());
    }
}
