//! # Application State
//!
//! Shared display state plus the fetch-generation bookkeeping that makes
//! stale results safe to drop.
//!
//! ## Generations
//!
//! Independently triggered reads have no ordering guarantee between them;
//! the last write to display state wins. The exception is identity: when
//! the triggering identity changes (active account, active pair), results
//! from fetches started under the old identity must not land. Each state
//! change that alters identity bumps a generation counter, every spawned
//! fetch carries the generation it started under, and [`AppState::apply`]
//! drops events tagged with a superseded generation. In-flight network
//! calls are not cancelled - only their results are discarded - and a
//! discarded result is not an error.

use shared::dto::trade::{MarketDashboard, TokenBalance};
use tracing::debug;

use crate::services::session::SessionStatus;

/// Results delivered by the fetch tasks, tagged with the generation the
/// fetch started under.
#[derive(Debug)]
pub enum AppEvent {
    DashboardLoaded {
        generation: u64,
        result: Result<MarketDashboard, String>,
    },
    BalanceLoaded {
        generation: u64,
        result: Result<TokenBalance, String>,
    },
}

/// Display-facing state shared between the UI layer and the fetch tasks.
pub struct AppState {
    generation: u64,
    pub account: SessionStatus,
    pub active_pair: Option<String>,
    /// Last successfully loaded dashboard; kept on screen while a refresh
    /// is in flight.
    pub dashboard: Option<MarketDashboard>,
    pub wallet_balance: Option<TokenBalance>,
    pub fetching_dashboard: bool,
    pub fetching_balance: bool,
    pub last_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            generation: 0,
            account: SessionStatus::Disconnected,
            active_pair: None,
            dashboard: None,
            wallet_balance: None,
            fetching_dashboard: false,
            fetching_balance: false,
            last_error: None,
        }
    }

    /// The current fetch generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch the active account. Starts a new fetch generation and clears
    /// account-scoped state.
    pub fn set_account(&mut self, account: SessionStatus) -> u64 {
        self.account = account;
        self.wallet_balance = None;
        self.bump()
    }

    /// Switch the active market pair. Starts a new fetch generation; the
    /// previous dashboard stays visible until fresh data lands.
    pub fn set_active_pair(&mut self, pair_id: Option<String>) -> u64 {
        self.active_pair = pair_id;
        self.bump()
    }

    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a fetch result. Events from a superseded generation are
    /// silently dropped; failures surface in `last_error` for the caller
    /// to display and re-trigger.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::DashboardLoaded { generation, result } => {
                if generation != self.generation {
                    debug!(
                        stale = generation,
                        current = self.generation,
                        "Discarding stale dashboard result"
                    );
                    return;
                }
                match result {
                    Ok(dashboard) => {
                        self.dashboard = Some(dashboard);
                        self.last_error = None;
                    }
                    Err(message) => self.last_error = Some(message),
                }
            }
            AppEvent::BalanceLoaded { generation, result } => {
                if generation != self.generation {
                    debug!(
                        stale = generation,
                        current = self.generation,
                        "Discarding stale balance result"
                    );
                    return;
                }
                match result {
                    Ok(balance) => self.wallet_balance = Some(balance),
                    Err(message) => self.last_error = Some(message),
                }
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
