//! # Trade Preview Arithmetic
//!
//! Display figures for the swap configuration dialog: implied fixed rate,
//! notional from leverage, estimated daily earnings, spread and expiry.
//!
//! Everything here is presentation arithmetic over f64 and never feeds a
//! transaction. The authoritative price is the on-chain quote
//! (`final_rate_bps` in [`shared::dto::trade::TradePreview`]); the implied
//! fixed rate below is a heuristic and must be labelled as such wherever
//! it is shown.

use chrono::{DateTime, Utc};

use lib_chain::scale;
use shared::dto::trade::Duration;

/// Term premium subtracted from the spot rate per duration, percent.
///
/// Display constants, not protocol invariants; the contract prices terms
/// on its own curve. Monotonically increasing with duration.
const TERM_PREMIUM_PCT: [(Duration, f64); 3] = [
    (Duration::D1, 0.08),
    (Duration::D7, 0.22),
    (Duration::D30, 0.55),
];

/// Capital-efficiency multiplier shown per duration.
const EFFICIENCY_MULTIPLIER: [(Duration, u32); 3] = [
    (Duration::D1, 120),
    (Duration::D7, 45),
    (Duration::D30, 15),
];

const DAYS_PER_YEAR: f64 = 365.0;

/// Term premium for a duration, percent.
pub fn term_premium_pct(duration: Duration) -> f64 {
    lookup(&TERM_PREMIUM_PCT, duration)
}

/// Capital-efficiency multiplier for a duration.
pub fn efficiency_multiplier(duration: Duration) -> u32 {
    lookup(&EFFICIENCY_MULTIPLIER, duration)
}

fn lookup<T: Copy>(table: &[(Duration, T)], duration: Duration) -> T {
    table
        .iter()
        .find(|(d, _)| *d == duration)
        .map(|(_, v)| *v)
        .expect("premium table covers every duration")
}

/// Inputs to the preview: live market figures plus the user's entry.
#[derive(Debug, Clone, Copy)]
pub struct PreviewInputs {
    /// Live spot (floating) rate, percent.
    pub spot_rate_pct: f64,
    /// The market's initial margin multiplier, percent.
    pub initial_margin_multiplier_pct: f64,
    /// User-entered collateral, human units.
    pub collateral: f64,
    pub duration: Duration,
}

/// Computed preview figures for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapPreview {
    /// Notional exposure implied by the collateral and margin multiplier.
    pub notional: f64,
    /// Implied fixed rate: spot minus the term premium. A heuristic,
    /// distinct from the quote's `final_rate_bps`.
    pub effective_rate_pct: f64,
    /// The premium expressed in whole basis points, for the spread label.
    pub spread_bps: i64,
    /// Linear day-count estimate; no compounding.
    pub daily_earnings: f64,
    pub expires_on: DateTime<Utc>,
}

/// Build the preview figures for one dialog state.
///
/// `now` is injected so the expiry is testable; it is display-only and
/// never reaches calldata (chain timestamps come from the latest block).
pub fn build_preview(inputs: PreviewInputs, now: DateTime<Utc>) -> SwapPreview {
    let premium = term_premium_pct(inputs.duration);
    let notional = inputs.collateral * inputs.initial_margin_multiplier_pct / 100.0;
    let effective_rate_pct = inputs.spot_rate_pct - premium;

    SwapPreview {
        notional,
        effective_rate_pct,
        spread_bps: scale::percent_to_bps(premium),
        daily_earnings: notional * (effective_rate_pct / 100.0) / DAYS_PER_YEAR,
        expires_on: now + chrono::Duration::days(inputs.duration.days() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn inputs(duration: Duration) -> PreviewInputs {
        PreviewInputs {
            spot_rate_pct: 5.0,
            initial_margin_multiplier_pct: 400.0,
            collateral: 1000.0,
            duration,
        }
    }

    #[test]
    fn test_premium_increases_with_duration() {
        assert!(term_premium_pct(Duration::D1) < term_premium_pct(Duration::D7));
        assert!(term_premium_pct(Duration::D7) < term_premium_pct(Duration::D30));
    }

    #[test]
    fn test_notional_from_margin_multiplier() {
        let now = Utc::now();
        let preview = build_preview(inputs(Duration::D7), now);
        // 1000 collateral at a 400% multiplier
        assert_eq!(preview.notional, 4000.0);
    }

    #[test]
    fn test_effective_rate_subtracts_premium() {
        let now = Utc::now();
        let preview = build_preview(inputs(Duration::D30), now);
        assert!((preview.effective_rate_pct - 4.45).abs() < 1e-12);
        assert_eq!(preview.spread_bps, 55);
    }

    #[test]
    fn test_daily_earnings_linear_day_count() {
        let now = Utc::now();
        let preview = build_preview(inputs(Duration::D7), now);
        let expected = 4000.0 * ((5.0 - 0.22) / 100.0) / 365.0;
        assert!((preview.daily_earnings - expected).abs() < 1e-12);
    }

    #[test]
    fn test_expiry_adds_term_days() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let preview = build_preview(inputs(Duration::D30), now);
        assert_eq!(preview.expires_on, now + chrono::Duration::days(30));
    }

    #[test]
    fn test_efficiency_multiplier_decreases_with_duration() {
        assert_eq!(efficiency_multiplier(Duration::D1), 120);
        assert_eq!(efficiency_multiplier(Duration::D7), 45);
        assert_eq!(efficiency_multiplier(Duration::D30), 15);
    }
}
