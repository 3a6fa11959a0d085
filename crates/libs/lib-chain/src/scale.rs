//! # Decimal Scaler
//!
//! Converts between human-decimal token quantities and integer base units,
//! and between basis points and percentages.
//!
//! ## Precision Contract
//!
//! - `to_base_units` / `whole_to_base_units` produce exact integers and are
//!   the only paths allowed to feed transaction calldata.
//! - `to_human` is display-only: any base-unit magnitude beyond ~2^53 loses
//!   precision in the f64 result. Callers that need exactness must stay on
//!   the integer path and never round-trip through a human float.
//!
//! ## Rounding Rule
//!
//! Human-to-base-unit conversion rounds half away from zero (`f64::round`).
//! The rule is observable in constructed calldata amounts, so it is fixed
//! here rather than left to callers.

use primitive_types::U256;

use crate::error::ChainError;

const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Exactly representable integer bound for f64 (2^53).
const F64_EXACT_BOUND: f64 = 9_007_199_254_740_992.0;

/// Convert a human-decimal quantity to integer base units.
///
/// Multiplies by `10^decimals` and rounds half away from zero. Fails before
/// any network call if the amount is negative, NaN/infinite, or scales to a
/// value of 2^256 or more.
///
/// # Example
///
/// ```rust
/// use lib_chain::scale::to_base_units;
/// use primitive_types::U256;
///
/// assert_eq!(to_base_units(12.5, 6).unwrap(), U256::from(12_500_000u64));
/// ```
pub fn to_base_units(human: f64, decimals: u8) -> Result<U256, ChainError> {
    if !human.is_finite() {
        return Err(ChainError::NonFiniteAmount);
    }
    if human < 0.0 {
        return Err(ChainError::NegativeAmount(human));
    }

    let scaled = (human * 10f64.powi(decimals as i32)).round();
    if !scaled.is_finite() {
        return Err(ChainError::Range(format!("{human} at {decimals} decimals")));
    }
    integral_to_u256(scaled)
        .ok_or_else(|| ChainError::Range(format!("{human} at {decimals} decimals")))
}

/// Exact integer path for whole-token amounts.
///
/// `amount * 10^decimals` with checked arithmetic; no float is involved, so
/// the result is exact for any representable product. Transaction
/// construction uses this path whenever the human amount is integral
/// (faucet mints, whole-token supplies).
pub fn whole_to_base_units(amount: u64, decimals: u8) -> Result<U256, ChainError> {
    U256::from(amount)
        .checked_mul(pow10(decimals)?)
        .ok_or_else(|| ChainError::Range(format!("{amount} at {decimals} decimals")))
}

/// Convert integer base units to a human-decimal value for display.
///
/// Lossy above ~2^53 base units; see the module-level precision contract.
pub fn to_human(base_units: U256, decimals: u8) -> f64 {
    u256_to_f64(base_units) / 10f64.powi(decimals as i32)
}

/// Basis points to percent: `500 bps == 5.0 %`.
pub fn bps_to_percent(bps: i64) -> f64 {
    bps as f64 / 100.0
}

/// Percent to basis points, rounded half away from zero.
///
/// Exact inverse of [`bps_to_percent`] only when the percent is already a
/// multiple of 0.01.
pub fn percent_to_bps(percent: f64) -> i64 {
    (percent * 100.0).round() as i64
}

/// Seconds to days, for swap-term display.
pub fn seconds_to_days(seconds: u64) -> f64 {
    seconds as f64 / SECONDS_PER_DAY
}

/// Seconds to minutes, for hold-period display.
pub fn seconds_to_minutes(seconds: u64) -> f64 {
    seconds as f64 / SECONDS_PER_MINUTE
}

/// `10^decimals` as a checked 256-bit value.
fn pow10(decimals: u8) -> Result<U256, ChainError> {
    U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .ok_or_else(|| ChainError::Range(format!("10^{decimals} exceeds 2^256")))
}

/// Exact conversion of a non-negative integral f64 into a 256-bit integer.
///
/// Values below 2^53 fit a u64 directly. Larger values are rebuilt from the
/// float's mantissa and exponent so magnitudes above 2^64 convert without
/// truncation. Returns `None` at 2^256 or above.
fn integral_to_u256(value: f64) -> Option<U256> {
    debug_assert!(value.is_finite() && value >= 0.0);

    if value < F64_EXACT_BOUND {
        return Some(U256::from(value as u64));
    }

    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64 - 1075;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);

    // value >= 2^53 guarantees a positive exponent here
    let bit_len = 64 - i64::from(mantissa.leading_zeros()) + exponent;
    if bit_len > 256 {
        return None;
    }
    Some(U256::from(mantissa) << (exponent as usize))
}

/// Lossy widening of a 256-bit integer into f64, limb by limb.
fn u256_to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .enumerate()
        .map(|(i, &limb)| limb as f64 * 2f64.powi(64 * i as i32))
        .sum()
}
