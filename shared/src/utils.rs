//! # Shared Utility Functions
//!
//! Display helpers used across the client core.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format a hex address with ellipsis (first N and
//!   last M characters)
//! - [`truncate_address`] - Alias for `format_address` with defaults
//!
//! ```rust
//! use shared::utils::truncate_address;
//!
//! let address = "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";
//! assert_eq!(truncate_address(address), "0x49...4dc7");
//! ```

/// Format an address by showing the first `prefix_len` and last
/// `suffix_len` characters.
///
/// Addresses shorter than `prefix_len + suffix_len` are returned as-is.
/// Hex addresses are ASCII-only, so byte slicing is safe.
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format an address with the default 4-character prefix and suffix.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}

/// Format a token amount with thousands separators and two decimals.
///
/// ```rust
/// use shared::utils::format_amount;
///
/// assert_eq!(format_amount(1234567.891), "1,234,567.89");
/// assert_eq!(format_amount(0.5), "0.50");
/// ```
pub fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{cents:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7";
        assert_eq!(format_address(addr, 4, 4), "0x49...4dc7");
        assert_eq!(format_address(addr, 6, 6), "0x49d3...004dc7");
    }

    #[test]
    fn test_format_address_short_input() {
        assert_eq!(format_address("0x1", 4, 4), "0x1");
        assert_eq!(format_address("", 4, 4), "");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(1000.0), "1,000.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-42.5), "-42.50");
    }
}
