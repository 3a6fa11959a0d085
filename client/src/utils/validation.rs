//! Validation and sanitizing for user-entered amounts

/// Result of validating one input field.
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Strip a raw amount string down to digits plus at most one decimal
/// separator. Extra separators after the first are dropped.
pub fn sanitize_decimal_input(raw: &str) -> String {
    let mut clean = String::with_capacity(raw.len());
    let mut seen_separator = false;

    for c in raw.chars() {
        match c {
            '0'..='9' => clean.push(c),
            '.' if !seen_separator => {
                seen_separator = true;
                clean.push(c);
            }
            _ => {}
        }
    }

    clean
}

/// Parse a sanitized amount string. Partial input - empty string or a lone
/// separator - is zero, not an error; the user is mid-keystroke.
pub fn parse_amount(raw: &str) -> f64 {
    let clean = sanitize_decimal_input(raw);
    if clean.is_empty() || clean == "." {
        return 0.0;
    }
    clean.parse().unwrap_or(0.0)
}

/// Clamp an amount to `[0, balance]` when the wallet balance is known, or
/// just to non-negative when it is not.
pub fn clamp_to_balance(amount: f64, balance: Option<f64>) -> f64 {
    let amount = amount.max(0.0);
    match balance {
        Some(max) => amount.min(max),
        None => amount,
    }
}

/// Quick-select helper: a percentage of the balance, rounded to 2 decimal
/// places for the input field.
pub fn percent_of_balance(balance: f64, percent: u32) -> f64 {
    (balance * percent as f64).round() / 100.0
}

/// Validate an amount before it reaches batch construction.
pub fn validate_amount(amount: f64) -> ValidationResult {
    if !amount.is_finite() {
        return ValidationResult::err("Amount must be a number");
    }

    if amount <= 0.0 {
        return ValidationResult::err("Amount must be greater than 0");
    }

    ValidationResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_digits_and_one_dot() {
        assert_eq!(sanitize_decimal_input("12.5"), "12.5");
        assert_eq!(sanitize_decimal_input("1,200.50"), "1200.50");
        assert_eq!(sanitize_decimal_input("12.5.7"), "12.57");
        assert_eq!(sanitize_decimal_input("abc"), "");
    }

    #[test]
    fn test_parse_amount_partial_input_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount("$12.5"), 12.5);
    }

    #[test]
    fn test_clamp_to_balance() {
        assert_eq!(clamp_to_balance(50.0, Some(100.0)), 50.0);
        assert_eq!(clamp_to_balance(150.0, Some(100.0)), 100.0);
        assert_eq!(clamp_to_balance(-5.0, Some(100.0)), 0.0);
        // unknown balance: only the lower bound applies
        assert_eq!(clamp_to_balance(1e9, None), 1e9);
        assert_eq!(clamp_to_balance(-1.0, None), 0.0);
    }

    #[test]
    fn test_percent_of_balance() {
        assert_eq!(percent_of_balance(1000.0, 25), 250.0);
        assert_eq!(percent_of_balance(75.5, 50), 37.75);
        assert_eq!(percent_of_balance(100.0, 100), 100.0);
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1.0).is_valid);
        assert!(!validate_amount(0.0).is_valid);
        assert!(!validate_amount(-1.0).is_valid);
        assert!(!validate_amount(f64::NAN).is_valid);
    }
}
