//! Monetary amount normalization.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::NUMERIC_TOKEN;
use crate::models::guest::AMOUNT_NA;

/// Normalize an amount fragment to an unsigned two-decimal string.
///
/// The first numeric token (optional sign, comma-grouped digits, optional
/// fraction) is taken; thousands separators are stripped and the magnitude
/// rendered with exactly two fraction digits. Return-guest credits post as
/// negative charges on the report, so the sign is always dropped. No token
/// yields `"N/A"`.
pub fn normalize_amount(raw: &str) -> String {
    let token = match NUMERIC_TOKEN.find(raw) {
        Some(m) => m.as_str().replace(',', ""),
        None => return AMOUNT_NA.to_string(),
    };

    match Decimal::from_str(&token) {
        Ok(value) => format!("{:.2}", value.abs()),
        Err(_) => AMOUNT_NA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_amounts_lose_the_sign() {
        assert_eq!(normalize_amount("-100.00"), "100.00");
        assert_eq!(normalize_amount("Credit -35.5"), "35.50");
    }

    #[test]
    fn test_currency_and_separators() {
        assert_eq!(normalize_amount("$1,234.5"), "1234.50");
        assert_eq!(normalize_amount("$ 2,000"), "2000.00");
        assert_eq!(normalize_amount("12,345,678.90"), "12345678.90");
    }

    #[test]
    fn test_plain_integers() {
        assert_eq!(normalize_amount("1185"), "1185.00");
        assert_eq!(normalize_amount("0"), "0.00");
    }

    #[test]
    fn test_no_numeric_token() {
        assert_eq!(normalize_amount("no numbers here"), "N/A");
        assert_eq!(normalize_amount(""), "N/A");
        assert_eq!(normalize_amount("$-"), "N/A");
    }

    #[test]
    fn test_first_token_wins() {
        assert_eq!(normalize_amount("-100.00 then 250.00"), "100.00");
    }

    #[test]
    fn test_never_negative() {
        for input in ["-1", "-0.01", "-9,999.99", "-12345"] {
            assert!(!normalize_amount(input).starts_with('-'), "{input}");
        }
    }
}
