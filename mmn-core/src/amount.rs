//! Conversion between smallest-unit integers and human decimal strings.
//!
//! Both directions work on decimal digit strings and arbitrary-precision
//! integers; no floating-point value is ever involved, so conversions are
//! exact for any amount and any number of decimals.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Signed;
use tracing::{debug, trace};

use crate::error::{MmnError, Result};
use crate::types::Amount;

/// Fractional digits used when the token does not specify its own.
pub const DEFAULT_DECIMALS: u8 = 6;

fn all_digits(s: &str) -> bool {
    s.bytes().all(|byte| byte.is_ascii_digit())
}

/// Render a smallest-unit amount as a fixed-point decimal string.
///
/// `amount` may be a machine integer, a [`BigInt`], an [`Amount`], or a
/// string of decimal digits with an optional leading sign. The result carries
/// exactly `decimals` fractional digits; with `decimals == 0` no decimal point
/// is emitted.
///
/// ```
/// use mmn_core::format_amount;
///
/// assert_eq!(format_amount(1_500_000, 6).unwrap(), "1.500000");
/// assert_eq!(format_amount("42", 2).unwrap(), "0.42");
/// assert!(format_amount("1.5", 6).is_err());
/// ```
pub fn format_amount<A>(amount: A, decimals: u8) -> Result<String>
where
    A: TryInto<Amount>,
    MmnError: From<A::Error>,
{
    let amount: Amount = match amount.try_into() {
        Ok(amount) => amount,
        Err(err) => {
            let err = MmnError::from(err);
            debug!(decimals, error = %err, "rejected amount for formatting");
            return Err(err);
        }
    };

    let rendered = place_decimal_point(amount.as_bigint(), decimals);
    trace!(%amount, decimals, %rendered, "formatted amount");
    Ok(rendered)
}

fn place_decimal_point(value: &BigInt, decimals: u8) -> String {
    let width = usize::from(decimals);
    let mut digits = value.magnitude().to_string();
    if digits.len() <= width {
        digits = format!("{digits:0>pad$}", pad = width + 1);
    }

    let (whole, frac) = digits.split_at(digits.len() - width);
    let sign = if value.is_negative() { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac}")
    }
}

/// Parse a human decimal string into a smallest-unit integer string.
///
/// The value is scaled by `10^decimals`; fractional digits beyond `decimals`
/// are truncated toward zero.
///
/// ```
/// use mmn_core::parse_amount;
///
/// assert_eq!(parse_amount("1.5", 6).unwrap(), "1500000");
/// assert_eq!(parse_amount("0.0000019", 6).unwrap(), "1");
/// assert!(parse_amount("1,5", 6).is_err());
/// ```
pub fn parse_amount(amount_str: &str, decimals: u8) -> Result<String> {
    let invalid = || {
        debug!(input = amount_str, decimals, "rejected decimal amount");
        MmnError::validation(format!("invalid decimal amount: '{amount_str}'"))
    };

    let trimmed = amount_str.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !all_digits(whole) || !all_digits(frac) {
        return Err(invalid());
    }

    let width = usize::from(decimals);
    let kept = &frac[..frac.len().min(width)];
    let mut scaled = String::with_capacity(whole.len() + width);
    scaled.push_str(whole);
    scaled.push_str(kept);
    scaled.extend(std::iter::repeat('0').take(width - kept.len()));
    if scaled.is_empty() {
        scaled.push('0');
    }

    let magnitude = scaled.parse::<BigUint>().map_err(|_| invalid())?;
    let value = BigInt::from_biguint(sign, magnitude).to_string();
    trace!(input = amount_str, decimals, %value, "parsed amount");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn formats_default_example() {
        assert_eq!(format_amount(1_500_000, DEFAULT_DECIMALS).unwrap(), "1.500000");
    }

    #[test]
    fn formats_small_values_with_leading_zeros() {
        assert_eq!(format_amount(1_u64, 6).unwrap(), "0.000001");
        assert_eq!(format_amount(0_u64, 6).unwrap(), "0.000000");
        assert_eq!(format_amount("999999", 6).unwrap(), "0.999999");
    }

    #[test]
    fn formats_without_point_when_no_decimals() {
        assert_eq!(format_amount(1_500_000_u64, 0).unwrap(), "1500000");
        assert_eq!(format_amount(0_u64, 0).unwrap(), "0");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_amount(-1_500_000_i64, 6).unwrap(), "-1.500000");
        assert_eq!(format_amount("-5", 6).unwrap(), "-0.000005");
        assert_eq!(format_amount("-0", 6).unwrap(), "0.000000");
    }

    #[test]
    fn formats_beyond_u128_without_precision_loss() {
        let raw = "123456789012345678901234567890123456789012345678901234567890";
        assert_eq!(
            format_amount(raw, 18).unwrap(),
            "123456789012345678901234567890123456789012.345678901234567890"
        );
    }

    #[test]
    fn format_rejects_non_integer_input() {
        for input in ["1.5", "abc", "", "1e6"] {
            let err = format_amount(input, 6).expect_err(input);
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn parses_default_example() {
        assert_eq!(parse_amount("1.5", DEFAULT_DECIMALS).unwrap(), "1500000");
    }

    #[test]
    fn parses_integer_and_edge_dots() {
        assert_eq!(parse_amount("10", 6).unwrap(), "10000000");
        assert_eq!(parse_amount(".5", 6).unwrap(), "500000");
        assert_eq!(parse_amount("1.", 6).unwrap(), "1000000");
        assert_eq!(parse_amount(" 2.25 ", 2).unwrap(), "225");
        assert_eq!(parse_amount(".5", 0).unwrap(), "0");
    }

    #[test]
    fn parse_truncates_extra_fraction_digits() {
        assert_eq!(parse_amount("1.9999999", 6).unwrap(), "1999999");
        assert_eq!(parse_amount("-1.9999999", 6).unwrap(), "-1999999");
        assert_eq!(parse_amount("-0.0000001", 6).unwrap(), "0");
    }

    #[test]
    fn parse_is_exact_for_large_values() {
        assert_eq!(
            parse_amount("9007199254740993.123456789012345678", 18).unwrap(),
            "9007199254740993123456789012345678"
        );
    }

    #[test]
    fn parse_rejects_malformed_decimals() {
        for input in ["", ".", "abc", "1,0", "1.2.3", "--1", "+-1", "1e5", "1 000"] {
            let err = parse_amount(input, 6).expect_err(input);
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert!(err.message().contains("invalid decimal amount"));
        }
    }

    proptest! {
        #[test]
        fn property_roundtrip_for_machine_integers(value in any::<u128>(), decimals in 0_u8..=18) {
            let formatted = format_amount(value, decimals).unwrap();
            prop_assert_eq!(parse_amount(&formatted, decimals).unwrap(), value.to_string());
        }

        #[test]
        fn property_roundtrip_for_wide_integers(digits in "[1-9][0-9]{0,80}", decimals in 0_u8..=18) {
            let formatted = format_amount(digits.as_str(), decimals).unwrap();
            prop_assert_eq!(parse_amount(&formatted, decimals).unwrap(), digits);
        }
    }
}
