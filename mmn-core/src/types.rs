//! Data types shared between CLI and core.

use std::fmt::{self, Display};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{MmnError, Result};
use crate::validation::{self, ValidationResult};

/// Byte length of an ED25519 public key, and therefore of an address.
pub const ADDRESS_LENGTH: usize = 32;

/// Account address: a raw ED25519 public key, written as base-58 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl FromStr for Address {
    type Err = MmnError;

    fn from_str(s: &str) -> Result<Self> {
        validation::decode_address(s).map(Self)
    }
}

impl TryFrom<String> for Address {
    type Error = MmnError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_base58()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

/// Token quantity in smallest indivisible units.
///
/// Backed by an arbitrary-precision integer so token supplies beyond the
/// 64-bit and 128-bit ranges are represented exactly. The value is signed:
/// sign rules belong to the call site (see [`validation::validate_amount`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(BigInt);

impl Amount {
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_bigint(self) -> BigInt {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = MmnError;

    /// Accepts decimal digits with an optional leading sign; surrounding
    /// whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(MmnError::validation(format!("invalid integer amount: '{s}'")));
        }

        let magnitude = digits
            .parse::<BigUint>()
            .map_err(|_| MmnError::validation(format!("invalid integer amount: '{s}'")))?;
        let sign = if trimmed.starts_with('-') {
            Sign::Minus
        } else {
            Sign::Plus
        };
        Ok(Self(BigInt::from_biguint(sign, magnitude)))
    }
}

impl TryFrom<&str> for Amount {
    type Error = MmnError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<String> for Amount {
    type Error = MmnError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<&String> for Amount {
    type Error = MmnError;

    fn try_from(value: &String) -> Result<Self> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.0.to_string()
    }
}

impl From<BigInt> for Amount {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

macro_rules! amount_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Amount {
                fn from(value: $ty) -> Self {
                    Self(BigInt::from(value))
                }
            }
        )*
    };
}

amount_from_primitive!(i32, i64, i128, u32, u64, u128);

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-account transaction sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(u64);

impl Nonce {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl TryFrom<i64> for Nonce {
    type Error = MmnError;

    fn try_from(value: i64) -> Result<Self> {
        validation::validate_nonce(value)?;
        Ok(Self(value.unsigned_abs()))
    }
}

impl From<Nonce> for u64 {
    fn from(value: Nonce) -> Self {
        value.0
    }
}

impl Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied inputs for a transfer, as received before construction.
///
/// Balance and amount stay textual: they come from RPC responses and user
/// input and may exceed every machine integer width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub recipient: String,
    pub balance: String,
    pub amount: String,
    pub nonce: i64,
}

/// The `(is_valid, message)` view of a [`ValidationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub error: String,
}

impl ValidationReport {
    pub fn as_pair(&self) -> (bool, &str) {
        (self.valid, &self.error)
    }

    pub fn into_result(self) -> ValidationResult {
        if self.valid {
            Ok(())
        } else {
            Err(MmnError::validation(self.error))
        }
    }
}

impl From<ValidationResult> for ValidationReport {
    fn from(result: ValidationResult) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                error: String::new(),
            },
            Err(err) => Self {
                valid: false,
                error: err.message().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn amount_parses_signed_and_padded_input() {
        assert_eq!("  42 ".parse::<Amount>().unwrap(), Amount::from(42_u64));
        assert_eq!("+7".parse::<Amount>().unwrap(), Amount::from(7_i64));
        assert_eq!("-5".parse::<Amount>().unwrap(), Amount::from(-5_i64));
        assert!("-5".parse::<Amount>().unwrap().is_negative());
    }

    #[test]
    fn amount_rejects_non_integer_text() {
        for input in ["", "-", "1.5", "abc", "1_000", "1e6", "--1"] {
            let err = input.parse::<Amount>().expect_err(input);
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert!(err.message().contains("invalid integer amount"));
        }
    }

    #[test]
    fn amount_exceeds_u128_range() {
        let text = "340282366920938463463374607431768211456000";
        let amount: Amount = text.parse().unwrap();
        assert_eq!(amount.to_string(), text);
        assert!(amount > Amount::from(u128::MAX));
    }

    #[test]
    fn amount_serializes_as_string() {
        let amount = Amount::from(1_500_000_u64);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"1500000\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
        assert!(serde_json::from_str::<Amount>("\"1.5\"").is_err());
    }

    #[test]
    fn address_roundtrips_through_base58() {
        let address = Address::from_bytes([7_u8; ADDRESS_LENGTH]);
        let text = address.to_string();
        assert_eq!(text.parse::<Address>().unwrap(), address);

        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{text}\""));
    }

    #[test]
    fn address_rejects_short_key() {
        let short = bs58::encode([1_u8; 31]).into_string();
        let err = short.parse::<Address>().unwrap_err();
        assert_eq!(err.message(), "Invalid address length: 31 bytes");
    }

    #[test]
    fn nonce_from_negative_is_rejected() {
        assert_eq!(Nonce::try_from(5_i64).unwrap().as_u64(), 5);
        let err = Nonce::try_from(-1_i64).unwrap_err();
        assert_eq!(err.message(), "Nonce cannot be negative");
        assert_eq!(Nonce::new(u64::MAX).next(), None);
        assert_eq!(Nonce::new(1).next(), Some(Nonce::new(2)));
    }

    #[test]
    fn report_converts_both_ways() {
        let ok = ValidationReport::from(Ok(()));
        assert_eq!(ok.as_pair(), (true, ""));
        assert!(ok.into_result().is_ok());

        let bad = ValidationReport::from(Err(MmnError::validation("Amount cannot be negative")));
        assert_eq!(bad.as_pair(), (false, "Amount cannot be negative"));
        let err = bad.into_result().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
