//! Pre-flight checks run before a transfer is constructed or submitted.
//!
//! Every validator is a pure function: it never panics on bad input, holds no
//! state, and reports rejection as a [`MmnError`] of kind
//! [`ErrorKind::Validation`](crate::error::ErrorKind::Validation) carrying a
//! fixed, human-readable message.

use tracing::debug;

use crate::error::{MmnError, Result};
use crate::types::{Amount, TransferRequest, ADDRESS_LENGTH};

/// Outcome of a validator: `Ok(())` or a validation-kind [`MmnError`].
pub type ValidationResult = Result<()>;

fn reject(check: &'static str, message: String) -> MmnError {
    debug!(check, reason = %message, "validation rejected input");
    MmnError::validation(message)
}

/// User identifiers only need to be present.
pub fn is_valid_user_id(user_id: &str) -> bool {
    !user_id.is_empty()
}

pub(crate) fn decode_address(address: &str) -> Result<[u8; ADDRESS_LENGTH]> {
    let decoded = bs58::decode(address).into_vec().map_err(|err| {
        reject("address", format!("Invalid base58 encoding: {err}"))
    })?;

    <[u8; ADDRESS_LENGTH]>::try_from(decoded.as_slice()).map_err(|_| {
        reject(
            "address",
            format!("Invalid address length: {} bytes", decoded.len()),
        )
    })
}

/// Check that `address` is base-58 text decoding to a 32-byte public key.
///
/// This is structural only: no checksum, and no curve-membership check, so
/// degenerate keys such as all zeroes are accepted.
pub fn validate_address(address: &str) -> ValidationResult {
    decode_address(address).map(|_| ())
}

/// Check that `amount` can be spent out of `balance`.
///
/// Both arguments are decimal integer strings of arbitrary size. Checks run in
/// a fixed order: number format, negative amount, negative balance, then
/// sufficiency.
pub fn validate_amount(balance: &str, amount: &str) -> ValidationResult {
    let parse = |input: &str| {
        input
            .parse::<Amount>()
            .map_err(|err| reject("amount", format!("Invalid number format: {}", err.message())))
    };
    let balance = parse(balance)?;
    let amount = parse(amount)?;

    if amount.is_negative() {
        return Err(reject("amount", "Amount cannot be negative".to_string()));
    }
    if balance.is_negative() {
        return Err(reject("amount", "Balance cannot be negative".to_string()));
    }
    if amount > balance {
        return Err(reject(
            "amount",
            format!("Insufficient balance: {balance} < {amount}"),
        ));
    }

    Ok(())
}

pub fn validate_nonce(nonce: i64) -> ValidationResult {
    if nonce < 0 {
        return Err(reject("nonce", "Nonce cannot be negative".to_string()));
    }
    Ok(())
}

/// Run the address, amount, and nonce checks for a transfer, in that order,
/// stopping at the first failure.
pub fn validate_transfer(request: &TransferRequest) -> ValidationResult {
    validate_address(&request.recipient)?;
    validate_amount(&request.balance, &request.amount)?;
    validate_nonce(request.nonce)
}
