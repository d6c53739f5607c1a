//! Core library for the MMN client SDK: address, amount, and nonce
//! validation, and exact amount formatting.

pub mod amount;
pub mod error;
pub mod output;
pub mod types;
pub mod validation;

pub use amount::{format_amount, parse_amount, DEFAULT_DECIMALS};
pub use error::{ErrorKind, MmnError, Result};
pub use output::{truncate_address, AgentError, OutputMode};
pub use types::{Address, Amount, Nonce, TransferRequest, ValidationReport, ADDRESS_LENGTH};
pub use validation::{
    is_valid_user_id, validate_address, validate_amount, validate_nonce, validate_transfer,
    ValidationResult,
};
