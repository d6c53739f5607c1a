//! Error taxonomy shared by every layer of the SDK.

use std::convert::Infallible;
use std::fmt::{self, Display};

use serde::Serialize;
use thiserror::Error;

/// Failure category attached to every [`MmnError`].
///
/// Callers dispatch on the kind rather than on distinct error types. This
/// crate only ever produces [`ErrorKind::Validation`]; the remaining kinds are
/// raised by the transaction, transport, and proof layers built on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Transaction,
    Validation,
    Network,
    Auth,
}

impl ErrorKind {
    /// Stable string identifier used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transaction => "transaction",
            ErrorKind::Validation => "validation",
            ErrorKind::Network => "network",
            ErrorKind::Auth => "auth",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct MmnError {
    kind: ErrorKind,
    message: String,
}

impl MmnError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transaction, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Diagnostic text without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}

// Lets infallible integer conversions feed APIs generic over `TryInto<Amount>`.
impl From<Infallible> for MmnError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

pub type Result<T> = std::result::Result<T, MmnError>;
