//! Output helpers for human and agent modes.

use serde::Serialize;

use crate::error::{ErrorKind, MmnError};

/// Human (TTY) vs Agent (non-interactive) output selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Agent,
}

/// Agent-mode error payload, written to stderr as a single JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct AgentError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AgentError {
    /// Payload for a rejected check; validation failures exit with code 1.
    pub fn from_error(check: &str, err: &MmnError) -> Self {
        Self {
            error: format!("{check}_failed"),
            code: 1,
            kind: Some(err.kind()),
            message: Some(err.message().to_string()),
        }
    }
}

/// Truncate long addresses for human-readable tables.
pub fn truncate_address(addr: &str) -> String {
    let s = addr.trim();
    if s.chars().count() <= 14 {
        return s.to_string();
    }

    let start: String = s.chars().take(6).collect();
    let end: String = s
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    format!("{start}...{end}")
}
