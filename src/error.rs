//! Error type for lookup fetches, transforms and plan-code resolution.

use crate::domain::LookupDomain;
use thiserror::Error;

/// Failures surfaced by the lookup layer.
///
/// Transport-class variants (`Transport`, `Status`, `Decode`) mean the
/// backend could not be read. `MissingMapping` and `MalformedTime` mean the
/// backend answered but its reference data is not what the portal expects.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{domain} request failed: {message}")]
    Transport {
        domain: LookupDomain,
        message: String,
    },

    #[error("{domain} endpoint returned {status}: {body}")]
    Status {
        domain: LookupDomain,
        status: u16,
        body: String,
    },

    #[error("{domain} response could not be decoded: {message}")]
    Decode {
        domain: LookupDomain,
        message: String,
    },

    #[error("Malformed time value: '{value}'")]
    MalformedTime { value: String },

    #[error("No active plan type configured for code '{code}'")]
    MissingMapping { code: String },

    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

impl LookupError {
    pub fn transport(domain: LookupDomain, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            domain,
            message: err.to_string(),
        }
    }

    pub fn decode(domain: LookupDomain, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            domain,
            message: err.to_string(),
        }
    }

    pub fn malformed_time(value: impl Into<String>) -> Self {
        Self::MalformedTime {
            value: value.into(),
        }
    }

    /// True when the backend could not be read at all or answered with an error.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Status { .. } | Self::Decode { .. }
        )
    }

    /// True when the reference data itself is missing or unusable.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingMapping { .. }
                | Self::MalformedTime { .. }
                | Self::InvalidUrl(_)
                | Self::ClientSetup(_)
        )
    }
}
