// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          EnvsnapError (~24 bytes)
//!                 |
//!   +------+------+------+------+
//!   |      |      |      |      |
//!   v      v      v      v      v
//! Config  Host  Service  Io   Other
//!  Box    Box    Box    Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config   ParseError, MissingKey, InvalidValue, NotFound
//!   Host     Unavailable, Io           (per-field, never fatal)
//!   Service  Stopped, UnknownSubscription
//!
//! All variants boxed => EnvsnapError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvsnapError`].
pub type EnvsnapResult<T> = std::result::Result<T, EnvsnapError>;

/// Result type for a single host probe.
pub type HostResult<T> = std::result::Result<T, HostQueryError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum EnvsnapError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// A host environment query failed.
    #[error("host query error: {0}")]
    Host(#[from] Box<HostQueryError>),

    /// Snapshot service error.
    #[error("service error: {0}")]
    Service(#[from] Box<ServiceError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for EnvsnapError {
                fn from(err: $error) -> Self {
                    EnvsnapError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    HostQueryError => Host,
    ServiceError => Service,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Host Query Errors ---

/// Failure to read one host environment property.
///
/// These never abort a refresh: the affected field falls back to its
/// default and the remaining probes still run.
#[derive(Debug, Error)]
pub enum HostQueryError {
    /// The property cannot be read on this platform or sandbox.
    #[error("'{field}' is unavailable: {reason}")]
    Unavailable { field: &'static str, reason: String },

    /// Reading the property hit an I/O error.
    #[error("failed to read '{field}': {source}")]
    Io {
        field: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl HostQueryError {
    /// Shorthand for [`HostQueryError::Unavailable`].
    pub fn unavailable(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the snapshot field the failed probe was filling.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Unavailable { field, .. } | Self::Io { field, .. } => field,
        }
    }
}

// --- Service Errors ---

/// Snapshot service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Operation requires a running service.
    #[error("snapshot service is stopped")]
    Stopped,

    /// No subscription registered under this id.
    #[error("unknown subscription id {0}")]
    UnknownSubscription(u64),
}
