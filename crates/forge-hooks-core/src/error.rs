//! Error types for webhook parsing and hook construction.
//!
//! [`ParseError`] is a flat taxonomy: every [`crate::Webhook::parse`] call
//! returns either a complete payload or exactly one of these kinds. Nothing
//! inside the pipeline retries or logs them; the caller decides how a failure
//! maps onto its HTTP response.

use crate::{Event, ProviderKind};
use std::fmt;
use thiserror::Error;

/// Failure of a single [`crate::Webhook::parse`] call.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid HTTP method '{method}', webhooks must be delivered with POST")]
    InvalidMethod { method: String },

    #[error("missing or empty event header '{header}'")]
    MissingEventHeader { header: &'static str },

    #[error("no events specified to parse")]
    NoEventsSpecified,

    #[error("event '{event}' is not subscribed")]
    UnsubscribedEvent { event: Event },

    #[error("request body is empty or could not be read")]
    EmptyOrUnreadableBody {
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("missing authentication header '{header}'")]
    AuthHeaderMissing { header: &'static str },

    #[error("{method} verification failed")]
    AuthVerificationFailed { method: AuthMethod },

    #[error("unknown event {event:?}")]
    UnknownEvent { event: String },

    #[error("unknown system hook event (object_kind {object_kind:?}, event_name {event_name:?})")]
    UnknownSystemHookEvent {
        object_kind: String,
        event_name: String,
    },

    #[error("failed to decode payload as {schema}")]
    DecodeError {
        schema: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ParseError {
    /// Check if the request was rejected for missing or invalid credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthHeaderMissing { .. } | Self::AuthVerificationFailed { .. }
        )
    }

    /// Stable snake_case name of the error kind, for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidMethod { .. } => "invalid_method",
            Self::MissingEventHeader { .. } => "missing_event_header",
            Self::NoEventsSpecified => "no_events_specified",
            Self::UnsubscribedEvent { .. } => "unsubscribed_event",
            Self::EmptyOrUnreadableBody { .. } => "empty_or_unreadable_body",
            Self::AuthHeaderMissing { .. } => "auth_header_missing",
            Self::AuthVerificationFailed { .. } => "auth_verification_failed",
            Self::UnknownEvent { .. } => "unknown_event",
            Self::UnknownSystemHookEvent { .. } => "unknown_system_hook_event",
            Self::DecodeError { .. } => "decode_error",
        }
    }

    pub(crate) fn empty_body() -> Self {
        Self::EmptyOrUnreadableBody { source: None }
    }

    pub(crate) fn auth_failed(method: AuthMethod) -> Self {
        Self::AuthVerificationFailed { method }
    }
}

/// Credential check that rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    BasicAuth,
    HookUuid,
    HmacSignature,
    TokenDigest,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BasicAuth => "basic auth",
            Self::HookUuid => "hook UUID",
            Self::HmacSignature => "HMAC signature",
            Self::TokenDigest => "token digest",
        };
        f.write_str(name)
    }
}

/// Failure to build a [`crate::WebhookConfig`] from its options.
///
/// Construction is atomic: when any option is rejected no hook is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("option '{option}' is not supported by the {provider} provider")]
    UnsupportedOption {
        provider: ProviderKind,
        option: &'static str,
    },

    #[error("option '{option}' was given an empty value")]
    EmptyCredential { option: &'static str },
}

/// Failure to compute an HMAC signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to create HMAC instance: {message}")]
pub struct SigningError {
    pub message: String,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
