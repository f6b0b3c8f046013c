//! # Forge-Hooks Core
//!
//! Intake pipeline for webhook deliveries sent by source-control and CI
//! providers: GitHub, GitLab, Bitbucket Cloud, Bitbucket Server, Gitea, Gogs,
//! Azure DevOps and Docker Hub.
//!
//! A single [`Webhook::parse`] call takes one inbound HTTP request and either
//! returns a decoded [`Payload`] or exactly one [`ParseError`].
//!
//! ## Pipeline
//!
//! ```text
//! RawRequest ─► method check ─► event identification ─► credential check
//!            ─► schema lookup ─► subscription filter ─► body read (once)
//!            ─► body signature check ─► classification ─► JSON decode
//! ```
//!
//! GitLab wraps some deliveries in "System Hook" and "Job Hook" envelopes.
//! Those are reclassified into the concrete event they carry and re-enter the
//! subscription filter under the concrete identifier.
//!
//! ## Usage
//!
//! ```rust
//! use forge_hooks_core::{
//!     providers::github::{self, GitHubWebhook},
//!     sign_payload, HmacAlgorithm, RawRequest, WebhookOption,
//! };
//! use http::HeaderMap;
//!
//! let hook = GitHubWebhook::new([WebhookOption::secret("s3cr3t")]).unwrap();
//!
//! let body = br#"{"ref":"refs/heads/main"}"#;
//! let signature = sign_payload(HmacAlgorithm::Sha256, b"s3cr3t", body).unwrap();
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("X-GitHub-Event", "push".parse().unwrap());
//! headers.insert(
//!     "X-Hub-Signature-256",
//!     format!("sha256={signature}").parse().unwrap(),
//! );
//!
//! let payload = hook
//!     .parse(RawRequest::post(headers, &body[..]), &[github::PUSH])
//!     .unwrap();
//! assert_eq!(payload.get("ref").and_then(|v| v.as_str()), Some("refs/heads/main"));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub mod auth;
pub mod config;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod registry;
pub mod request;
pub mod subscription;

pub use auth::{sign_payload, CredentialScheme, HmacAlgorithm};
pub use config::{Secret, WebhookConfig, WebhookOption};
pub use decode::Payload;
pub use error::{AuthMethod, ConfigError, ParseError, SigningError};
pub use pipeline::{Classification, Identification, Provider, Webhook};
pub use providers::AnyWebhook;
pub use registry::{Schema, SchemaRegistry, StaticRegistry};
pub use request::RawRequest;
pub use subscription::SubscriptionSet;

// ============================================================================
// Event
// ============================================================================

/// Provider-scoped identifier naming the kind of occurrence a delivery carries.
///
/// For header-identified providers the identifier is the literal header value
/// (`push`, `Merge Request Hook`, `repo:push`, ...). Equality is exact string
/// equality; no case folding or trimming is applied.
///
/// Identifiers known at compile time are `const` values built with
/// [`Event::from_static`]; identifiers read off the wire are owned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Cow<'static, str>);

impl Event {
    /// Create an identifier from a string literal.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Create an identifier from a runtime value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Get the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Event {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Event {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// ProviderKind
// ============================================================================

/// The webhook sources understood by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "gitlab")]
    GitLab,
    #[serde(rename = "bitbucket")]
    Bitbucket,
    #[serde(rename = "bitbucket-server")]
    BitbucketServer,
    #[serde(rename = "gitea")]
    Gitea,
    #[serde(rename = "gogs")]
    Gogs,
    #[serde(rename = "azure-devops")]
    AzureDevOps,
    #[serde(rename = "docker-hub")]
    DockerHub,
}

impl ProviderKind {
    /// Every supported provider, in declaration order.
    pub const ALL: [ProviderKind; 8] = [
        Self::GitHub,
        Self::GitLab,
        Self::Bitbucket,
        Self::BitbucketServer,
        Self::Gitea,
        Self::Gogs,
        Self::AzureDevOps,
        Self::DockerHub,
    ];

    /// Stable lowercase name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::BitbucketServer => "bitbucket-server",
            Self::Gitea => "gitea",
            Self::Gogs => "gogs",
            Self::AzureDevOps => "azure-devops",
            Self::DockerHub => "docker-hub",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a provider name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider '{name}'")]
pub struct UnknownProvider {
    pub name: String,
}

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProvider {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
