//! Azure DevOps service hooks.
//!
//! Azure DevOps sends no event header. Every body carries a common envelope
//! whose `eventType` field names the event, so identification decodes that
//! envelope first and the full payload second. Service hooks can be
//! configured with HTTP Basic credentials.

use crate::{
    auth::CredentialScheme,
    decode::decode_envelope,
    pipeline::{Identification, Provider, Webhook},
    providers::shapes::AzureGitPush,
    registry::{Schema, StaticRegistry},
    Event, ParseError, ProviderKind,
};
use serde::Deserialize;

pub const GIT_PUSH: Event = Event::from_static("git.push");
pub const GIT_PULL_REQUEST_CREATED: Event = Event::from_static("git.pullrequest.created");
pub const GIT_PULL_REQUEST_UPDATED: Event = Event::from_static("git.pullrequest.updated");
pub const GIT_PULL_REQUEST_MERGED: Event = Event::from_static("git.pullrequest.merged");
pub const BUILD_COMPLETE: Event = Event::from_static("build.complete");

const SCHEMAS: &[(Event, Schema)] = &[
    (GIT_PUSH, Schema::typed::<AzureGitPush>("GitPushEvent")),
    (GIT_PULL_REQUEST_CREATED, Schema::new("GitPullRequestEvent")),
    (GIT_PULL_REQUEST_UPDATED, Schema::new("GitPullRequestEvent")),
    (GIT_PULL_REQUEST_MERGED, Schema::new("GitPullRequestEvent")),
    (BUILD_COMPLETE, Schema::new("BuildCompleteEvent")),
];

#[derive(Debug, Deserialize)]
struct BasicEvent {
    #[serde(rename = "eventType", default)]
    event_type: Option<String>,
}

/// A missing or `null` `eventType` yields an empty identifier, which no table
/// knows.
fn identify(body: &[u8]) -> Result<Event, ParseError> {
    let envelope: BasicEvent = decode_envelope("BasicEvent", body)?;
    Ok(Event::new(envelope.event_type.unwrap_or_default()))
}

/// Marker for Azure DevOps.
#[derive(Debug, Clone, Copy, Default)]
pub struct AzureDevOps;

impl Provider for AzureDevOps {
    const KIND: ProviderKind = ProviderKind::AzureDevOps;
    const IDENTIFICATION: Identification = Identification::Envelope(identify);
    const CREDENTIALS: CredentialScheme = CredentialScheme::BasicAuth;
    const REGISTRY: StaticRegistry = StaticRegistry::new(SCHEMAS);
}

pub type AzureDevOpsWebhook = Webhook<AzureDevOps>;
