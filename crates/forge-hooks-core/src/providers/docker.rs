//! Docker Hub.
//!
//! Docker Hub only delivers one kind of notification, a repository push, and
//! neither names it in a header nor signs it. The body is recognised by its
//! `push_data` object and identified as [`BUILD`].
//!
//! A JSON object without `push_data` (or with `push_data: null`) is not taken
//! to be a build: it is rejected as [`ParseError::UnknownEvent`] with an empty
//! identifier instead of being decoded as `BuildPayload`.

use crate::{
    auth::CredentialScheme,
    decode::decode_envelope,
    pipeline::{Identification, Provider, Webhook},
    providers::shapes::DockerPush,
    registry::{Schema, StaticRegistry},
    Event, ParseError, ProviderKind,
};
use serde::{de::IgnoredAny, Deserialize};

pub const BUILD: Event = Event::from_static("build");

const SCHEMAS: &[(Event, Schema)] = &[(BUILD, Schema::typed::<DockerPush>("BuildPayload"))];

#[derive(Debug, Deserialize)]
struct PushEnvelope {
    push_data: Option<IgnoredAny>,
}

fn identify(body: &[u8]) -> Result<Event, ParseError> {
    let envelope: PushEnvelope = decode_envelope("BuildPayload", body)?;
    match envelope.push_data {
        Some(_) => Ok(BUILD),
        None => Ok(Event::new("")),
    }
}

/// Marker for Docker Hub.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerHub;

impl Provider for DockerHub {
    const KIND: ProviderKind = ProviderKind::DockerHub;
    const IDENTIFICATION: Identification = Identification::Envelope(identify);
    const CREDENTIALS: CredentialScheme = CredentialScheme::Unauthenticated;
    const REGISTRY: StaticRegistry = StaticRegistry::new(SCHEMAS);
}

pub type DockerHubWebhook = Webhook<DockerHub>;
