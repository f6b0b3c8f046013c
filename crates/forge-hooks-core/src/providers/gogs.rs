//! Gogs.
//!
//! Same wire conventions as Gitea with its own header names:
//! `X-Gogs-Event` for the event and bare hex HMAC-SHA256 in
//! `X-Gogs-Signature`.

use crate::{
    auth::{CredentialScheme, HmacAlgorithm},
    pipeline::{Identification, Provider, Webhook},
    providers::shapes::GitPush,
    registry::{Schema, StaticRegistry},
    Event, ProviderKind,
};

pub const EVENT_HEADER: &str = "X-Gogs-Event";
pub const SIGNATURE_HEADER: &str = "X-Gogs-Signature";

pub const CREATE: Event = Event::from_static("create");
pub const DELETE: Event = Event::from_static("delete");
pub const FORK: Event = Event::from_static("fork");
pub const PUSH: Event = Event::from_static("push");
pub const ISSUES: Event = Event::from_static("issues");
pub const ISSUE_COMMENT: Event = Event::from_static("issue_comment");
pub const PULL_REQUEST: Event = Event::from_static("pull_request");
pub const RELEASE: Event = Event::from_static("release");

const SCHEMAS: &[(Event, Schema)] = &[
    (CREATE, Schema::new("CreatePayload")),
    (DELETE, Schema::new("DeletePayload")),
    (FORK, Schema::new("ForkPayload")),
    (PUSH, Schema::typed::<GitPush>("PushPayload")),
    (ISSUES, Schema::new("IssuesPayload")),
    (ISSUE_COMMENT, Schema::new("IssueCommentPayload")),
    (PULL_REQUEST, Schema::new("PullRequestPayload")),
    (RELEASE, Schema::new("ReleasePayload")),
];

/// Marker for Gogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gogs;

impl Provider for Gogs {
    const KIND: ProviderKind = ProviderKind::Gogs;
    const IDENTIFICATION: Identification = Identification::Header(EVENT_HEADER);
    const CREDENTIALS: CredentialScheme = CredentialScheme::HmacSignature {
        header: SIGNATURE_HEADER,
        prefix: None,
        algorithm: HmacAlgorithm::Sha256,
    };
    const REGISTRY: StaticRegistry = StaticRegistry::new(SCHEMAS);
}

pub type GogsWebhook = Webhook<Gogs>;
