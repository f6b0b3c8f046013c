//! Gitea and Forgejo.
//!
//! The event name is sent in `X-Gitea-Event`. Signatures are bare hex
//! HMAC-SHA256 in `X-Gitea-Signature`, without an algorithm prefix.

use crate::{
    auth::{CredentialScheme, HmacAlgorithm},
    pipeline::{Identification, Provider, Webhook},
    providers::shapes::GitPush,
    registry::{Schema, StaticRegistry},
    Event, ProviderKind,
};

pub const EVENT_HEADER: &str = "X-Gitea-Event";
pub const SIGNATURE_HEADER: &str = "X-Gitea-Signature";

pub const CREATE: Event = Event::from_static("create");
pub const DELETE: Event = Event::from_static("delete");
pub const FORK: Event = Event::from_static("fork");
pub const PUSH: Event = Event::from_static("push");
pub const ISSUES: Event = Event::from_static("issues");
pub const ISSUE_ASSIGN: Event = Event::from_static("issue_assign");
pub const ISSUE_LABEL: Event = Event::from_static("issue_label");
pub const ISSUE_MILESTONE: Event = Event::from_static("issue_milestone");
pub const ISSUE_COMMENT: Event = Event::from_static("issue_comment");
pub const PULL_REQUEST: Event = Event::from_static("pull_request");
pub const PULL_REQUEST_ASSIGN: Event = Event::from_static("pull_request_assign");
pub const PULL_REQUEST_LABEL: Event = Event::from_static("pull_request_label");
pub const PULL_REQUEST_MILESTONE: Event = Event::from_static("pull_request_milestone");
pub const PULL_REQUEST_COMMENT: Event = Event::from_static("pull_request_comment");
pub const PULL_REQUEST_REVIEW: Event = Event::from_static("pull_request_review");
pub const PULL_REQUEST_SYNC: Event = Event::from_static("pull_request_sync");
pub const REPOSITORY: Event = Event::from_static("repository");
pub const RELEASE: Event = Event::from_static("release");

// Label, assignment and milestone changes reuse the issue and pull request
// shapes; pull request comments arrive as issue comments.
const SCHEMAS: &[(Event, Schema)] = &[
    (CREATE, Schema::new("CreatePayload")),
    (DELETE, Schema::new("DeletePayload")),
    (FORK, Schema::new("ForkPayload")),
    (PUSH, Schema::typed::<GitPush>("PushPayload")),
    (ISSUES, Schema::new("IssuePayload")),
    (ISSUE_ASSIGN, Schema::new("IssuePayload")),
    (ISSUE_LABEL, Schema::new("IssuePayload")),
    (ISSUE_MILESTONE, Schema::new("IssuePayload")),
    (ISSUE_COMMENT, Schema::new("IssueCommentPayload")),
    (PULL_REQUEST, Schema::new("PullRequestPayload")),
    (PULL_REQUEST_ASSIGN, Schema::new("PullRequestPayload")),
    (PULL_REQUEST_LABEL, Schema::new("PullRequestPayload")),
    (PULL_REQUEST_MILESTONE, Schema::new("PullRequestPayload")),
    (PULL_REQUEST_COMMENT, Schema::new("IssueCommentPayload")),
    (PULL_REQUEST_REVIEW, Schema::new("PullRequestPayload")),
    (PULL_REQUEST_SYNC, Schema::new("PullRequestPayload")),
    (REPOSITORY, Schema::new("RepositoryPayload")),
    (RELEASE, Schema::new("ReleasePayload")),
];

/// Marker for Gitea.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gitea;

impl Provider for Gitea {
    const KIND: ProviderKind = ProviderKind::Gitea;
    const IDENTIFICATION: Identification = Identification::Header(EVENT_HEADER);
    const CREDENTIALS: CredentialScheme = CredentialScheme::HmacSignature {
        header: SIGNATURE_HEADER,
        prefix: None,
        algorithm: HmacAlgorithm::Sha256,
    };
    const REGISTRY: StaticRegistry = StaticRegistry::new(SCHEMAS);
}

pub type GiteaWebhook = Webhook<Gitea>;
