//! Bitbucket Server and Data Center.
//!
//! Shares the `X-Event-Key` header with Bitbucket Cloud but uses its own
//! event names and signs deliveries with HMAC-SHA256 in `X-Hub-Signature`
//! behind a `sha256=` prefix.

use crate::{
    auth::{CredentialScheme, HmacAlgorithm},
    pipeline::{Identification, Provider, Webhook},
    registry::{Schema, StaticRegistry},
    Event, ProviderKind,
};

pub const EVENT_HEADER: &str = "X-Event-Key";
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

pub const DIAGNOSTICS_PING: Event = Event::from_static("diagnostics:ping");
pub const REPOSITORY_FORKED: Event = Event::from_static("repo:forked");
pub const REPOSITORY_MODIFIED: Event = Event::from_static("repo:modified");
pub const REPOSITORY_COMMENT_ADDED: Event = Event::from_static("repo:comment:added");
pub const REPOSITORY_COMMENT_EDITED: Event = Event::from_static("repo:comment:edited");
pub const REPOSITORY_COMMENT_DELETED: Event = Event::from_static("repo:comment:deleted");
pub const REPOSITORY_REFS_CHANGED: Event = Event::from_static("repo:refs_changed");
pub const PULL_REQUEST_OPENED: Event = Event::from_static("pr:opened");
pub const PULL_REQUEST_MERGED: Event = Event::from_static("pr:merged");
pub const PULL_REQUEST_DELETED: Event = Event::from_static("pr:deleted");
pub const PULL_REQUEST_MODIFIED: Event = Event::from_static("pr:modified");
pub const PULL_REQUEST_DECLINED: Event = Event::from_static("pr:declined");
pub const PULL_REQUEST_FROM_REF_UPDATED: Event = Event::from_static("pr:from_ref_updated");
pub const PULL_REQUEST_COMMENT_ADDED: Event = Event::from_static("pr:comment:added");
pub const PULL_REQUEST_COMMENT_EDITED: Event = Event::from_static("pr:comment:edited");
pub const PULL_REQUEST_COMMENT_DELETED: Event = Event::from_static("pr:comment:deleted");
pub const PULL_REQUEST_REVIEWER_UPDATED: Event = Event::from_static("pr:reviewer:updated");
pub const PULL_REQUEST_REVIEWER_APPROVED: Event = Event::from_static("pr:reviewer:approved");
pub const PULL_REQUEST_REVIEWER_UNAPPROVED: Event = Event::from_static("pr:reviewer:unapproved");
pub const PULL_REQUEST_REVIEWER_NEEDS_WORK: Event = Event::from_static("pr:reviewer:needs_work");

const SCHEMAS: &[(Event, Schema)] = &[
    (DIAGNOSTICS_PING, Schema::new("DiagnosticsPingPayload")),
    (REPOSITORY_FORKED, Schema::new("RepositoryForkedPayload")),
    (REPOSITORY_MODIFIED, Schema::new("RepositoryModifiedPayload")),
    (REPOSITORY_COMMENT_ADDED, Schema::new("RepositoryCommentAddedPayload")),
    (REPOSITORY_COMMENT_EDITED, Schema::new("RepositoryCommentEditedPayload")),
    (REPOSITORY_COMMENT_DELETED, Schema::new("RepositoryCommentDeletedPayload")),
    (REPOSITORY_REFS_CHANGED, Schema::new("RepositoryReferenceChangedPayload")),
    (PULL_REQUEST_OPENED, Schema::new("PullRequestOpenedPayload")),
    (PULL_REQUEST_MERGED, Schema::new("PullRequestMergedPayload")),
    (PULL_REQUEST_DELETED, Schema::new("PullRequestDeletedPayload")),
    (PULL_REQUEST_MODIFIED, Schema::new("PullRequestModifiedPayload")),
    (PULL_REQUEST_DECLINED, Schema::new("PullRequestDeclinedPayload")),
    (PULL_REQUEST_FROM_REF_UPDATED, Schema::new("PullRequestFromReferenceUpdatedPayload")),
    (PULL_REQUEST_COMMENT_ADDED, Schema::new("PullRequestCommentAddedPayload")),
    (PULL_REQUEST_COMMENT_EDITED, Schema::new("PullRequestCommentEditedPayload")),
    (PULL_REQUEST_COMMENT_DELETED, Schema::new("PullRequestCommentDeletedPayload")),
    (PULL_REQUEST_REVIEWER_UPDATED, Schema::new("PullRequestReviewerUpdatedPayload")),
    (PULL_REQUEST_REVIEWER_APPROVED, Schema::new("PullRequestReviewerApprovedPayload")),
    (PULL_REQUEST_REVIEWER_UNAPPROVED, Schema::new("PullRequestReviewerUnapprovedPayload")),
    (PULL_REQUEST_REVIEWER_NEEDS_WORK, Schema::new("PullRequestReviewerNeedsWorkPayload")),
];

/// Marker for Bitbucket Server / Data Center.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitbucketServer;

impl Provider for BitbucketServer {
    const KIND: ProviderKind = ProviderKind::BitbucketServer;
    const IDENTIFICATION: Identification = Identification::Header(EVENT_HEADER);
    const CREDENTIALS: CredentialScheme = CredentialScheme::HmacSignature {
        header: SIGNATURE_HEADER,
        prefix: Some("sha256="),
        algorithm: HmacAlgorithm::Sha256,
    };
    const REGISTRY: StaticRegistry = StaticRegistry::new(SCHEMAS);
}

pub type BitbucketServerWebhook = Webhook<BitbucketServer>;
