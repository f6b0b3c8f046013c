//! Bitbucket Cloud.
//!
//! The event key is sent in `X-Event-Key`. Bitbucket Cloud does not sign
//! deliveries; a hook may instead be pinned to the webhook UUID Bitbucket
//! sends in `X-Hook-UUID`.

use crate::{
    auth::CredentialScheme,
    pipeline::{Identification, Provider, Webhook},
    providers::shapes::BitbucketPush,
    registry::{Schema, StaticRegistry},
    Event, ProviderKind,
};

pub const EVENT_HEADER: &str = "X-Event-Key";
pub const UUID_HEADER: &str = "X-Hook-UUID";

pub const REPO_PUSH: Event = Event::from_static("repo:push");
pub const REPO_FORK: Event = Event::from_static("repo:fork");
pub const REPO_UPDATED: Event = Event::from_static("repo:updated");
pub const REPO_COMMIT_COMMENT_CREATED: Event = Event::from_static("repo:commit_comment_created");
pub const REPO_COMMIT_STATUS_CREATED: Event = Event::from_static("repo:commit_status_created");
pub const REPO_COMMIT_STATUS_UPDATED: Event = Event::from_static("repo:commit_status_updated");
pub const ISSUE_CREATED: Event = Event::from_static("issue:created");
pub const ISSUE_UPDATED: Event = Event::from_static("issue:updated");
pub const ISSUE_COMMENT_CREATED: Event = Event::from_static("issue:comment_created");
pub const PULL_REQUEST_CREATED: Event = Event::from_static("pullrequest:created");
pub const PULL_REQUEST_UPDATED: Event = Event::from_static("pullrequest:updated");
pub const PULL_REQUEST_APPROVED: Event = Event::from_static("pullrequest:approved");
pub const PULL_REQUEST_UNAPPROVED: Event = Event::from_static("pullrequest:unapproved");
pub const PULL_REQUEST_MERGED: Event = Event::from_static("pullrequest:fulfilled");
pub const PULL_REQUEST_DECLINED: Event = Event::from_static("pullrequest:rejected");
pub const PULL_REQUEST_COMMENT_CREATED: Event = Event::from_static("pullrequest:comment_created");
pub const PULL_REQUEST_COMMENT_UPDATED: Event = Event::from_static("pullrequest:comment_updated");
pub const PULL_REQUEST_COMMENT_DELETED: Event = Event::from_static("pullrequest:comment_deleted");

const SCHEMAS: &[(Event, Schema)] = &[
    (REPO_PUSH, Schema::typed::<BitbucketPush>("RepoPushPayload")),
    (REPO_FORK, Schema::new("RepoForkPayload")),
    (REPO_UPDATED, Schema::new("RepoUpdatedPayload")),
    (REPO_COMMIT_COMMENT_CREATED, Schema::new("RepoCommitCommentCreatedPayload")),
    (REPO_COMMIT_STATUS_CREATED, Schema::new("RepoCommitStatusCreatedPayload")),
    (REPO_COMMIT_STATUS_UPDATED, Schema::new("RepoCommitStatusUpdatedPayload")),
    (ISSUE_CREATED, Schema::new("IssueCreatedPayload")),
    (ISSUE_UPDATED, Schema::new("IssueUpdatedPayload")),
    (ISSUE_COMMENT_CREATED, Schema::new("IssueCommentCreatedPayload")),
    (PULL_REQUEST_CREATED, Schema::new("PullRequestCreatedPayload")),
    (PULL_REQUEST_UPDATED, Schema::new("PullRequestUpdatedPayload")),
    (PULL_REQUEST_APPROVED, Schema::new("PullRequestApprovedPayload")),
    (PULL_REQUEST_UNAPPROVED, Schema::new("PullRequestUnapprovedPayload")),
    (PULL_REQUEST_MERGED, Schema::new("PullRequestMergedPayload")),
    (PULL_REQUEST_DECLINED, Schema::new("PullRequestDeclinedPayload")),
    (PULL_REQUEST_COMMENT_CREATED, Schema::new("PullRequestCommentCreatedPayload")),
    (PULL_REQUEST_COMMENT_UPDATED, Schema::new("PullRequestCommentUpdatedPayload")),
    (PULL_REQUEST_COMMENT_DELETED, Schema::new("PullRequestCommentDeletedPayload")),
];

/// Marker for Bitbucket Cloud.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bitbucket;

impl Provider for Bitbucket {
    const KIND: ProviderKind = ProviderKind::Bitbucket;
    const IDENTIFICATION: Identification = Identification::Header(EVENT_HEADER);
    const CREDENTIALS: CredentialScheme = CredentialScheme::HookUuid {
        header: UUID_HEADER,
    };
    const REGISTRY: StaticRegistry = StaticRegistry::new(SCHEMAS);
}

pub type BitbucketWebhook = Webhook<Bitbucket>;
