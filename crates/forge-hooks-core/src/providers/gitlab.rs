//! GitLab.
//!
//! The event name is sent in `X-Gitlab-Event` and the shared token in
//! `X-Gitlab-Token`. The token is checked by comparing SHA-512 digests in
//! constant time; the configured secret is only kept in digest form.
//!
//! # Wrapper events
//!
//! Two transport-level events do not determine the payload shape on their
//! own and are reclassified from the body:
//!
//! | Wrapper       | Body field                   | Result |
//! |---------------|------------------------------|--------|
//! | `Job Hook`    | `object_kind == "build"`     | continues as `Build Hook` |
//! | `System Hook` | `object_kind` (or `event_name`) is `push`, `tag_push` or `merge_request` | continues as the matching project hook |
//! | `System Hook` | `event_name` names an administrative event | decoded as that event's schema |
//!
//! A continued event must itself be subscribed. A system hook that matches
//! nothing is [`ParseError::UnknownSystemHookEvent`].

use crate::{
    auth::CredentialScheme,
    decode::decode_envelope,
    pipeline::{Classification, Identification, Provider, Webhook},
    providers::shapes::{GitLabJob, GitLabPush},
    registry::{Schema, StaticRegistry},
    Event, ParseError, ProviderKind,
};
use serde::Deserialize;

pub const EVENT_HEADER: &str = "X-Gitlab-Event";
pub const TOKEN_HEADER: &str = "X-Gitlab-Token";

pub const PUSH_HOOK: Event = Event::from_static("Push Hook");
pub const TAG_PUSH_HOOK: Event = Event::from_static("Tag Push Hook");
pub const ISSUE_HOOK: Event = Event::from_static("Issue Hook");
pub const CONFIDENTIAL_ISSUE_HOOK: Event = Event::from_static("Confidential Issue Hook");
pub const NOTE_HOOK: Event = Event::from_static("Note Hook");
pub const CONFIDENTIAL_NOTE_HOOK: Event = Event::from_static("Confidential Note Hook");
pub const MERGE_REQUEST_HOOK: Event = Event::from_static("Merge Request Hook");
pub const WIKI_PAGE_HOOK: Event = Event::from_static("Wiki Page Hook");
pub const PIPELINE_HOOK: Event = Event::from_static("Pipeline Hook");
pub const BUILD_HOOK: Event = Event::from_static("Build Hook");
pub const JOB_HOOK: Event = Event::from_static("Job Hook");
pub const DEPLOYMENT_HOOK: Event = Event::from_static("Deployment Hook");
pub const SYSTEM_HOOK: Event = Event::from_static("System Hook");
pub const RELEASE_HOOK: Event = Event::from_static("Release Hook");

const SCHEMAS: &[(Event, Schema)] = &[
    (PUSH_HOOK, Schema::typed::<GitLabPush>("PushEventPayload")),
    (TAG_PUSH_HOOK, Schema::typed::<GitLabPush>("TagEventPayload")),
    (ISSUE_HOOK, Schema::new("IssueEventPayload")),
    (CONFIDENTIAL_ISSUE_HOOK, Schema::new("ConfidentialIssueEventPayload")),
    (NOTE_HOOK, Schema::new("CommentEventPayload")),
    (CONFIDENTIAL_NOTE_HOOK, Schema::new("ConfidentialCommentEventPayload")),
    (MERGE_REQUEST_HOOK, Schema::new("MergeRequestEventPayload")),
    (WIKI_PAGE_HOOK, Schema::new("WikiPageEventPayload")),
    (PIPELINE_HOOK, Schema::new("PipelineEventPayload")),
    (BUILD_HOOK, Schema::typed::<GitLabJob>("BuildEventPayload")),
    (JOB_HOOK, Schema::typed::<GitLabJob>("JobEventPayload")),
    (DEPLOYMENT_HOOK, Schema::new("DeploymentEventPayload")),
    (SYSTEM_HOOK, Schema::new("SystemHookPayload")),
    (RELEASE_HOOK, Schema::new("ReleaseEventPayload")),
];

// ============================================================================
// Reclassification tables
// ============================================================================

const BUILD_KIND: &str = "build";

/// `object_kind` / `event_name` values that stand for a project hook.
const PROJECT_HOOK_KINDS: &[(&str, Event)] = &[
    ("push", PUSH_HOOK),
    ("tag_push", TAG_PUSH_HOOK),
    ("merge_request", MERGE_REQUEST_HOOK),
];

/// Administrative system hook `event_name` values.
pub const SYSTEM_EVENT_SCHEMAS: &[(&str, Schema)] = &[
    ("project_create", Schema::new("ProjectCreatedEventPayload")),
    ("project_destroy", Schema::new("ProjectDestroyedEventPayload")),
    ("project_rename", Schema::new("ProjectRenamedEventPayload")),
    ("project_transfer", Schema::new("ProjectTransferredEventPayload")),
    ("project_update", Schema::new("ProjectUpdatedEventPayload")),
    ("user_add_to_team", Schema::new("TeamMemberAddedEventPayload")),
    ("user_remove_from_team", Schema::new("TeamMemberRemovedEventPayload")),
    ("user_update_for_team", Schema::new("TeamMemberUpdatedEventPayload")),
    ("user_create", Schema::new("UserCreatedEventPayload")),
    ("user_destroy", Schema::new("UserRemovedEventPayload")),
    ("user_failed_login", Schema::new("UserFailedLoginEventPayload")),
    ("user_rename", Schema::new("UserRenamedEventPayload")),
    ("key_create", Schema::new("KeyAddedEventPayload")),
    ("key_destroy", Schema::new("KeyRemovedEventPayload")),
    ("group_create", Schema::new("GroupCreatedEventPayload")),
    ("group_destroy", Schema::new("GroupRemovedEventPayload")),
    ("group_rename", Schema::new("GroupRenamedEventPayload")),
    ("user_add_to_group", Schema::new("GroupMemberAddedEventPayload")),
    ("user_remove_from_group", Schema::new("GroupMemberRemovedEventPayload")),
    ("user_update_for_group", Schema::new("GroupMemberUpdatedEventPayload")),
];

/// The fields every job and system hook body carries. Absent and `null`
/// values read as empty.
#[derive(Debug, Default, Deserialize)]
struct KindEnvelope {
    #[serde(default)]
    object_kind: Option<String>,
    #[serde(default)]
    event_name: Option<String>,
}

impl KindEnvelope {
    fn object_kind(&self) -> &str {
        self.object_kind.as_deref().unwrap_or_default()
    }

    fn event_name(&self) -> &str {
        self.event_name.as_deref().unwrap_or_default()
    }
}

fn project_hook_for(kind: &str) -> Option<&'static Event> {
    PROJECT_HOOK_KINDS
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, event)| event)
}

fn system_event_schema(event_name: &str) -> Option<Schema> {
    SYSTEM_EVENT_SCHEMAS
        .iter()
        .find(|(name, _)| *name == event_name)
        .map(|(_, schema)| *schema)
}

fn classify_job(body: &[u8]) -> Result<Classification, ParseError> {
    let envelope: KindEnvelope = decode_envelope("JobEventPayload", body)?;
    if envelope.object_kind() == BUILD_KIND {
        Ok(Classification::Redispatch(BUILD_HOOK))
    } else {
        Ok(Classification::Resolved)
    }
}

fn classify_system(body: &[u8]) -> Result<Classification, ParseError> {
    let envelope: KindEnvelope = decode_envelope("SystemHookPayload", body)?;

    if let Some(event) = project_hook_for(envelope.object_kind()) {
        return Ok(Classification::Redispatch(event.clone()));
    }
    if let Some(event) = project_hook_for(envelope.event_name()) {
        return Ok(Classification::Redispatch(event.clone()));
    }
    if let Some(schema) = system_event_schema(envelope.event_name()) {
        return Ok(Classification::Schema(schema));
    }

    Err(ParseError::UnknownSystemHookEvent {
        object_kind: envelope.object_kind.unwrap_or_default(),
        event_name: envelope.event_name.unwrap_or_default(),
    })
}

// ============================================================================
// Provider
// ============================================================================

/// Marker for GitLab (SaaS and self-managed).
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLab;

impl Provider for GitLab {
    const KIND: ProviderKind = ProviderKind::GitLab;
    const IDENTIFICATION: Identification = Identification::Header(EVENT_HEADER);
    const CREDENTIALS: CredentialScheme = CredentialScheme::TokenDigest {
        header: TOKEN_HEADER,
    };
    const REGISTRY: StaticRegistry = StaticRegistry::new(SCHEMAS);

    fn classify(event: &Event, body: &[u8]) -> Result<Classification, ParseError> {
        if *event == JOB_HOOK {
            classify_job(body)
        } else if *event == SYSTEM_HOOK {
            classify_system(body)
        } else {
            Ok(Classification::Resolved)
        }
    }
}

pub type GitLabWebhook = Webhook<GitLab>;

#[cfg(test)]
#[path = "gitlab_tests.rs"]
mod tests;
