//! GitHub.
//!
//! The event name is sent in `X-GitHub-Event`. Deliveries are signed with
//! HMAC-SHA256 over the raw body, hex encoded in `X-Hub-Signature-256` behind
//! a `sha256=` prefix.

use crate::{
    auth::{CredentialScheme, HmacAlgorithm},
    pipeline::{Identification, Provider, Webhook},
    providers::shapes::GitPush,
    registry::{Schema, StaticRegistry},
    Event, ProviderKind,
};

pub const EVENT_HEADER: &str = "X-GitHub-Event";
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

pub const CHECK_RUN: Event = Event::from_static("check_run");
pub const CHECK_SUITE: Event = Event::from_static("check_suite");
pub const CODE_SCANNING_ALERT: Event = Event::from_static("code_scanning_alert");
pub const COMMIT_COMMENT: Event = Event::from_static("commit_comment");
pub const CREATE: Event = Event::from_static("create");
pub const DELETE: Event = Event::from_static("delete");
pub const DEPENDABOT_ALERT: Event = Event::from_static("dependabot_alert");
pub const DEPLOY_KEY: Event = Event::from_static("deploy_key");
pub const DEPLOYMENT: Event = Event::from_static("deployment");
pub const DEPLOYMENT_STATUS: Event = Event::from_static("deployment_status");
pub const FORK: Event = Event::from_static("fork");
pub const GITHUB_APP_AUTHORIZATION: Event = Event::from_static("github_app_authorization");
pub const GOLLUM: Event = Event::from_static("gollum");
pub const INSTALLATION: Event = Event::from_static("installation");
pub const INSTALLATION_REPOSITORIES: Event = Event::from_static("installation_repositories");
pub const INTEGRATION_INSTALLATION: Event = Event::from_static("integration_installation");
pub const INTEGRATION_INSTALLATION_REPOSITORIES: Event =
    Event::from_static("integration_installation_repositories");
pub const ISSUE_COMMENT: Event = Event::from_static("issue_comment");
pub const ISSUES: Event = Event::from_static("issues");
pub const LABEL: Event = Event::from_static("label");
pub const MEMBER: Event = Event::from_static("member");
pub const MEMBERSHIP: Event = Event::from_static("membership");
pub const META: Event = Event::from_static("meta");
pub const MILESTONE: Event = Event::from_static("milestone");
pub const ORGANIZATION: Event = Event::from_static("organization");
pub const ORG_BLOCK: Event = Event::from_static("org_block");
pub const PAGE_BUILD: Event = Event::from_static("page_build");
pub const PING: Event = Event::from_static("ping");
pub const PROJECT: Event = Event::from_static("project");
pub const PROJECT_CARD: Event = Event::from_static("project_card");
pub const PROJECT_COLUMN: Event = Event::from_static("project_column");
pub const PUBLIC: Event = Event::from_static("public");
pub const PULL_REQUEST: Event = Event::from_static("pull_request");
pub const PULL_REQUEST_REVIEW: Event = Event::from_static("pull_request_review");
pub const PULL_REQUEST_REVIEW_COMMENT: Event = Event::from_static("pull_request_review_comment");
pub const PUSH: Event = Event::from_static("push");
pub const RELEASE: Event = Event::from_static("release");
pub const REPOSITORY: Event = Event::from_static("repository");
pub const REPOSITORY_VULNERABILITY_ALERT: Event =
    Event::from_static("repository_vulnerability_alert");
pub const SECURITY_ADVISORY: Event = Event::from_static("security_advisory");
pub const STATUS: Event = Event::from_static("status");
pub const TEAM: Event = Event::from_static("team");
pub const TEAM_ADD: Event = Event::from_static("team_add");
pub const WATCH: Event = Event::from_static("watch");
pub const WORKFLOW_DISPATCH: Event = Event::from_static("workflow_dispatch");
pub const WORKFLOW_JOB: Event = Event::from_static("workflow_job");
pub const WORKFLOW_RUN: Event = Event::from_static("workflow_run");

const SCHEMAS: &[(Event, Schema)] = &[
    (CHECK_RUN, Schema::new("CheckRunPayload")),
    (CHECK_SUITE, Schema::new("CheckSuitePayload")),
    (CODE_SCANNING_ALERT, Schema::new("CodeScanningAlertPayload")),
    (COMMIT_COMMENT, Schema::new("CommitCommentPayload")),
    (CREATE, Schema::new("CreatePayload")),
    (DELETE, Schema::new("DeletePayload")),
    (DEPENDABOT_ALERT, Schema::new("DependabotAlertPayload")),
    (DEPLOY_KEY, Schema::new("DeployKeyPayload")),
    (DEPLOYMENT, Schema::new("DeploymentPayload")),
    (DEPLOYMENT_STATUS, Schema::new("DeploymentStatusPayload")),
    (FORK, Schema::new("ForkPayload")),
    (GITHUB_APP_AUTHORIZATION, Schema::new("GitHubAppAuthorizationPayload")),
    (GOLLUM, Schema::new("GollumPayload")),
    (INSTALLATION, Schema::new("InstallationPayload")),
    (INSTALLATION_REPOSITORIES, Schema::new("InstallationRepositoriesPayload")),
    (INTEGRATION_INSTALLATION, Schema::new("InstallationPayload")),
    (INTEGRATION_INSTALLATION_REPOSITORIES, Schema::new("InstallationRepositoriesPayload")),
    (ISSUE_COMMENT, Schema::new("IssueCommentPayload")),
    (ISSUES, Schema::new("IssuesPayload")),
    (LABEL, Schema::new("LabelPayload")),
    (MEMBER, Schema::new("MemberPayload")),
    (MEMBERSHIP, Schema::new("MembershipPayload")),
    (META, Schema::new("MetaPayload")),
    (MILESTONE, Schema::new("MilestonePayload")),
    (ORGANIZATION, Schema::new("OrganizationPayload")),
    (ORG_BLOCK, Schema::new("OrgBlockPayload")),
    (PAGE_BUILD, Schema::new("PageBuildPayload")),
    (PING, Schema::new("PingPayload")),
    (PROJECT, Schema::new("ProjectPayload")),
    (PROJECT_CARD, Schema::new("ProjectCardPayload")),
    (PROJECT_COLUMN, Schema::new("ProjectColumnPayload")),
    (PUBLIC, Schema::new("PublicPayload")),
    (PULL_REQUEST, Schema::new("PullRequestPayload")),
    (PULL_REQUEST_REVIEW, Schema::new("PullRequestReviewPayload")),
    (PULL_REQUEST_REVIEW_COMMENT, Schema::new("PullRequestReviewCommentPayload")),
    (PUSH, Schema::typed::<GitPush>("PushPayload")),
    (RELEASE, Schema::new("ReleasePayload")),
    (REPOSITORY, Schema::new("RepositoryPayload")),
    (REPOSITORY_VULNERABILITY_ALERT, Schema::new("RepositoryVulnerabilityAlertPayload")),
    (SECURITY_ADVISORY, Schema::new("SecurityAdvisoryPayload")),
    (STATUS, Schema::new("StatusPayload")),
    (TEAM, Schema::new("TeamPayload")),
    (TEAM_ADD, Schema::new("TeamAddPayload")),
    (WATCH, Schema::new("WatchPayload")),
    (WORKFLOW_DISPATCH, Schema::new("WorkflowDispatchPayload")),
    (WORKFLOW_JOB, Schema::new("WorkflowJobPayload")),
    (WORKFLOW_RUN, Schema::new("WorkflowRunPayload")),
];

/// Marker for GitHub and GitHub Enterprise.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHub;

impl Provider for GitHub {
    const KIND: ProviderKind = ProviderKind::GitHub;
    const IDENTIFICATION: Identification = Identification::Header(EVENT_HEADER);
    const CREDENTIALS: CredentialScheme = CredentialScheme::HmacSignature {
        header: SIGNATURE_HEADER,
        prefix: Some("sha256="),
        algorithm: HmacAlgorithm::Sha256,
    };
    const REGISTRY: StaticRegistry = StaticRegistry::new(SCHEMAS);
}

pub type GitHubWebhook = Webhook<GitHub>;
