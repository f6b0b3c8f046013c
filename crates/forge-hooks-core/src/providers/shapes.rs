//! Shapes for the payloads the built-in tables type.
//!
//! Each shape names the fields callers route on. Every field is optional, so
//! partial deliveries and `null` values pass, but a field that is present must
//! have the JSON type the forge documents. Fields not named here are ignored.
//!
//! The same types can be used to bind a decoded payload:
//!
//! ```
//! # use forge_hooks_core::{providers::{github::{self, GitHubWebhook}, shapes::GitPush}, RawRequest};
//! # use http::HeaderMap;
//! # use std::io::Cursor;
//! let hook = GitHubWebhook::new([]).unwrap();
//! let mut headers = HeaderMap::new();
//! headers.insert(github::EVENT_HEADER, "push".parse().unwrap());
//! let body = br#"{"ref":"refs/heads/main","commits":[]}"#.to_vec();
//!
//! let payload = hook
//!     .parse(RawRequest::post(headers, Cursor::new(body)), &[github::PUSH])
//!     .unwrap();
//! let push: GitPush = payload.deserialize().unwrap();
//! assert_eq!(push.git_ref.as_deref(), Some("refs/heads/main"));
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

/// Any JSON object.
pub type Object = Map<String, Value>;

/// Push to a GitHub, Gitea or Gogs repository.
#[derive(Debug, Deserialize)]
pub struct GitPush {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub commits: Option<Vec<Object>>,
    pub repository: Option<Object>,
}

/// GitLab push and tag push.
#[derive(Debug, Deserialize)]
pub struct GitLabPush {
    pub object_kind: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub checkout_sha: Option<String>,
    pub project_id: Option<i64>,
    pub project: Option<Object>,
    pub commits: Option<Vec<Object>>,
    pub total_commits_count: Option<u64>,
}

/// GitLab job and build events.
#[derive(Debug, Deserialize)]
pub struct GitLabJob {
    pub object_kind: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub build_id: Option<i64>,
    pub build_name: Option<String>,
    pub build_status: Option<String>,
    pub project_id: Option<i64>,
}

/// Bitbucket Cloud `repo:push`.
#[derive(Debug, Deserialize)]
pub struct BitbucketPush {
    pub actor: Option<Object>,
    pub repository: Option<Object>,
    pub push: Option<BitbucketChanges>,
}

#[derive(Debug, Deserialize)]
pub struct BitbucketChanges {
    pub changes: Option<Vec<Object>>,
}

/// Azure DevOps `git.push`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureGitPush {
    pub event_type: Option<String>,
    pub resource: Option<AzureGitPushResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureGitPushResource {
    pub push_id: Option<i64>,
    pub ref_updates: Option<Vec<Object>>,
    pub commits: Option<Vec<Object>>,
    pub repository: Option<Object>,
}

/// Docker Hub repository push.
#[derive(Debug, Deserialize)]
pub struct DockerPush {
    pub callback_url: Option<String>,
    pub push_data: Option<DockerPushData>,
    pub repository: Option<Object>,
}

#[derive(Debug, Deserialize)]
pub struct DockerPushData {
    pub tag: Option<String>,
    pub pusher: Option<String>,
    pub pushed_at: Option<i64>,
}

#[cfg(test)]
#[path = "shapes_tests.rs"]
mod tests;
