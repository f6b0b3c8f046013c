//! Common test utilities for forge-hooks integration tests
//!
//! This module provides:
//! - Fixture loading
//! - A builder for inbound deliveries
//! - A body reader that records how it was consumed
//! - One valid sample delivery per provider

use base64::{engine::general_purpose::STANDARD, Engine as _};
use forge_hooks_core::{
    providers::{azure, bitbucket, bitbucket_server, docker, gitea, github, gitlab, gogs},
    sign_payload, Event, HmacAlgorithm, ProviderKind, RawRequest,
};
use http::{HeaderMap, HeaderValue, Method};
use std::{
    cell::Cell,
    io::{Cursor, Read},
    path::PathBuf,
    rc::Rc,
};

// ============================================================================
// Fixtures
// ============================================================================

/// Load a JSON fixture from `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

// ============================================================================
// Delivery builder
// ============================================================================

/// An inbound delivery under construction.
#[derive(Debug, Clone)]
pub struct Delivery {
    method: Method,
    headers: HeaderMap,
    body: Vec<u8>,
}

#[allow(dead_code)]
impl Delivery {
    pub fn post(body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: Method::POST,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.insert(
            name,
            HeaderValue::from_str(value).expect("test header values are valid"),
        );
        self
    }

    pub fn without_header(mut self, name: &'static str) -> Self {
        self.headers.remove(name);
        self
    }

    /// Sign the current body with HMAC-SHA256 and put `prefix + hex` in `header`.
    pub fn signed(self, header: &'static str, prefix: &str, secret: &str) -> Self {
        let signature = sign_payload(HmacAlgorithm::Sha256, secret.as_bytes(), &self.body)
            .expect("HMAC accepts any key length");
        self.header(header, &format!("{prefix}{signature}"))
    }

    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        self.header("Authorization", &format!("Basic {encoded}"))
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn request(&self) -> RawRequest<Cursor<Vec<u8>>> {
        RawRequest::new(
            self.method.clone(),
            self.headers.clone(),
            Cursor::new(self.body.clone()),
        )
    }

    /// Build a request whose body reports how it was consumed.
    pub fn tracked_request(&self) -> (RawRequest<TrackedBody>, BodyTracker) {
        let tracker = BodyTracker::default();
        let body = TrackedBody {
            inner: Cursor::new(self.body.clone()),
            tracker: tracker.clone(),
        };
        (
            RawRequest::new(self.method.clone(), self.headers.clone(), body),
            tracker,
        )
    }
}

// ============================================================================
// Tracked body
// ============================================================================

/// Observations about a [`TrackedBody`] after the request was handled.
#[derive(Debug, Clone, Default)]
pub struct BodyTracker {
    bytes_read: Rc<Cell<usize>>,
    dropped: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl BodyTracker {
    pub fn bytes_read(&self) -> usize {
        self.bytes_read.get()
    }

    pub fn dropped(&self) -> bool {
        self.dropped.get()
    }
}

/// Body reader that counts consumed bytes and records when it is released.
pub struct TrackedBody {
    inner: Cursor<Vec<u8>>,
    tracker: BodyTracker,
}

impl Read for TrackedBody {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.tracker.bytes_read.set(self.tracker.bytes_read.get() + n);
        Ok(n)
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.tracker.dropped.set(true);
    }
}

// ============================================================================
// Per-provider samples
// ============================================================================

/// A well-formed, unauthenticated delivery for `kind` and the event it carries.
#[allow(dead_code)]
pub fn sample_delivery(kind: ProviderKind) -> (Event, Delivery) {
    match kind {
        ProviderKind::GitHub => (
            github::PUSH,
            Delivery::post(fixture("github_push.json")).header(github::EVENT_HEADER, "push"),
        ),
        ProviderKind::GitLab => (
            gitlab::PUSH_HOOK,
            Delivery::post(fixture("gitlab_push.json")).header(gitlab::EVENT_HEADER, "Push Hook"),
        ),
        ProviderKind::Bitbucket => (
            bitbucket::REPO_PUSH,
            Delivery::post(fixture("bitbucket_repo_push.json"))
                .header(bitbucket::EVENT_HEADER, "repo:push"),
        ),
        ProviderKind::BitbucketServer => (
            bitbucket_server::REPOSITORY_REFS_CHANGED,
            Delivery::post(r#"{"eventKey":"repo:refs_changed","changes":[]}"#)
                .header(bitbucket_server::EVENT_HEADER, "repo:refs_changed"),
        ),
        ProviderKind::Gitea => (
            gitea::PUSH,
            Delivery::post(fixture("gitea_push.json")).header(gitea::EVENT_HEADER, "push"),
        ),
        ProviderKind::Gogs => (
            gogs::PUSH,
            Delivery::post(fixture("gitea_push.json")).header(gogs::EVENT_HEADER, "push"),
        ),
        ProviderKind::AzureDevOps => (azure::GIT_PUSH, Delivery::post(fixture("azure_git_push.json"))),
        ProviderKind::DockerHub => (docker::BUILD, Delivery::post(fixture("docker_build.json"))),
    }
}

/// Header carrying the event identifier, for header-identified providers.
#[allow(dead_code)]
pub fn event_header(kind: ProviderKind) -> Option<&'static str> {
    match kind {
        ProviderKind::GitHub => Some(github::EVENT_HEADER),
        ProviderKind::GitLab => Some(gitlab::EVENT_HEADER),
        ProviderKind::Bitbucket => Some(bitbucket::EVENT_HEADER),
        ProviderKind::BitbucketServer => Some(bitbucket_server::EVENT_HEADER),
        ProviderKind::Gitea => Some(gitea::EVENT_HEADER),
        ProviderKind::Gogs => Some(gogs::EVENT_HEADER),
        ProviderKind::AzureDevOps | ProviderKind::DockerHub => None,
    }
}
