//! Built-in providers.
//!
//! Each submodule defines a marker type implementing
//! [`Provider`](crate::Provider), the provider's event identifiers as
//! constants, and a `*Webhook` alias for the configured receiver.
//!
//! [`AnyWebhook`] selects a provider at runtime, for hooks driven by
//! configuration files.

use crate::{
    auth::CredentialScheme,
    config::{WebhookConfig, WebhookOption},
    decode::Payload,
    error::{ConfigError, ParseError},
    pipeline::Provider,
    registry::StaticRegistry,
    request::RawRequest,
    Event, ProviderKind,
};
use std::io::Read;

pub mod azure;
pub mod bitbucket;
pub mod bitbucket_server;
pub mod docker;
pub mod gitea;
pub mod github;
pub mod gitlab;
pub mod gogs;
pub mod shapes;

use azure::{AzureDevOps, AzureDevOpsWebhook};
use bitbucket::{Bitbucket, BitbucketWebhook};
use bitbucket_server::{BitbucketServer, BitbucketServerWebhook};
use docker::{DockerHub, DockerHubWebhook};
use gitea::{Gitea, GiteaWebhook};
use github::{GitHub, GitHubWebhook};
use gitlab::{GitLab, GitLabWebhook};
use gogs::{Gogs, GogsWebhook};

/// Built-in event table of a provider.
pub fn registry_for(kind: ProviderKind) -> StaticRegistry {
    match kind {
        ProviderKind::GitHub => GitHub::REGISTRY,
        ProviderKind::GitLab => GitLab::REGISTRY,
        ProviderKind::Bitbucket => Bitbucket::REGISTRY,
        ProviderKind::BitbucketServer => BitbucketServer::REGISTRY,
        ProviderKind::Gitea => Gitea::REGISTRY,
        ProviderKind::Gogs => Gogs::REGISTRY,
        ProviderKind::AzureDevOps => AzureDevOps::REGISTRY,
        ProviderKind::DockerHub => DockerHub::REGISTRY,
    }
}

/// Credential scheme of a provider.
pub fn credential_scheme_for(kind: ProviderKind) -> CredentialScheme {
    match kind {
        ProviderKind::GitHub => GitHub::CREDENTIALS,
        ProviderKind::GitLab => GitLab::CREDENTIALS,
        ProviderKind::Bitbucket => Bitbucket::CREDENTIALS,
        ProviderKind::BitbucketServer => BitbucketServer::CREDENTIALS,
        ProviderKind::Gitea => Gitea::CREDENTIALS,
        ProviderKind::Gogs => Gogs::CREDENTIALS,
        ProviderKind::AzureDevOps => AzureDevOps::CREDENTIALS,
        ProviderKind::DockerHub => DockerHub::CREDENTIALS,
    }
}

/// A webhook whose provider is chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyWebhook {
    GitHub(GitHubWebhook),
    GitLab(GitLabWebhook),
    Bitbucket(BitbucketWebhook),
    BitbucketServer(BitbucketServerWebhook),
    Gitea(GiteaWebhook),
    Gogs(GogsWebhook),
    AzureDevOps(AzureDevOpsWebhook),
    DockerHub(DockerHubWebhook),
}

impl AnyWebhook {
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any option is rejected for `kind`.
    pub fn new(
        kind: ProviderKind,
        options: impl IntoIterator<Item = WebhookOption>,
    ) -> Result<Self, ConfigError> {
        Ok(match kind {
            ProviderKind::GitHub => Self::GitHub(GitHubWebhook::new(options)?),
            ProviderKind::GitLab => Self::GitLab(GitLabWebhook::new(options)?),
            ProviderKind::Bitbucket => Self::Bitbucket(BitbucketWebhook::new(options)?),
            ProviderKind::BitbucketServer => {
                Self::BitbucketServer(BitbucketServerWebhook::new(options)?)
            }
            ProviderKind::Gitea => Self::Gitea(GiteaWebhook::new(options)?),
            ProviderKind::Gogs => Self::Gogs(GogsWebhook::new(options)?),
            ProviderKind::AzureDevOps => Self::AzureDevOps(AzureDevOpsWebhook::new(options)?),
            ProviderKind::DockerHub => Self::DockerHub(DockerHubWebhook::new(options)?),
        })
    }

    pub fn kind(&self) -> ProviderKind {
        self.config().provider()
    }

    pub fn config(&self) -> &WebhookConfig {
        match self {
            Self::GitHub(hook) => hook.config(),
            Self::GitLab(hook) => hook.config(),
            Self::Bitbucket(hook) => hook.config(),
            Self::BitbucketServer(hook) => hook.config(),
            Self::Gitea(hook) => hook.config(),
            Self::Gogs(hook) => hook.config(),
            Self::AzureDevOps(hook) => hook.config(),
            Self::DockerHub(hook) => hook.config(),
        }
    }

    /// Known events of the selected provider.
    pub fn events(&self) -> impl Iterator<Item = &'static Event> {
        registry_for(self.kind()).events()
    }

    /// See [`crate::Webhook::parse`].
    pub fn parse<B: Read>(
        &self,
        request: RawRequest<B>,
        events: &[Event],
    ) -> Result<Payload, ParseError> {
        match self {
            Self::GitHub(hook) => hook.parse(request, events),
            Self::GitLab(hook) => hook.parse(request, events),
            Self::Bitbucket(hook) => hook.parse(request, events),
            Self::BitbucketServer(hook) => hook.parse(request, events),
            Self::Gitea(hook) => hook.parse(request, events),
            Self::Gogs(hook) => hook.parse(request, events),
            Self::AzureDevOps(hook) => hook.parse(request, events),
            Self::DockerHub(hook) => hook.parse(request, events),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
