//! Hooks configuration file.
//!
//! A hooks file names one or more receivers. Each entry selects a provider,
//! the credentials to verify deliveries against and, optionally, the events
//! the hook subscribes to by default.
//!
//! ```toml
//! [hooks.app]
//! provider = "github"
//! events = ["push", "pull_request"]
//! secret = { type = "env", var = "GITHUB_WEBHOOK_SECRET" }
//!
//! [hooks.pipelines]
//! provider = "azure-devops"
//! basic_auth = { username = "svc", password = { type = "literal", value = "dev-only" } }
//! ```
//!
//! Files may be TOML, YAML or JSON; the format follows the extension.
//! Environment variables prefixed `FORGE_HOOKS__` override file values, with
//! `__` separating nested keys (`FORGE_HOOKS__HOOKS__APP__PROVIDER=gitea`).

use crate::ConfigError;
use forge_hooks_core::{AnyWebhook, Event, ProviderKind, Secret, WebhookOption};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tracing::{debug, warn};

const ENV_PREFIX: &str = "FORGE_HOOKS";

/// Parsed hooks file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HooksFile {
    #[serde(default)]
    pub hooks: BTreeMap<String, HookSettings>,
}

/// One configured receiver.
#[derive(Debug, Clone, Deserialize)]
pub struct HookSettings {
    pub provider: ProviderKind,

    /// Shared secret for HMAC or token providers.
    #[serde(default)]
    pub secret: Option<SecretSource>,

    /// Expected hook UUID (Bitbucket Cloud).
    #[serde(default)]
    pub uuid: Option<SecretSource>,

    /// Expected Basic credentials (Azure DevOps).
    #[serde(default)]
    pub basic_auth: Option<BasicAuthSettings>,

    /// Default subscription used when none is given on the command line.
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BasicAuthSettings {
    #[serde(default)]
    pub username: String,
    pub password: SecretSource,
}

/// Where a credential value comes from.
#[derive(Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SecretSource {
    /// Value stored in the file itself. Development use only.
    Literal { value: String },

    /// Value read from an environment variable when the hook is built.
    Env { var: String },
}

impl std::fmt::Debug for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { .. } => f
                .debug_struct("Literal")
                .field("value", &"<REDACTED>")
                .finish(),
            Self::Env { var } => f.debug_struct("Env").field("var", var).finish(),
        }
    }
}

impl SecretSource {
    /// Read the credential value.
    ///
    /// Literal values log a warning every time they are resolved.
    pub fn resolve(&self, hook: &str) -> Result<Secret, ConfigError> {
        match self {
            Self::Literal { value } => {
                warn!(
                    hook = %hook,
                    "Hook uses a literal secret from the configuration file; use an environment variable outside development"
                );
                Ok(Secret::new(value.as_str()))
            }
            Self::Env { var } => std::env::var(var)
                .map(Secret::new)
                .map_err(|_| ConfigError::MissingEnvVar { var: var.clone() }),
        }
    }

    /// Non-sensitive description, e.g. `env:GITHUB_WEBHOOK_SECRET`.
    pub fn describe(&self) -> String {
        match self {
            Self::Literal { .. } => "literal".to_string(),
            Self::Env { var } => format!("env:{var}"),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl HooksFile {
    /// Load `path` and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;
        let file: Self = settings.try_deserialize()?;

        debug!(path = %path.display(), hooks = file.hooks.len(), "Loaded hooks file");
        Ok(file)
    }

    /// Look up a hook by name.
    pub fn hook(&self, name: &str) -> Result<&HookSettings, ConfigError> {
        self.hooks.get(name).ok_or_else(|| ConfigError::UnknownHook {
            name: name.to_string(),
        })
    }
}

// ============================================================================
// Building hooks
// ============================================================================

/// Summary of a validated hook, safe to print.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookSummary {
    pub provider: ProviderKind,
    pub verifies_credentials: bool,
    pub credential_sources: Vec<String>,
    pub events: Vec<Event>,
}

impl HookSettings {
    /// Resolve credentials into the option list understood by the core.
    pub fn options(&self, hook: &str) -> Result<Vec<WebhookOption>, ConfigError> {
        let mut options = Vec::new();
        if let Some(secret) = &self.secret {
            options.push(WebhookOption::Secret(secret.resolve(hook)?));
        }
        if let Some(uuid) = &self.uuid {
            options.push(WebhookOption::HookUuid(uuid.resolve(hook)?));
        }
        if let Some(auth) = &self.basic_auth {
            options.push(WebhookOption::basic_auth(
                auth.username.as_str(),
                auth.password.resolve(hook)?,
            ));
        }
        Ok(options)
    }

    /// Build the receiver described by this entry.
    pub fn build(&self, hook: &str) -> Result<AnyWebhook, ConfigError> {
        AnyWebhook::new(self.provider, self.options(hook)?).map_err(|source| {
            ConfigError::Webhook {
                hook: hook.to_string(),
                source,
            }
        })
    }

    /// Build the receiver and check the default subscription against the
    /// provider's event table.
    pub fn validate(&self, hook: &str) -> Result<HookSummary, ConfigError> {
        let webhook = self.build(hook)?;

        if let Some(unknown) = self
            .events
            .iter()
            .find(|event| !webhook.events().any(|known| known == *event))
        {
            return Err(ConfigError::UnknownEvent {
                hook: hook.to_string(),
                event: unknown.clone(),
            });
        }

        let credential_sources = self
            .secret
            .iter()
            .chain(self.uuid.iter())
            .chain(self.basic_auth.iter().map(|auth| &auth.password))
            .map(SecretSource::describe)
            .collect();

        Ok(HookSummary {
            provider: self.provider,
            verifies_credentials: webhook.config().verifies_credentials(),
            credential_sources,
            events: self.events.clone(),
        })
    }
}

#[cfg(test)]
#[path = "hooks_file_tests.rs"]
mod tests;
