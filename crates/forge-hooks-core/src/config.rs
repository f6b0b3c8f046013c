//! Hook configuration built from an ordered list of options.
//!
//! A [`WebhookConfig`] is created once, never mutated afterwards, and can be
//! shared freely between threads handling concurrent deliveries.
//!
//! # Examples
//!
//! ```rust
//! use forge_hooks_core::{
//!     CredentialScheme, ProviderKind, WebhookConfig, WebhookOption,
//! };
//!
//! let config = WebhookConfig::from_options(
//!     ProviderKind::Bitbucket,
//!     CredentialScheme::HookUuid { header: "X-Hook-UUID" },
//!     [WebhookOption::hook_uuid("2f1c4b0e-9a27-4e0b-8c4e-6f0b1d2c3a4b")],
//! )
//! .unwrap();
//! assert!(config.verifies_credentials());
//! ```

use crate::{
    auth::{token_digest, CredentialScheme, CredentialVerifier},
    error::ConfigError,
    ProviderKind,
};
use tracing::warn;
use zeroize::Zeroizing;

/// A credential value. Zeroed on drop and excluded from `Debug` output.
#[derive(Clone)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the raw value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<REDACTED>)")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// Options
// ============================================================================

/// One configuration step applied while building a hook.
///
/// When the same kind of option appears more than once the last one wins.
#[derive(Debug, Clone)]
pub enum WebhookOption {
    /// Shared secret for HMAC signatures or token digests.
    Secret(Secret),

    /// Expected identity token sent back in a header by the provider.
    HookUuid(Secret),

    /// Expected HTTP Basic credentials.
    BasicAuth { username: Secret, password: Secret },
}

impl WebhookOption {
    pub fn secret(value: impl Into<Secret>) -> Self {
        Self::Secret(value.into())
    }

    pub fn hook_uuid(value: impl Into<Secret>) -> Self {
        Self::HookUuid(value.into())
    }

    pub fn basic_auth(username: impl Into<Secret>, password: impl Into<Secret>) -> Self {
        Self::BasicAuth {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Option name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Secret(_) => "secret",
            Self::HookUuid(_) => "hook_uuid",
            Self::BasicAuth { .. } => "basic_auth",
        }
    }

    fn is_supported_by(&self, scheme: CredentialScheme) -> bool {
        matches!(
            (self, scheme),
            (
                Self::Secret(_),
                CredentialScheme::HmacSignature { .. } | CredentialScheme::TokenDigest { .. }
            ) | (Self::HookUuid(_), CredentialScheme::HookUuid { .. })
                | (Self::BasicAuth { .. }, CredentialScheme::BasicAuth)
        )
    }
}

// ============================================================================
// WebhookConfig
// ============================================================================

/// Immutable per-hook configuration.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    provider: ProviderKind,
    scheme: CredentialScheme,
    verifier: CredentialVerifier,
}

impl WebhookConfig {
    /// Apply `options` in order and build the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnsupportedOption`] when an option does not belong to
    ///   the provider's credential scheme.
    /// - [`ConfigError::EmptyCredential`] when a secret or hook UUID is empty.
    ///
    /// Basic auth with both username and password empty is accepted and
    /// leaves verification disabled.
    pub fn from_options(
        provider: ProviderKind,
        scheme: CredentialScheme,
        options: impl IntoIterator<Item = WebhookOption>,
    ) -> Result<Self, ConfigError> {
        let mut credential = None;
        for option in options {
            if !option.is_supported_by(scheme) {
                return Err(ConfigError::UnsupportedOption {
                    provider,
                    option: option.name(),
                });
            }
            if let WebhookOption::Secret(value) | WebhookOption::HookUuid(value) = &option {
                if value.is_empty() {
                    return Err(ConfigError::EmptyCredential {
                        option: option.name(),
                    });
                }
            }
            credential = Some(option);
        }

        let verifier = match (scheme, credential) {
            (_, None) => CredentialVerifier::Disabled,
            (CredentialScheme::HookUuid { header }, Some(WebhookOption::HookUuid(expected))) => {
                CredentialVerifier::HookUuid { header, expected }
            }
            (CredentialScheme::BasicAuth, Some(WebhookOption::BasicAuth { username, password })) => {
                if username.is_empty() && password.is_empty() {
                    CredentialVerifier::Disabled
                } else {
                    CredentialVerifier::BasicAuth { username, password }
                }
            }
            (
                CredentialScheme::HmacSignature {
                    header,
                    prefix,
                    algorithm,
                },
                Some(WebhookOption::Secret(secret)),
            ) => CredentialVerifier::HmacSignature {
                header,
                prefix,
                algorithm,
                secret,
            },
            (CredentialScheme::TokenDigest { header }, Some(WebhookOption::Secret(secret))) => {
                CredentialVerifier::TokenDigest {
                    header,
                    digest: token_digest(secret.expose().as_bytes()),
                }
            }
            (_, Some(option)) => {
                return Err(ConfigError::UnsupportedOption {
                    provider,
                    option: option.name(),
                })
            }
        };

        if scheme != CredentialScheme::Unauthenticated && !verifier.is_enabled() {
            warn!(
                provider = %provider,
                "No credentials configured; deliveries will be accepted without verification"
            );
        }

        Ok(Self {
            provider,
            scheme,
            verifier,
        })
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn scheme(&self) -> CredentialScheme {
        self.scheme
    }

    /// Whether deliveries are checked against configured credentials.
    pub fn verifies_credentials(&self) -> bool {
        self.verifier.is_enabled()
    }

    pub(crate) fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
