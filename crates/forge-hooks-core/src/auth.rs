//! Credential verification.
//!
//! Each provider declares one [`CredentialScheme`] at compile time. When a
//! hook is built, the scheme is combined with the configured credentials
//! into a [`CredentialVerifier`], which runs in two phases:
//!
//! - [`CredentialVerifier::verify_headers`] runs before the body is touched.
//!   It handles every scheme that only needs headers and checks that a body
//!   signature header is present.
//! - [`CredentialVerifier::verify_body`] runs on the raw body bytes, before
//!   any JSON decoding, and checks HMAC signatures.
//!
//! All secret comparisons go through [`subtle::ConstantTimeEq`].

use crate::{
    config::Secret,
    error::{AuthMethod, ParseError, SigningError},
    request::header_str,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use http::{header::AUTHORIZATION, HeaderMap};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

// ============================================================================
// Schemes
// ============================================================================

/// How a provider proves the authenticity of its deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    /// The provider has no authentication mechanism.
    Unauthenticated,

    /// A configured identity token must equal the value of `header`.
    HookUuid { header: &'static str },

    /// HTTP Basic credentials in the `Authorization` header.
    BasicAuth,

    /// HMAC of the raw body, hex encoded in `header`, optionally behind a
    /// `prefix` such as `sha256=`.
    HmacSignature {
        header: &'static str,
        prefix: Option<&'static str>,
        algorithm: HmacAlgorithm,
    },

    /// A shared token sent verbatim in `header`. The configured secret is
    /// stored as a SHA-512 digest and compared against the digest of the
    /// incoming token.
    TokenDigest { header: &'static str },
}

/// Hash function behind an HMAC signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacAlgorithm {
    Sha256,
    Sha512,
}

impl HmacAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HmacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HmacAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(format!("unsupported HMAC algorithm '{other}'")),
        }
    }
}

// ============================================================================
// Signing
// ============================================================================

/// Compute the lowercase hex HMAC of `body` keyed with `secret`.
///
/// This is the value a sender places in its signature header (after any
/// algorithm prefix).
///
/// # Examples
///
/// ```rust
/// use forge_hooks_core::{sign_payload, HmacAlgorithm};
///
/// let signature = sign_payload(HmacAlgorithm::Sha256, b"key", b"body").unwrap();
/// assert_eq!(signature.len(), 64);
/// ```
pub fn sign_payload(
    algorithm: HmacAlgorithm,
    secret: &[u8],
    body: &[u8],
) -> Result<String, SigningError> {
    Ok(hex::encode(compute_hmac(algorithm, secret, body)?))
}

fn compute_hmac(
    algorithm: HmacAlgorithm,
    secret: &[u8],
    body: &[u8],
) -> Result<Vec<u8>, SigningError> {
    let signing_error = |e: hmac::digest::InvalidLength| SigningError {
        message: e.to_string(),
    };

    let digest = match algorithm {
        HmacAlgorithm::Sha256 => {
            let mut mac = HmacSha256::new_from_slice(secret).map_err(signing_error)?;
            mac.update(body);
            mac.finalize().into_bytes().to_vec()
        }
        HmacAlgorithm::Sha512 => {
            let mut mac = HmacSha512::new_from_slice(secret).map_err(signing_error)?;
            mac.update(body);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(digest)
}

/// SHA-512 digest of a token, as stored for [`CredentialScheme::TokenDigest`].
pub(crate) fn token_digest(token: &[u8]) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(Sha512::digest(token).to_vec())
}

// ============================================================================
// Verifier
// ============================================================================

/// A [`CredentialScheme`] bound to concrete credentials.
#[derive(Clone)]
pub(crate) enum CredentialVerifier {
    /// Nothing to check, either because the provider has no scheme or
    /// because no credentials were configured.
    Disabled,

    HookUuid {
        header: &'static str,
        expected: Secret,
    },

    BasicAuth {
        username: Secret,
        password: Secret,
    },

    HmacSignature {
        header: &'static str,
        prefix: Option<&'static str>,
        algorithm: HmacAlgorithm,
        secret: Secret,
    },

    TokenDigest {
        header: &'static str,
        digest: Zeroizing<Vec<u8>>,
    },
}

impl CredentialVerifier {
    pub(crate) fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Checks that can be decided from headers alone.
    pub(crate) fn verify_headers(&self, headers: &HeaderMap) -> Result<(), ParseError> {
        match self {
            Self::Disabled => Ok(()),

            Self::HookUuid { header, expected } => {
                let presented = header_str(headers, header)
                    .ok_or(ParseError::AuthHeaderMissing { header: *header })?;
                if bool::from(presented.as_bytes().ct_eq(expected.expose().as_bytes())) {
                    Ok(())
                } else {
                    Err(ParseError::auth_failed(AuthMethod::HookUuid))
                }
            }

            Self::BasicAuth { username, password } => {
                let value = header_str(headers, AUTHORIZATION.as_str()).ok_or(
                    ParseError::AuthHeaderMissing {
                        header: "Authorization",
                    },
                )?;
                let (user, pass) = parse_basic_credentials(value)
                    .ok_or(ParseError::auth_failed(AuthMethod::BasicAuth))?;

                // Both comparisons always run.
                let user_ok = user.as_bytes().ct_eq(username.expose().as_bytes());
                let pass_ok = pass.as_bytes().ct_eq(password.expose().as_bytes());
                if bool::from(user_ok & pass_ok) {
                    Ok(())
                } else {
                    Err(ParseError::auth_failed(AuthMethod::BasicAuth))
                }
            }

            Self::HmacSignature { header, .. } => {
                header_str(headers, header).ok_or(ParseError::AuthHeaderMissing {
                    header: *header,
                })?;
                Ok(())
            }

            Self::TokenDigest { header, digest } => {
                let token = header_str(headers, header)
                    .ok_or(ParseError::AuthHeaderMissing { header: *header })?;
                let presented = token_digest(token.as_bytes());
                if bool::from(presented.as_slice().ct_eq(digest.as_slice())) {
                    Ok(())
                } else {
                    Err(ParseError::auth_failed(AuthMethod::TokenDigest))
                }
            }
        }
    }

    /// Checks that need the raw body bytes.
    pub(crate) fn verify_body(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), ParseError> {
        let Self::HmacSignature {
            header,
            prefix,
            algorithm,
            secret,
        } = self
        else {
            return Ok(());
        };

        let signature = header_str(headers, header).ok_or(ParseError::AuthHeaderMissing {
            header: *header,
        })?;
        let failed = || ParseError::auth_failed(AuthMethod::HmacSignature);

        let hex_signature = match prefix {
            Some(prefix) => signature.strip_prefix(prefix).ok_or_else(failed)?,
            None => signature,
        };
        let presented = hex::decode(hex_signature).map_err(|_| failed())?;
        let expected =
            compute_hmac(*algorithm, secret.expose().as_bytes(), body).map_err(|_| failed())?;

        if bool::from(presented.as_slice().ct_eq(expected.as_slice())) {
            Ok(())
        } else {
            Err(failed())
        }
    }
}

impl fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::HookUuid { header, .. } => f
                .debug_struct("HookUuid")
                .field("header", header)
                .field("expected", &"<REDACTED>")
                .finish(),
            Self::BasicAuth { .. } => f
                .debug_struct("BasicAuth")
                .field("username", &"<REDACTED>")
                .field("password", &"<REDACTED>")
                .finish(),
            Self::HmacSignature {
                header,
                prefix,
                algorithm,
                ..
            } => f
                .debug_struct("HmacSignature")
                .field("header", header)
                .field("prefix", prefix)
                .field("algorithm", algorithm)
                .field("secret", &"<REDACTED>")
                .finish(),
            Self::TokenDigest { header, .. } => f
                .debug_struct("TokenDigest")
                .field("header", header)
                .field("digest", &"<REDACTED>")
                .finish(),
        }
    }
}

/// Split an `Authorization: Basic ...` value into username and password.
fn parse_basic_credentials(value: &str) -> Option<(Zeroizing<String>, Zeroizing<String>)> {
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = Zeroizing::new(STANDARD.decode(encoded.trim()).ok()?);
    let decoded = std::str::from_utf8(&decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((
        Zeroizing::new(user.to_string()),
        Zeroizing::new(pass.to_string()),
    ))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
