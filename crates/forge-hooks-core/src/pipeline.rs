//! The intake pipeline shared by every provider.
//!
//! A provider is a zero-sized marker type implementing [`Provider`]: it names
//! where the event identifier comes from, how deliveries are authenticated,
//! which events exist and, for wrapper events, how to reclassify them.
//! [`Webhook<P>`] runs the same sequence of checks for all of them.
//!
//! # Order of checks
//!
//! 1. Subscription list must be non-empty.
//! 2. Method must be `POST`.
//! 3. Event identifier read from its header (header-identified providers).
//! 4. Header-level credentials.
//! 5. Registry lookup, then subscription (header-identified providers).
//! 6. Body read, exactly once.
//! 7. Body signature.
//! 8. Event identifier read from the body envelope, then registry lookup and
//!    subscription (envelope-identified providers).
//! 9. Classification and decode. A reclassified event goes through the
//!    registry lookup and subscription again under its new identifier.
//!
//! The body is drained and released when the call returns, whichever step
//! ended it.

use crate::{
    auth::CredentialScheme,
    config::{WebhookConfig, WebhookOption},
    decode::{decode_payload, Payload},
    error::{ConfigError, ParseError},
    registry::{Schema, SchemaRegistry, StaticRegistry},
    request::{header_str, BodyGuard, RawRequest},
    subscription::SubscriptionSet,
    Event, ProviderKind,
};
use http::Method;
use std::{fmt, io::Read, marker::PhantomData, sync::Arc};
use tracing::{debug, instrument};

/// Where a provider puts the event identifier.
#[derive(Clone, Copy)]
pub enum Identification {
    /// The literal value of this header is the identifier.
    Header(&'static str),

    /// The identifier is embedded in the body and read by decoding a small
    /// envelope before the full payload.
    Envelope(fn(&[u8]) -> Result<Event, ParseError>),
}

impl fmt::Debug for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(header) => f.debug_tuple("Header").field(header).finish(),
            Self::Envelope(_) => f.write_str("Envelope"),
        }
    }
}

/// Outcome of inspecting a body for its concrete event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Decode with the schema registered for the current event.
    Resolved,

    /// The current event is a wrapper; continue as this event instead.
    Redispatch(Event),

    /// Decode with this schema while keeping the current event.
    Schema(Schema),
}

/// Compile-time description of one webhook source.
pub trait Provider: Send + Sync + 'static {
    const KIND: ProviderKind;
    const IDENTIFICATION: Identification;
    const CREDENTIALS: CredentialScheme;
    const REGISTRY: StaticRegistry;

    /// Inspect the raw body of an admitted event.
    ///
    /// Only providers with wrapper events override this.
    fn classify(_event: &Event, _body: &[u8]) -> Result<Classification, ParseError> {
        Ok(Classification::Resolved)
    }
}

// ============================================================================
// Webhook
// ============================================================================

/// A configured receiver for one provider.
///
/// Cheap to clone; clones share the same immutable configuration and
/// registry, so one instance can serve concurrent deliveries.
pub struct Webhook<P: Provider> {
    config: Arc<WebhookConfig>,
    registry: Arc<dyn SchemaRegistry>,
    provider: PhantomData<fn() -> P>,
}

impl<P: Provider> Clone for Webhook<P> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            registry: Arc::clone(&self.registry),
            provider: PhantomData,
        }
    }
}

impl<P: Provider> fmt::Debug for Webhook<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Webhook")
            .field("provider", &P::KIND)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P: Provider> Webhook<P> {
    /// Build a hook using the provider's built-in event table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any option is rejected; no hook is built.
    pub fn new(options: impl IntoIterator<Item = WebhookOption>) -> Result<Self, ConfigError> {
        Self::with_registry(options, Arc::new(P::REGISTRY))
    }

    /// Build a hook that resolves events through `registry`.
    pub fn with_registry(
        options: impl IntoIterator<Item = WebhookOption>,
        registry: Arc<dyn SchemaRegistry>,
    ) -> Result<Self, ConfigError> {
        let config = WebhookConfig::from_options(P::KIND, P::CREDENTIALS, options)?;
        Ok(Self {
            config: Arc::new(config),
            registry,
            provider: PhantomData,
        })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Events in the provider's built-in table.
    pub fn events() -> impl Iterator<Item = &'static Event> {
        P::REGISTRY.events()
    }

    /// Authenticate, identify and decode one delivery.
    ///
    /// `events` lists the identifiers the caller accepts. For GitLab wrapper
    /// events both the wrapper and the concrete event must be listed.
    ///
    /// # Errors
    ///
    /// Exactly one [`ParseError`] describing the first check that failed.
    #[instrument(skip(self, request, events), fields(provider = %P::KIND, subscribed = events.len()))]
    pub fn parse<B: Read>(
        &self,
        request: RawRequest<B>,
        events: &[Event],
    ) -> Result<Payload, ParseError> {
        let (method, headers, body) = request.into_parts();
        let mut body = BodyGuard::new(body);

        let subscriptions = SubscriptionSet::new(events)?;
        if method != Method::POST {
            return Err(ParseError::InvalidMethod {
                method: method.to_string(),
            });
        }

        let claimed = match P::IDENTIFICATION {
            Identification::Header(header) => {
                let event = header_str(&headers, header)
                    .map(Event::new)
                    .ok_or(ParseError::MissingEventHeader { header })?;
                debug!(%event, "Identified event from header");
                Some(event)
            }
            Identification::Envelope(_) => None,
        };

        let verifier = self.config.verifier();
        verifier.verify_headers(&headers)?;

        let admitted = match claimed {
            Some(event) => {
                let schema = self.admit(&event, &subscriptions)?;
                Some((event, schema))
            }
            None => None,
        };

        let raw = body.read_all()?;
        verifier.verify_body(&headers, &raw)?;

        let (event, schema) = match (admitted, P::IDENTIFICATION) {
            (Some(admitted), _) => admitted,
            (None, Identification::Envelope(identify)) => {
                let event = identify(&raw)?;
                debug!(%event, "Identified event from body envelope");
                let schema = self.admit(&event, &subscriptions)?;
                (event, schema)
            }
            (None, Identification::Header(header)) => {
                return Err(ParseError::MissingEventHeader { header })
            }
        };

        self.dispatch(event, schema, &raw, &subscriptions)
    }

    /// Resolve `event` in the registry and require it to be subscribed.
    fn admit(
        &self,
        event: &Event,
        subscriptions: &SubscriptionSet<'_>,
    ) -> Result<Schema, ParseError> {
        let schema = self
            .registry
            .resolve(event)
            .ok_or_else(|| ParseError::UnknownEvent {
                event: event.as_str().to_string(),
            })?;
        subscriptions.require(event)?;
        Ok(schema)
    }

    fn dispatch(
        &self,
        mut event: Event,
        mut schema: Schema,
        body: &[u8],
        subscriptions: &SubscriptionSet<'_>,
    ) -> Result<Payload, ParseError> {
        loop {
            match P::classify(&event, body)? {
                Classification::Resolved => return decode_payload(P::KIND, event, schema, body),
                Classification::Schema(target) => {
                    debug!(%event, schema = %target, "Classified wrapper event");
                    return decode_payload(P::KIND, event, target, body);
                }
                Classification::Redispatch(next) => {
                    debug!(from = %event, to = %next, "Reclassified wrapper event");
                    schema = self.admit(&next, subscriptions)?;
                    event = next;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
