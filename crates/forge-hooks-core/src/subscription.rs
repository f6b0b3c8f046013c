//! Caller-declared event subscriptions.

use crate::{Event, ParseError};

/// The events a single parse call is willing to accept.
///
/// Borrowed from the caller for the duration of the call; never stored.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionSet<'a> {
    events: &'a [Event],
}

impl<'a> SubscriptionSet<'a> {
    /// # Errors
    ///
    /// [`ParseError::NoEventsSpecified`] when `events` is empty. Callers must
    /// declare interest explicitly.
    pub fn new(events: &'a [Event]) -> Result<Self, ParseError> {
        if events.is_empty() {
            return Err(ParseError::NoEventsSpecified);
        }
        Ok(Self { events })
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.events.contains(event)
    }

    /// Require `event` to be subscribed.
    ///
    /// # Errors
    ///
    /// [`ParseError::UnsubscribedEvent`] when it is not.
    pub fn require(&self, event: &Event) -> Result<(), ParseError> {
        if self.contains(event) {
            Ok(())
        } else {
            Err(ParseError::UnsubscribedEvent {
                event: event.clone(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
