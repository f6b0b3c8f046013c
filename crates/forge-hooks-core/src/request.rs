//! Inbound request representation and body lifecycle.
//!
//! The pipeline owns the request body for the duration of one parse call.
//! [`BodyGuard`] reads it at most once and drains whatever is left when it
//! goes out of scope, so early rejections never leave unread bytes on the
//! underlying connection.

use crate::ParseError;
use bytes::Bytes;
use http::{HeaderMap, Method};
use std::io::{self, Read};

/// One inbound HTTP delivery: method, headers and an unread body.
///
/// Header lookups are case-insensitive ([`HeaderMap`] semantics).
#[derive(Debug)]
pub struct RawRequest<B> {
    method: Method,
    headers: HeaderMap,
    body: B,
}

impl<B> RawRequest<B> {
    pub fn new(method: Method, headers: HeaderMap, body: B) -> Self {
        Self {
            method,
            headers,
            body,
        }
    }

    /// Shorthand for a `POST` delivery.
    pub fn post(headers: HeaderMap, body: B) -> Self {
        Self::new(Method::POST, headers, body)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn into_parts(self) -> (Method, HeaderMap, B) {
        (self.method, self.headers, self.body)
    }
}

impl<B> From<http::Request<B>> for RawRequest<B> {
    fn from(request: http::Request<B>) -> Self {
        let (parts, body) = request.into_parts();
        Self::new(parts.method, parts.headers, body)
    }
}

// ============================================================================
// Body guard
// ============================================================================

/// Scoped owner of a request body.
///
/// Dropping the guard drains any unread bytes into [`io::sink`] and then drops
/// the reader, on success and on every error path alike.
pub(crate) struct BodyGuard<B: Read> {
    body: Option<B>,
}

impl<B: Read> BodyGuard<B> {
    pub(crate) fn new(body: B) -> Self {
        Self { body: Some(body) }
    }

    /// Read the whole body into memory.
    ///
    /// # Errors
    ///
    /// [`ParseError::EmptyOrUnreadableBody`] when the reader fails, when the
    /// body is empty, or when the body has already been consumed.
    pub(crate) fn read_all(&mut self) -> Result<Bytes, ParseError> {
        let body = self.body.as_mut().ok_or_else(ParseError::empty_body)?;

        let mut buffer = Vec::new();
        body.read_to_end(&mut buffer)
            .map_err(|e| ParseError::EmptyOrUnreadableBody { source: Some(e) })?;

        // Fully consumed; release the reader now.
        self.body = None;

        if buffer.is_empty() {
            return Err(ParseError::empty_body());
        }
        Ok(Bytes::from(buffer))
    }
}

impl<B: Read> Drop for BodyGuard<B> {
    fn drop(&mut self) {
        if let Some(mut body) = self.body.take() {
            let _ = io::copy(&mut body, &mut io::sink());
        }
    }
}

// ============================================================================
// Header helpers
// ============================================================================

/// Get a header as text. Absent, empty or non-visible-ASCII values are `None`.
pub(crate) fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
