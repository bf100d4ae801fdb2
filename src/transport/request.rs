//! # Request descriptor.
//!
//! [`Request`] carries the caller's request configuration to the transport
//! on every attempt: the endpoint plus any transport-specific fields, all
//! passed through unmodified. The session never reads or rewrites it.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Opaque per-session request configuration.
///
/// Owned by the caller, immutable for the lifetime of the session, handed
/// to [`Transport::invoke`](crate::Transport::invoke) unchanged on each
/// attempt.
///
/// ## Example
/// ```rust
/// use repoll::Request;
///
/// let req = Request::new("https://example.com/api/status.json")
///     .with_field("accept", "application/json");
///
/// assert_eq!(req.url(), "https://example.com/api/status.json");
/// assert_eq!(req.field("accept"), Some("application/json"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Request {
    url: Cow<'static, str>,
    fields: BTreeMap<Cow<'static, str>, Cow<'static, str>>,
}

impl Request {
    /// Creates a descriptor for the given endpoint.
    pub fn new(url: impl Into<Cow<'static, str>>) -> Self {
        Self {
            url: url.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds a transport-specific field (header, query knob, body template —
    /// whatever the transport understands).
    pub fn with_field(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns the endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns a transport-specific field, if set.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_ref())
    }

    /// Iterates over all transport-specific fields.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }
}
