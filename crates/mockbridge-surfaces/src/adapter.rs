//! A mocker and transport adapter in the style of `requests_mock`.

use crate::error::TransportError;
use crate::registry::Registry;
use mockbridge_core::{
    Capability, ContextCallback, Headers, HttpMethod, InterceptedCall, MatchOrder, MockSurface,
    RegistrationId, Reply, ResponseContext, SchemeAdapter, SurfaceError,
};
use regex::Regex;
use std::sync::{Mutex, PoisonError};

/// A request an adapter received, matched or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
}

/// Transport adapter mounted at a URL prefix such as `mock://`.
///
/// The most recently registered matcher answers. Callbacks fill in a
/// [`ResponseContext`] and return the body.
pub struct Adapter {
    prefix: String,
    registry: Registry<ContextCallback>,
    history: Mutex<Vec<RecordedRequest>>,
}

impl Adapter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            registry: Registry::new(),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Send `call` through the adapter.
    ///
    /// URLs outside the mount prefix never reach a matcher.
    pub fn send(&self, call: InterceptedCall) -> Result<Reply, TransportError> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method: call.method,
                url: call.url.clone(),
                headers: call.headers.clone(),
            });

        let mounted = call
            .url
            .get(..self.prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.prefix));
        let callback = mounted
            .then(|| {
                self.registry
                    .lookup(call.method, &call.url, MatchOrder::LastRegistered)
            })
            .flatten()
            .ok_or_else(|| TransportError::NoMockAddress {
                method: call.method,
                url: call.url.clone(),
            })?;

        let mut context = ResponseContext::default();
        let body = callback(call, &mut context).map_err(TransportError::Callback)?;
        Ok(Reply {
            status: context.status_code,
            headers: context.headers,
            body,
        })
    }

    /// Every request sent so far, oldest first.
    pub fn request_history(&self) -> Vec<RecordedRequest> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn called(&self) -> bool {
        self.call_count() > 0
    }

    pub fn call_count(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn registration_calls(&self, id: RegistrationId) -> usize {
        self.registry.call_count(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every matcher and the request history.
    pub fn reset(&self) {
        self.registry.clear();
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SchemeAdapter for Adapter {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn register_uri(
        &self,
        method: HttpMethod,
        matcher: Regex,
        callback: ContextCallback,
    ) -> Result<RegistrationId, SurfaceError> {
        Ok(self.registry.insert(method, matcher, callback))
    }

    fn deregister(&self, id: RegistrationId) {
        self.registry.remove(id);
    }
}

impl MockSurface for Adapter {
    fn capability(&self) -> Capability<'_> {
        Capability::Adapter(self)
    }

    fn surface_name(&self) -> &'static str {
        "Adapter"
    }
}

/// Adapter mounted for every URL, the way a mocker patches all transports.
pub struct Mocker {
    adapter: Adapter,
}

impl Mocker {
    pub fn new() -> Self {
        Self {
            adapter: Adapter::new(""),
        }
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn send(&self, call: InterceptedCall) -> Result<Reply, TransportError> {
        self.adapter.send(call)
    }

    pub fn request_history(&self) -> Vec<RecordedRequest> {
        self.adapter.request_history()
    }

    pub fn reset(&self) {
        self.adapter.reset();
    }
}

impl Default for Mocker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSurface for Mocker {
    fn capability(&self) -> Capability<'_> {
        Capability::Adapter(&self.adapter)
    }

    fn surface_name(&self) -> &'static str {
        "Mocker"
    }
}
