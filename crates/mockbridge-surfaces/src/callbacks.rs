//! A callback registry in the style of `responses`.

use crate::error::TransportError;
use crate::registry::Registry;
use mockbridge_core::{
    CallbackRegistry, Capability, HttpMethod, InterceptedCall, MockSurface, RegistrationId, Reply,
    ReplyCallback, SurfaceError,
};
use regex::Regex;

/// Regex, method and callback registrations; the first registered match answers.
///
/// A call matching nothing is refused, as if no server were listening.
pub struct CallbacksMock {
    registry: Registry<ReplyCallback>,
}

impl CallbacksMock {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Send `call` through the mock.
    pub fn send(&self, call: InterceptedCall) -> Result<Reply, TransportError> {
        let callback = self
            .registry
            .lookup(call.method, &call.url, mockbridge_core::MatchOrder::FirstRegistered)
            .ok_or_else(|| TransportError::ConnectionRefused {
                method: call.method,
                url: call.url.clone(),
            })?;
        callback(call).map_err(TransportError::Callback)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn call_count(&self, id: RegistrationId) -> usize {
        self.registry.call_count(id)
    }

    pub fn total_calls(&self) -> usize {
        self.registry.total_calls()
    }

    /// Drop every registration.
    pub fn reset(&self) {
        self.registry.clear();
    }
}

impl Default for CallbacksMock {
    fn default() -> Self {
        Self::new()
    }
}

impl CallbackRegistry for CallbacksMock {
    fn add_callback(
        &self,
        method: HttpMethod,
        url: Regex,
        callback: ReplyCallback,
    ) -> Result<RegistrationId, SurfaceError> {
        Ok(self.registry.insert(method, url, callback))
    }

    fn remove_callback(&self, id: RegistrationId) {
        self.registry.remove(id);
    }
}

impl MockSurface for CallbacksMock {
    fn capability(&self) -> Capability<'_> {
        Capability::Callbacks(self)
    }

    fn surface_name(&self) -> &'static str {
        "CallbacksMock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockbridge_core::Headers;
    use rstest::rstest;
    use std::sync::Arc;

    fn reply(text: &'static str) -> ReplyCallback {
        Arc::new(move |_: InterceptedCall| {
            Ok(Reply {
                status: 200,
                headers: Headers::new(),
                body: text.as_bytes().to_vec(),
            })
        })
    }

    #[rstest]
    fn test_first_registration_wins() {
        let mock = CallbacksMock::new();
        let first = mock
            .add_callback(HttpMethod::Get, Regex::new("^http://h/").expect("regex"), reply("a"))
            .expect("Should register");
        mock.add_callback(HttpMethod::Get, Regex::new("^http://h/x").expect("regex"), reply("b"))
            .expect("Should register");

        let response = mock
            .send(InterceptedCall::new(HttpMethod::Get, "http://h/x"))
            .expect("Should answer");
        assert_eq!(response.text(), "a");
        assert_eq!(mock.call_count(first), 1);
    }

    #[rstest]
    fn test_unmatched_is_refused() {
        let mock = CallbacksMock::new();
        let result = mock.send(InterceptedCall::new(HttpMethod::Get, "http://h/"));
        assert!(matches!(result, Err(TransportError::ConnectionRefused { .. })));
    }

    #[rstest]
    fn test_remove_callback() {
        let mock = CallbacksMock::new();
        let id = mock
            .add_callback(HttpMethod::Get, Regex::new(".").expect("regex"), reply("a"))
            .expect("Should register");
        mock.remove_callback(id);
        assert!(mock.is_empty());
    }
}
