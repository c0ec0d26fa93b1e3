//! A socket-level interceptor in the style of `httpretty`.

use crate::error::TransportError;
use crate::registry::Registry;
use mockbridge_core::{
    Capability, Headers, HttpMethod, InterceptCallback, InterceptedCall, MatchOrder, MockSurface,
    RegistrationId, Reply, SurfaceError, UriInterceptor,
};
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Method and URI registrations consulted while the interceptor is enabled.
///
/// Body callbacks receive the call, its URI and the default response headers.
pub struct Interceptor {
    enabled: AtomicBool,
    registry: Registry<InterceptCallback>,
}

impl Interceptor {
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            registry: Registry::new(),
        }
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Drop every registration. The enabled flag is left as is.
    pub fn reset(&self) {
        self.registry.clear();
    }

    pub fn send(&self, call: InterceptedCall) -> Result<Reply, TransportError> {
        let unmocked = || TransportError::Unmocked {
            method: call.method,
            url: call.url.clone(),
        };
        if !self.is_enabled() {
            return Err(unmocked());
        }
        let callback = self
            .registry
            .lookup(call.method, &call.url, MatchOrder::FirstRegistered)
            .ok_or_else(unmocked)?;

        let uri = call.url.clone();
        callback(call, &uri, &default_headers()).map_err(TransportError::Callback)
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
}

impl Default for Interceptor {
    fn default() -> Self {
        Self::new()
    }
}

fn default_headers() -> Headers {
    let mut headers = Headers::new();
    headers.append("Server", "mockbridge-interceptor");
    headers.append("Connection", "close");
    headers.append("Content-Type", "text/plain; charset=utf-8");
    headers
}

impl UriInterceptor for Interceptor {
    fn register_uri(
        &self,
        method: HttpMethod,
        uri: Regex,
        body: InterceptCallback,
    ) -> Result<RegistrationId, SurfaceError> {
        Ok(self.registry.insert(method, uri, body))
    }

    fn unregister(&self, id: RegistrationId) {
        self.registry.remove(id);
    }
}

impl MockSurface for Interceptor {
    fn capability(&self) -> Capability<'_> {
        Capability::Interceptor(self)
    }

    fn surface_name(&self) -> &'static str {
        "Interceptor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    fn test_callback_receives_uri_and_default_headers() {
        let interceptor = Interceptor::new();
        interceptor.enable();
        interceptor
            .register_uri(
                HttpMethod::Get,
                Regex::new("^http://h/").expect("regex"),
                Arc::new(|_: InterceptedCall, uri: &str, headers: &Headers| {
                    Ok(Reply {
                        status: 200,
                        headers: headers.clone(),
                        body: uri.as_bytes().to_vec(),
                    })
                }),
            )
            .expect("Should register");

        let response = interceptor
            .send(InterceptedCall::new(HttpMethod::Get, "http://h/a"))
            .expect("Should answer");
        assert_eq!(response.text(), "http://h/a");
        assert_eq!(response.headers.get("server"), Some("mockbridge-interceptor"));
    }

    #[rstest]
    fn test_disabled_passes_through() {
        let interceptor = Interceptor::new();
        let result = interceptor.send(InterceptedCall::new(HttpMethod::Get, "http://h/"));
        assert!(matches!(result, Err(TransportError::Unmocked { .. })));
    }
}
