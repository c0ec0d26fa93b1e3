//! A registry that only exists while a mocking scope is open.

use crate::error::TransportError;
use crate::registry::Registry;
use mockbridge_core::{
    Capability, HttpMethod, InterceptedCall, MatchOrder, MockSurface, RegistrationId, Reply,
    ReplyCallback, ScopedRegistry, SurfaceError,
};
use regex::Regex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Callback registry tied to an activation scope.
///
/// Registrations are refused while inactive, and closing the scope drops all
/// of them. Calls made outside the scope are not mocked.
pub struct ScopedMock {
    active: AtomicBool,
    registry: Registry<ReplyCallback>,
}

impl ScopedMock {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            registry: Registry::new(),
        }
    }

    /// Open the scope until the guard is dropped.
    pub fn activate(&self) -> ScopeGuard<'_> {
        self.start();
        ScopeGuard { mock: self }
    }

    pub fn start(&self) {
        self.active.store(true, Ordering::SeqCst);
    }

    /// Close the scope and drop every registration.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.registry.clear();
    }

    pub fn send(&self, call: InterceptedCall) -> Result<Reply, TransportError> {
        let unmocked = || TransportError::Unmocked {
            method: call.method,
            url: call.url.clone(),
        };
        if !self.is_active() {
            return Err(unmocked());
        }
        let callback = self
            .registry
            .lookup(call.method, &call.url, MatchOrder::FirstRegistered)
            .ok_or_else(unmocked)?;
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
}

impl Default for ScopedMock {
    fn default() -> Self {
        Self::new()
    }
}

/// Open scope of a [`ScopedMock`].
#[must_use = "the scope closes when the guard is dropped"]
pub struct ScopeGuard<'a> {
    mock: &'a ScopedMock,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.mock.stop();
    }
}

impl ScopedRegistry for ScopedMock {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn add_callback(
        &self,
        method: HttpMethod,
        url: Regex,
        callback: ReplyCallback,
    ) -> Result<RegistrationId, SurfaceError> {
        if !self.is_active() {
            return Err(SurfaceError::Inactive);
        }
        Ok(self.registry.insert(method, url, callback))
    }

    fn remove_callback(&self, id: RegistrationId) {
        self.registry.remove(id);
    }
}

impl MockSurface for ScopedMock {
    fn capability(&self) -> Capability<'_> {
        Capability::Scoped(self)
    }

    fn surface_name(&self) -> &'static str {
        "ScopedMock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockbridge_core::Headers;
    use rstest::rstest;
    use std::sync::Arc;

    fn ok() -> ReplyCallback {
        Arc::new(|_: InterceptedCall| {
            Ok(Reply {
                status: 204,
                headers: Headers::new(),
                body: Vec::new(),
            })
        })
    }

    #[rstest]
    fn test_inactive_refuses_registrations() {
        let mock = ScopedMock::new();
        let result = mock.add_callback(HttpMethod::Get, Regex::new(".").expect("regex"), ok());
        assert_eq!(result, Err(SurfaceError::Inactive));
    }

    #[rstest]
    fn test_guard_drop_resets() {
        let mock = ScopedMock::new();
        {
            let _scope = mock.activate();
            mock.add_callback(HttpMethod::Get, Regex::new(".").expect("regex"), ok())
                .expect("Should register");
            let response = mock
                .send(InterceptedCall::new(HttpMethod::Get, "http://h/"))
                .expect("Should answer");
            assert_eq!(response.status, 204);
        }
        assert!(mock.is_empty());
        let result = mock.send(InterceptedCall::new(HttpMethod::Get, "http://h/"));
        assert!(matches!(result, Err(TransportError::Unmocked { .. })));
    }
}
