//! Capability shapes of the outbound HTTP mocking surfaces the bridge targets.
//!
//! A surface advertises exactly one shape through [`MockSurface::capability`];
//! the registrar probes it once per registration and never inspects the
//! surface again while calls are dispatched.

use crate::app::AppError;
use crate::error::SurfaceError;
use crate::types::call::InterceptedCall;
use crate::types::headers::Headers;
use crate::types::method::HttpMethod;
use crate::types::response::{Reply, ResponseContext};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Handle returned by a surface for one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(pub u64);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Callback returning a `(status, headers, body)` reply.
pub type ReplyCallback =
    Arc<dyn Fn(InterceptedCall) -> Result<Reply, AppError> + Send + Sync>;

/// Callback filling a response context and returning the body.
pub type ContextCallback =
    Arc<dyn Fn(InterceptedCall, &mut ResponseContext) -> Result<Vec<u8>, AppError> + Send + Sync>;

/// Callback receiving the call, its URI and the default response headers.
pub type InterceptCallback =
    Arc<dyn Fn(InterceptedCall, &str, &Headers) -> Result<Reply, AppError> + Send + Sync>;

/// Which registration wins when several patterns match the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOrder {
    FirstRegistered,
    LastRegistered,
}

/// Registry taking a URL regex, a method and a callback per registration.
pub trait CallbackRegistry {
    fn add_callback(
        &self,
        method: HttpMethod,
        url: Regex,
        callback: ReplyCallback,
    ) -> Result<RegistrationId, SurfaceError>;

    fn remove_callback(&self, id: RegistrationId);

    fn match_order(&self) -> MatchOrder {
        MatchOrder::FirstRegistered
    }
}

/// Adapter bound to a URL scheme prefix such as `http://`.
pub trait SchemeAdapter {
    /// Prefix every URL handled by this adapter starts with.
    fn prefix(&self) -> &str;

    fn register_uri(
        &self,
        method: HttpMethod,
        matcher: Regex,
        callback: ContextCallback,
    ) -> Result<RegistrationId, SurfaceError>;

    fn deregister(&self, id: RegistrationId);

    fn match_order(&self) -> MatchOrder {
        MatchOrder::LastRegistered
    }
}

/// Registry that only accepts registrations while its scope is active.
///
/// Registrations are dropped by the surface itself when the scope ends.
pub trait ScopedRegistry {
    fn is_active(&self) -> bool;

    fn add_callback(
        &self,
        method: HttpMethod,
        url: Regex,
        callback: ReplyCallback,
    ) -> Result<RegistrationId, SurfaceError>;

    /// Removing a registration the scope already dropped is a no-op.
    fn remove_callback(&self, id: RegistrationId);

    fn match_order(&self) -> MatchOrder {
        MatchOrder::FirstRegistered
    }
}

/// Process-wide style interception registry keyed by method and URI regex.
pub trait UriInterceptor {
    fn register_uri(
        &self,
        method: HttpMethod,
        uri: Regex,
        body: InterceptCallback,
    ) -> Result<RegistrationId, SurfaceError>;

    fn unregister(&self, id: RegistrationId);

    fn match_order(&self) -> MatchOrder {
        MatchOrder::FirstRegistered
    }
}

/// Registration primitive a surface exposes.
#[derive(Clone, Copy)]
pub enum Capability<'a> {
    Callbacks(&'a dyn CallbackRegistry),
    Adapter(&'a dyn SchemeAdapter),
    Scoped(&'a dyn ScopedRegistry),
    Interceptor(&'a dyn UriInterceptor),
    Unsupported,
}

impl Capability<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Capability::Callbacks(_) => "callback registry",
            Capability::Adapter(_) => "scheme adapter",
            Capability::Scoped(_) => "scoped registry",
            Capability::Interceptor(_) => "uri interceptor",
            Capability::Unsupported => "unsupported",
        }
    }
}

impl fmt::Debug for Capability<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability({})", self.kind())
    }
}

/// An object the bridge can register an application against.
pub trait MockSurface {
    fn capability(&self) -> Capability<'_>;

    /// Name used in error messages and logs.
    fn surface_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
