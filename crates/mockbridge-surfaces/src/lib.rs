//! In-memory outbound HTTP mocking surfaces.
//!
//! Each surface implements one registration shape the bridge understands:
//!
//! - [`CallbacksMock`]: method, URL regex and `(status, headers, body)` callback
//! - [`Mocker`] / [`Adapter`]: matchers on an adapter mounted at a URL prefix
//! - [`ScopedMock`]: a callback registry alive only inside an activation scope
//! - [`Interceptor`]: global-style method and URI registrations
//!
//! Calls are sent with each surface's `send` method; nothing touches a socket.

mod adapter;
mod callbacks;
mod error;
mod interceptor;
mod registry;
mod scoped;

pub use adapter::{Adapter, Mocker, RecordedRequest};
pub use callbacks::CallbacksMock;
pub use error::TransportError;
pub use interceptor::Interceptor;
pub use scoped::{ScopeGuard, ScopedMock};
