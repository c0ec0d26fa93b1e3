//! URI interceptors: body callbacks keyed by method and URI regex.

use crate::bridge::{to_reply, DispatchBridge};
use crate::error::SurfaceError;
use crate::surface::{InterceptCallback, RegistrationId, UriInterceptor};
use crate::types::call::InterceptedCall;
use crate::types::headers::Headers;
use crate::types::method::HttpMethod;
use regex::Regex;
use std::sync::Arc;

pub(super) fn register(
    interceptor: &dyn UriInterceptor,
    method: HttpMethod,
    uri: Regex,
    bridge: DispatchBridge,
) -> Result<RegistrationId, SurfaceError> {
    // The URI and default headers the interceptor passes are not needed: the
    // call already carries the full URL and the application sets every header.
    let body: InterceptCallback =
        Arc::new(move |call: InterceptedCall, _uri: &str, _headers: &Headers| {
            to_reply(bridge.dispatch(call)?)
        });
    interceptor.register_uri(method, uri, body)
}
