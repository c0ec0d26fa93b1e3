//! Scheme adapters: matchers registered on an adapter mounted at a URL prefix.

use crate::bridge::{fill_context, DispatchBridge};
use crate::error::{RegistrationError, SurfaceError};
use crate::matching::BaseUrl;
use crate::surface::{ContextCallback, RegistrationId, SchemeAdapter};
use crate::types::call::InterceptedCall;
use crate::types::method::HttpMethod;
use crate::types::response::ResponseContext;
use regex::Regex;
use std::sync::Arc;

/// The adapter only ever sees URLs starting with its prefix.
pub(super) fn check(adapter: &dyn SchemeAdapter, base: &BaseUrl) -> Result<(), RegistrationError> {
    let prefix = adapter.prefix();
    let base_url = base.to_string();
    let covered = base_url
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
    if covered {
        Ok(())
    } else {
        Err(RegistrationError::SchemeMismatch {
            prefix: prefix.to_owned(),
            base_url,
        })
    }
}

pub(super) fn register(
    adapter: &dyn SchemeAdapter,
    method: HttpMethod,
    matcher: Regex,
    bridge: DispatchBridge,
) -> Result<RegistrationId, SurfaceError> {
    let callback: ContextCallback =
        Arc::new(move |call: InterceptedCall, context: &mut ResponseContext| {
            fill_context(bridge.dispatch(call)?, context)
        });
    adapter.register_uri(method, matcher, callback)
}
