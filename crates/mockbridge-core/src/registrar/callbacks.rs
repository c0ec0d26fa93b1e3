//! Callback registries: one `add_callback(method, regex, callback)` per pair.

use crate::bridge::{to_reply, DispatchBridge};
use crate::error::SurfaceError;
use crate::surface::{CallbackRegistry, RegistrationId, ReplyCallback};
use crate::types::call::InterceptedCall;
use crate::types::method::HttpMethod;
use regex::Regex;
use std::sync::Arc;

pub(super) fn reply_callback(bridge: DispatchBridge) -> ReplyCallback {
    Arc::new(move |call: InterceptedCall| to_reply(bridge.dispatch(call)?))
}

pub(super) fn register(
    registry: &dyn CallbackRegistry,
    method: HttpMethod,
    url: Regex,
    bridge: DispatchBridge,
) -> Result<RegistrationId, SurfaceError> {
    registry.add_callback(method, url, reply_callback(bridge))
}
