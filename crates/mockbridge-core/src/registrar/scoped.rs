//! Scoped registries: callback registries that only exist while a scope is open.

use crate::bridge::DispatchBridge;
use crate::error::{RegistrationError, SurfaceError};
use crate::registrar::callbacks::reply_callback;
use crate::surface::{RegistrationId, ScopedRegistry};
use crate::types::method::HttpMethod;
use regex::Regex;

/// Registering outside the scope would leave calls unmocked silently.
pub(super) fn check(registry: &dyn ScopedRegistry, surface: &str) -> Result<(), RegistrationError> {
    if registry.is_active() {
        Ok(())
    } else {
        Err(RegistrationError::InactiveScope {
            surface: surface.to_owned(),
        })
    }
}

pub(super) fn register(
    registry: &dyn ScopedRegistry,
    method: HttpMethod,
    url: Regex,
    bridge: DispatchBridge,
) -> Result<RegistrationId, SurfaceError> {
    registry.add_callback(method, url, reply_callback(bridge))
}
