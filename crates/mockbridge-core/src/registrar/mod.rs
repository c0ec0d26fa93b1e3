//! Registration of an application's routes against a mocking surface.
//!
//! The registrar probes the surface once, checks its preconditions, extracts
//! and translates every rule, and only then starts registering. A surface
//! rejecting any registration rolls back the ones already made, so a binding
//! is either complete or absent.

mod adapter;
mod binding;
mod callbacks;
mod interceptor;
mod scoped;

pub use binding::{BindingState, MockSurfaceBinding, Registration};

use crate::app::Application;
use crate::bridge::{extract_routes, DispatchBridge};
use crate::error::{RegistrationError, Result, SurfaceError};
use crate::matching::{compile_pattern, BaseUrl, CompiledPattern};
use crate::surface::{
    CallbackRegistry, Capability, MatchOrder, MockSurface, RegistrationId, SchemeAdapter,
    ScopedRegistry, UriInterceptor,
};
use crate::types::method::HttpMethod;
use std::sync::Arc;

/// One `(pattern, method)` pair ready to be registered.
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    pub pattern: CompiledPattern,
    pub method: HttpMethod,
    pub endpoint: String,
}

/// Wires one application, mounted at one base URL, into mocking surfaces.
#[derive(Debug, Clone)]
pub struct Registrar {
    bridge: DispatchBridge,
}

impl Registrar {
    pub fn new(app: Arc<dyn Application>, base_url: &str) -> Result<Self> {
        let base = BaseUrl::parse(base_url)?;
        Ok(Self {
            bridge: DispatchBridge::new(app, base),
        })
    }

    pub fn base(&self) -> &BaseUrl {
        self.bridge.base()
    }

    /// Extract and translate every rule, one entry per `(rule, method)`.
    ///
    /// Entries follow the application's rule order.
    pub fn plan(&self) -> Result<Vec<PlannedRoute>> {
        let mut planned = Vec::new();
        for route in extract_routes(self.bridge.app())? {
            let pattern = compile_pattern(&route.path_template, self.base())?;
            for method in route.methods {
                planned.push(PlannedRoute {
                    pattern: pattern.clone(),
                    method,
                    endpoint: route.endpoint.clone(),
                });
            }
        }
        Ok(planned)
    }

    /// Register every planned route against `surface`.
    ///
    /// The returned binding owns the registrations; tearing it down or
    /// dropping it removes all of them.
    pub fn register<'s>(&self, surface: &'s dyn MockSurface) -> Result<MockSurfaceBinding<'s>> {
        let name = surface.surface_name();
        let target = Target::probe(surface.capability(), name)?;
        target.check(self.base(), name)?;

        let mut planned = self.plan()?;
        if target.match_order() == MatchOrder::LastRegistered {
            planned.reverse();
        }

        let mut binding = MockSurfaceBinding::new(target, name);
        binding.bind(planned, &self.bridge)?;
        Ok(binding)
    }
}

/// Forward calls to `base_url` on `surface` into `app` for the binding's lifetime.
pub fn add_app_to_mock<'s>(
    surface: &'s dyn MockSurface,
    app: Arc<dyn Application>,
    base_url: &str,
) -> Result<MockSurfaceBinding<'s>> {
    Registrar::new(app, base_url)?.register(surface)
}

/// A probed surface capability that can take registrations.
#[derive(Clone, Copy)]
pub(crate) enum Target<'s> {
    Callbacks(&'s dyn CallbackRegistry),
    Adapter(&'s dyn SchemeAdapter),
    Scoped(&'s dyn ScopedRegistry),
    Interceptor(&'s dyn UriInterceptor),
}

impl<'s> Target<'s> {
    fn probe(capability: Capability<'s>, surface: &str) -> std::result::Result<Self, RegistrationError> {
        match capability {
            Capability::Callbacks(registry) => Ok(Target::Callbacks(registry)),
            Capability::Adapter(adapter) => Ok(Target::Adapter(adapter)),
            Capability::Scoped(registry) => Ok(Target::Scoped(registry)),
            Capability::Interceptor(interceptor) => Ok(Target::Interceptor(interceptor)),
            Capability::Unsupported => Err(RegistrationError::UnsupportedSurface {
                surface: surface.to_owned(),
            }),
        }
    }

    fn check(&self, base: &BaseUrl, surface: &str) -> std::result::Result<(), RegistrationError> {
        match self {
            Target::Callbacks(_) | Target::Interceptor(_) => Ok(()),
            Target::Adapter(adapter) => adapter::check(*adapter, base),
            Target::Scoped(registry) => scoped::check(*registry, surface),
        }
    }

    fn match_order(&self) -> MatchOrder {
        match self {
            Target::Callbacks(registry) => registry.match_order(),
            Target::Adapter(adapter) => adapter.match_order(),
            Target::Scoped(registry) => registry.match_order(),
            Target::Interceptor(interceptor) => interceptor.match_order(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Target::Callbacks(_) => "callback registry",
            Target::Adapter(_) => "scheme adapter",
            Target::Scoped(_) => "scoped registry",
            Target::Interceptor(_) => "uri interceptor",
        }
    }

    fn register(
        &self,
        planned: &PlannedRoute,
        bridge: &DispatchBridge,
    ) -> std::result::Result<RegistrationId, SurfaceError> {
        let regex = planned.pattern.regex.clone();
        let bridge = bridge.clone();
        match self {
            Target::Callbacks(registry) => callbacks::register(*registry, planned.method, regex, bridge),
            Target::Adapter(adapter) => adapter::register(*adapter, planned.method, regex, bridge),
            Target::Scoped(registry) => scoped::register(*registry, planned.method, regex, bridge),
            Target::Interceptor(interceptor) => {
                interceptor::register(*interceptor, planned.method, regex, bridge)
            }
        }
    }

    fn deregister(&self, id: RegistrationId) {
        match self {
            Target::Callbacks(registry) => registry.remove_callback(id),
            Target::Adapter(adapter) => adapter.deregister(id),
            Target::Scoped(registry) => registry.remove_callback(id),
            Target::Interceptor(interceptor) => interceptor.unregister(id),
        }
    }
}
