//! Ownership of the registrations made against one surface.

use crate::bridge::DispatchBridge;
use crate::error::RegistrationError;
use crate::registrar::{PlannedRoute, Target};
use crate::surface::RegistrationId;
use crate::types::method::HttpMethod;
use std::fmt;

/// Lifecycle of a [`MockSurfaceBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unregistered,
    Registered,
    TornDown,
}

/// One live registration held by a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: RegistrationId,
    pub method: HttpMethod,
    pub template: String,
    pub endpoint: String,
    /// Source of the regex handed to the surface
    pub pattern: String,
}

/// The set of an application's routes currently registered on a surface.
///
/// Bound to the surface's scope: [`teardown`](Self::teardown) or dropping
/// the binding removes every registration it owns.
pub struct MockSurfaceBinding<'s> {
    target: Target<'s>,
    surface: &'static str,
    registrations: Vec<Registration>,
    state: BindingState,
}

impl<'s> MockSurfaceBinding<'s> {
    pub(crate) fn new(target: Target<'s>, surface: &'static str) -> Self {
        Self {
            target,
            surface,
            registrations: Vec::new(),
            state: BindingState::Unregistered,
        }
    }

    /// Register every planned route, or none of them.
    pub(crate) fn bind(
        &mut self,
        planned: Vec<PlannedRoute>,
        bridge: &DispatchBridge,
    ) -> Result<(), RegistrationError> {
        debug_assert_eq!(self.state, BindingState::Unregistered);

        for route in planned {
            match self.target.register(&route, bridge) {
                Ok(id) => {
                    tracing::debug!(
                        surface = self.surface,
                        %id,
                        method = %route.method,
                        template = %route.pattern.source_template,
                        "registered route"
                    );
                    self.registrations.push(Registration {
                        id,
                        method: route.method,
                        template: route.pattern.source_template.clone(),
                        endpoint: route.endpoint,
                        pattern: route.pattern.as_str().to_owned(),
                    });
                }
                Err(source) => {
                    tracing::warn!(
                        surface = self.surface,
                        method = %route.method,
                        template = %route.pattern.source_template,
                        rolled_back = self.registrations.len(),
                        "surface rejected registration, rolling back"
                    );
                    self.remove_all();
                    return Err(RegistrationError::Rejected {
                        method: route.method,
                        pattern: route.pattern.as_str().to_owned(),
                        source,
                    });
                }
            }
        }

        self.state = BindingState::Registered;
        tracing::info!(
            surface = self.surface,
            kind = self.target.kind(),
            routes = self.registrations.len(),
            "application bound to mocking surface"
        );
        Ok(())
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    pub fn surface(&self) -> &'static str {
        self.surface
    }

    /// Registrations in the order they were made.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Remove every registration. Calling it again does nothing.
    pub fn teardown(&mut self) {
        if self.state != BindingState::Registered {
            return;
        }
        let count = self.registrations.len();
        self.remove_all();
        self.state = BindingState::TornDown;
        tracing::info!(surface = self.surface, routes = count, "mocking surface binding torn down");
    }

    fn remove_all(&mut self) {
        for registration in self.registrations.drain(..).rev() {
            self.target.deregister(registration.id);
        }
    }
}

impl Drop for MockSurfaceBinding<'_> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for MockSurfaceBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSurfaceBinding")
            .field("surface", &self.surface)
            .field("kind", &self.target.kind())
            .field("state", &self.state)
            .field("registrations", &self.registrations)
            .finish()
    }
}
