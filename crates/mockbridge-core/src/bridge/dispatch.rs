//! In-process dispatch of intercepted calls.

use crate::app::{AppError, AppRequest, Application};
use crate::matching::BaseUrl;
use crate::types::call::InterceptedCall;
use crate::types::response::SyntheticResponse;
use std::sync::Arc;

/// Routes intercepted calls into an application without any socket.
///
/// The bridge holds no mutable state and adds no locking: concurrent calls
/// reach the application concurrently.
#[derive(Clone)]
pub struct DispatchBridge {
    app: Arc<dyn Application>,
    base: BaseUrl,
}

impl DispatchBridge {
    pub fn new(app: Arc<dyn Application>, base: BaseUrl) -> Self {
        Self { app, base }
    }

    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    pub fn app(&self) -> &dyn Application {
        self.app.as_ref()
    }

    /// Execute `call` against the application exactly once.
    ///
    /// The request body is buffered before the application sees it. Errors
    /// raised by the application are returned as-is.
    pub fn dispatch(&self, call: InterceptedCall) -> Result<SyntheticResponse, AppError> {
        let InterceptedCall {
            method,
            url,
            headers,
            body,
        } = call;

        let (path, query) = self
            .base
            .app_path(&url)
            .ok_or_else(|| format!("`{url}` is not under `{}`", self.base))?;

        let request = AppRequest {
            method,
            path: path.to_owned(),
            query: query.map(str::to_owned),
            headers,
            body: body.drain()?,
        };

        let response = self.app.handle(request)?;
        tracing::debug!(%method, %url, status = response.status, "dispatched intercepted call");
        Ok(response)
    }
}

impl std::fmt::Debug for DispatchBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchBridge")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}
