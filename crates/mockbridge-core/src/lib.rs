//! Route an in-process application's route table into HTTP mocking surfaces.
//!
//! Every `(rule, method)` pair of an [`Application`] becomes one registration
//! on a mocking surface. A matching outbound call is answered by running the
//! application in-process, so code under test talks to the real handlers
//! without a network.
//!
//! ```ignore
//! let app = App::new().route("/items/<int:item_id>", &[HttpMethod::Get], |_, p| {
//!     Ok(SyntheticResponse::json(&serde_json::json!({ "id": p.get::<i64>("item_id") })))
//! })?;
//! let binding = add_app_to_mock(&surface, Arc::new(app), "http://api.example.com")?;
//! ```

pub mod app;
pub mod bridge;
pub mod config;
pub mod error;
pub mod logging;
pub mod matching;
pub mod registrar;
pub mod surface;
pub mod types;

pub use app::{App, AppError, AppRequest, Application, Handler, PathParams};
pub use bridge::{extract_routes, DispatchBridge};
pub use error::{
    BridgeError, ExtractionError, PatternError, RegistrationError, Result, SurfaceError,
};
pub use matching::{compile_pattern, BaseUrl, CompiledPattern};
pub use registrar::{add_app_to_mock, BindingState, MockSurfaceBinding, Registrar, Registration};
pub use surface::{
    Capability, CallbackRegistry, ContextCallback, InterceptCallback, MatchOrder, MockSurface,
    RegistrationId, ReplyCallback, SchemeAdapter, ScopedRegistry, UriInterceptor,
};
pub use types::body::Body;
pub use types::call::InterceptedCall;
pub use types::headers::Headers;
pub use types::method::HttpMethod;
pub use types::response::{Reply, ResponseContext, SyntheticResponse};
pub use types::route::{RouteDescriptor, UrlRule};
