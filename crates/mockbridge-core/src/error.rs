//! Error kinds raised while wiring an application into a mocking surface.
//!
//! Every kind is raised immediately and never retried. Errors raised by the
//! application during dispatch are not part of this module: they travel back
//! through the surface unchanged as [`AppError`](crate::app::AppError).

use crate::types::method::HttpMethod;
use thiserror::Error;

/// The application's route table could not be read.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("application exposes no route table")]
    NoRouteTable,
    #[error("rule for endpoint `{endpoint}` has no path template")]
    MissingTemplate { endpoint: String },
    #[error("rule `{template}` declares no HTTP methods")]
    NoMethods { template: String },
}

/// A path template could not be translated into a URL regex.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("unsupported converter `{converter}` in `{template}`")]
    UnsupportedConverter { template: String, converter: String },
    #[error("invalid arguments for converter `{converter}` in `{template}`: {detail}")]
    InvalidConverterArgs {
        template: String,
        converter: String,
        detail: String,
    },
    #[error("malformed path template `{template}`: {detail}")]
    MalformedTemplate { template: String, detail: String },
    #[error("translated pattern does not compile: {0}")]
    Regex(#[from] regex::Error),
}

/// The mocking surface cannot take the registrations.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(
        "expected a callback registry, a scheme adapter, a scoped registry or a URI \
         interceptor, got `{surface}`"
    )]
    UnsupportedSurface { surface: String },
    #[error("scoped registry `{surface}` is not active")]
    InactiveScope { surface: String },
    #[error("adapter is bound to `{prefix}` but the base URL is `{base_url}`")]
    SchemeMismatch { prefix: String, base_url: String },
    #[error("invalid base URL `{url}`: {detail}")]
    InvalidBaseUrl { url: String, detail: String },
    #[error("surface rejected {method} {pattern}: {source}")]
    Rejected {
        method: HttpMethod,
        pattern: String,
        #[source]
        source: SurfaceError,
    },
}

/// Failure reported by a surface for a single registration call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface is not active")]
    Inactive,
    #[error("{0}")]
    Rejected(String),
}

/// Any error raised while registering an application.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
