//! Conversion of application responses into the shapes surfaces expect.
//!
//! Status codes pass through unmodified. Headers keep their order and
//! repeated names; `Content-Type` and `Content-Length` are forwarded exactly
//! as the application produced them.

use crate::app::AppError;
use crate::types::response::{Reply, ResponseContext, SyntheticResponse};

/// Tuple-shaped result for callback registries, scoped registries and
/// URI interceptors.
pub fn to_reply(response: SyntheticResponse) -> Result<Reply, AppError> {
    response.into_reply()
}

/// Context-shaped result for scheme adapters.
///
/// Status and headers go into `context`; the buffered body is returned.
pub fn fill_context(
    response: SyntheticResponse,
    context: &mut ResponseContext,
) -> Result<Vec<u8>, AppError> {
    let reply = response.into_reply()?;
    context.status_code = reply.status;
    context.headers = reply.headers;
    Ok(reply.body)
}
