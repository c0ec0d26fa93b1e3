//! Extraction, dispatch and response adaptation.

mod adapter;
mod dispatch;
mod extract;

pub use adapter::{fill_context, to_reply};
pub use dispatch::DispatchBridge;
pub use extract::extract_routes;
