//! Core value types shared by the extractor, translator, bridge and registrar.

pub mod body;
pub mod call;
pub mod headers;
pub mod method;
pub mod response;
pub mod route;
