//! Request and response bodies, buffered or chunked.

use crate::app::AppError;
use std::fmt;

/// Iterator of body chunks produced lazily by an application or a caller.
pub type ChunkStream = Box<dyn Iterator<Item = Result<Vec<u8>, AppError>> + Send>;

/// A message body.
///
/// `Chunked` bodies are consumed exactly once by [`Body::drain`]. None of the
/// mocking surfaces accept a partial response from a callback, so every
/// chunked body is buffered in full before it crosses back to a surface;
/// memory use is bounded by the complete body size.
#[derive(Default)]
pub enum Body {
    #[default]
    Empty,
    Full(Vec<u8>),
    Chunked(ChunkStream),
}

impl Body {
    pub fn chunked<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Result<Vec<u8>, AppError>>,
        I::IntoIter: Send + 'static,
    {
        Body::Chunked(Box::new(chunks.into_iter()))
    }

    pub fn is_chunked(&self) -> bool {
        matches!(self, Body::Chunked(_))
    }

    /// Known length of a buffered body; `None` for chunked bodies.
    pub fn len_hint(&self) -> Option<usize> {
        match self {
            Body::Empty => Some(0),
            Body::Full(bytes) => Some(bytes.len()),
            Body::Chunked(_) => None,
        }
    }

    /// Buffer the whole body in memory.
    ///
    /// The first chunk error is returned unchanged.
    pub fn drain(self) -> Result<Vec<u8>, AppError> {
        match self {
            Body::Empty => Ok(Vec::new()),
            Body::Full(bytes) => Ok(bytes),
            Body::Chunked(chunks) => {
                let mut buffer = Vec::new();
                for chunk in chunks {
                    buffer.extend_from_slice(&chunk?);
                }
                Ok(buffer)
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Body::Empty"),
            Body::Full(bytes) => write!(f, "Body::Full({} bytes)", bytes.len()),
            Body::Chunked(_) => f.write_str("Body::Chunked(..)"),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Full(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Full(bytes.to_vec())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Full(text.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Full(text.as_bytes().to_vec())
    }
}
