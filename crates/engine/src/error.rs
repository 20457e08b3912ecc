//! Error types for the backing-track engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while building a plan or rendering a track.
///
/// Per the design, `UnknownArtist` and a post-mix peak above 1.0 are not
/// represented here: both are recoverable conditions handled inline (see
/// `artist::lookup` and `effects::normalize`) rather than propagated.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request failed validation at the boundary.
    #[error("invalid field '{field}': {message}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// Human-readable explanation.
        message: String,
    },

    /// The audio output directory could not be created, or the atomic
    /// rename of the rendered WAV failed.
    #[error("filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    /// The optional LLM refiner failed; callers should fall back to the
    /// deterministic refiner rather than propagate this further.
    #[error("LLM refiner error: {message}")]
    LlmRefiner {
        /// Human-readable explanation.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an LLM refiner error.
    pub fn llm_refiner(message: impl Into<String>) -> Self {
        Self::LlmRefiner {
            message: message.into(),
        }
    }
}
