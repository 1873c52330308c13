//! Error types shared across the rendering pipeline.
//!
//! Adapters surface failures as [`RenderError`] values; the facade's public
//! `render*` entry points never propagate them to callers. Instead every
//! failure is converted into an empty-string result plus an error event, so
//! a broken template can never crash the embedding application.

use thiserror::Error;

/// Errors produced while resolving or invoking a template backend.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The backend rejected the template or its data.
    #[error("{engine} engine failed to render: {message}")]
    Engine {
        /// Canonical name of the dialect whose backend failed.
        engine: &'static str,
        /// Cleaned-up message from the underlying library.
        message: String,
    },

    /// The dialect is recognized but no backend exists in this build.
    #[error("no {0} backend is available; register a custom engine to render this dialect")]
    BackendUnavailable(&'static str),

    /// The render data could not be converted for the backend.
    #[error("render data is not usable by the {engine} engine: {message}")]
    Data {
        engine: &'static str,
        message: String,
    },

    /// Reading a template or writing rendered output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Wrap a backend library error, keeping only its display form.
    pub fn engine(engine: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Engine {
            engine,
            message: err.to_string(),
        }
    }
}
