//! Error types for frame orchestration.
//!
//! Every failure category is unrecoverable for the process: there is no retry
//! policy. [`RunError`] is what the host eventually observes, either returned
//! from `UserInterface::update`/`UserInterface::run` or from a foreground
//! transition.

use std::{any::Any, error::Error as StdError};

use tandem_core::{AudioError, HandoffError, RenderThreadError, RendezvousError};
use thiserror::Error;

use crate::GraphicsLibrary;

/// Errors returned by the external frame callback.
#[derive(Error, Debug)]
pub enum FrameError {
    /// Callback failed with a plain description.
    #[error("{0}")]
    Message(String),

    /// Callback failed with an underlying error.
    #[error(transparent)]
    Source(#[from] Box<dyn StdError + Send + Sync>),

    /// A job submitted to the render thread never completed.
    #[error(transparent)]
    RenderThread(#[from] RenderThreadError),
}

impl FrameError {
    /// Frame failure with a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Errors returned by the graphics driver factory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// No driver is available for the requested library.
    #[error("graphics library {0:?} is not supported")]
    Unsupported(GraphicsLibrary),

    /// The driver failed to initialize.
    #[error("{0}")]
    Init(String),
}

/// Fatal errors surfaced to the host.
#[derive(Error, Debug)]
pub enum RunError {
    /// Graphics driver could not be created.
    #[error("graphics driver initialization failed: {0}")]
    DriverInit(#[from] DriverError),

    /// The frame callback reported a failure.
    #[error("frame update failed: {0}")]
    Frame(#[from] FrameError),

    /// The update thread panicked while producing a frame.
    #[error("update thread panicked: {message}")]
    Panicked {
        /// Panic payload rendered as text.
        message: String,
    },

    /// An audio hook failed during a foreground transition.
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// The graphics context handoff was misused or torn down.
    #[error("context handoff: {0}")]
    Handoff(#[from] HandoffError),

    /// The render rendezvous was closed.
    #[error(transparent)]
    Rendezvous(#[from] RendezvousError),

    /// The update thread could not be started.
    #[error("failed to spawn update thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl RunError {
    /// Convert a panic payload caught by the fault boundary.
    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked { message }
    }

    /// Whether this error is the orderly shutdown of the rendezvous rather
    /// than a failure.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Rendezvous(RendezvousError::Closed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_render_as_text() {
        let from_str = RunError::from_panic(&"boom");
        assert!(matches!(from_str, RunError::Panicked { ref message } if message == "boom"));

        let from_string = RunError::from_panic(&String::from("bang"));
        assert_eq!(from_string.to_string(), "update thread panicked: bang");

        let opaque = RunError::from_panic(&42u32);
        assert!(matches!(opaque, RunError::Panicked { .. }));
    }

    #[test]
    fn only_closed_rendezvous_is_shutdown() {
        assert!(RunError::Rendezvous(RendezvousError::Closed).is_shutdown());
        assert!(!RunError::Frame(FrameError::msg("bad frame")).is_shutdown());
        assert!(!RunError::Handoff(HandoffError::Closed).is_shutdown());
    }
}
