//! Error types for the synchronization core.
//!
//! Each primitive reports misuse and shutdown through its own strongly-typed
//! error so callers can tell a protocol violation (delivering a context twice)
//! apart from an orderly teardown (the peer thread went away).

use thiserror::Error;

/// Errors from the one-shot graphics context handoff.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffError {
    /// A context was already delivered. Re-delivery is a logic error.
    #[error("graphics context already delivered")]
    AlreadyDelivered,

    /// The slot is empty and will never be filled again.
    #[error("context handoff closed")]
    Closed,
}

/// Errors from the render rendezvous.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendezvousError {
    /// The rendezvous was closed while a party was waiting on it.
    #[error("render rendezvous closed")]
    Closed,
}

/// Errors reported by the audio side of a foreground transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Resuming audio on entering the foreground failed.
    #[error("failed to resume audio: {0}")]
    Resume(String),

    /// Suspending audio on leaving the foreground failed.
    #[error("failed to suspend audio: {0}")]
    Suspend(String),
}

/// Errors from a job submitted to the render thread.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderThreadError {
    /// The job was dropped before it ran, or the queue was torn down.
    #[error("render thread stopped before the job completed")]
    Stopped,
}
