//! Synchronization core for Tandem
//!
//! Thread-safe building blocks shared by a platform-owned event thread and a
//! single update thread that produces one frame per rendezvous.
//!
//! # Components
//!
//! - [`Rendezvous`]: start/done signal pair serializing frame production
//! - [`ContextHandoff`]: one-shot delivery of the platform graphics context
//! - [`StateStore`]: foreground flag, FPS mode, sizes, cached device scale
//! - [`InputAggregator`]: pending keys, runes and touches drained per frame
//! - [`RenderThread`]: job queue executed on the host's render thread
//! - [`Latch`]: one-way release signal used for gates and cancellation

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod handoff;
mod hooks;
mod input;
mod latch;
mod render_thread;
mod rendezvous;
mod state;

pub use error::{AudioError, HandoffError, RenderThreadError, RendezvousError};
pub use handoff::ContextHandoff;
pub use hooks::{FixedScale, Hooks, NoopHooks, RenderRequester, ScaleSource};
pub use input::{InputAggregator, InputSource, InputState, Key, Touch, TouchId};
pub use latch::Latch;
pub use render_thread::RenderThread;
pub use rendezvous::Rendezvous;
pub use state::{DEFAULT_OUTSIDE_SIZE, FpsMode, StateStore};
