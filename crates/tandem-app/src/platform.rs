//! Platform trait for abstracting the host event loop.
//!
//! The [`Platform`] trait decouples the lifecycle translator from a specific
//! application-lifecycle library. The library owns the event thread and the
//! graphics context; the core only pulls events from it and asks it to
//! publish frames or schedule paints.
//!
//! # Implementations
//!
//! - **Mobile**: wraps the platform's native activity/view event stream
//! - **Simulation**: scripted event queue recording every action

use crate::PlatformEvent;

/// Event source and presentation surface owned by the platform.
pub trait Platform<C> {
    /// Block for the next event.
    ///
    /// Returns `None` when the platform event stream has ended.
    fn next_event(&mut self) -> Option<PlatformEvent<C>>;

    /// Schedule a paint event (not marked external).
    fn request_paint(&mut self);

    /// Present the most recently produced frame.
    fn publish(&mut self);
}
