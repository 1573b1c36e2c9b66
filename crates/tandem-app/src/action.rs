//! Platform side-effects.
//!
//! This module defines the [`PlatformAction`] enum, which represents
//! instructions produced by the [`crate::Translator`] for the platform event
//! loop to execute.

/// Actions produced by the lifecycle translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformAction {
    /// Ask the platform for another paint opportunity.
    ///
    /// Paint events do not repeat on their own; each one must be re-armed.
    RequestPaint,

    /// Present the frame that was just produced.
    Publish,
}
