//! Seams to collaborators outside the core.
//!
//! Audio, the GPU resource cache, the device display metrics and the host's
//! explicit-rendering mechanism are owned elsewhere. The core only calls into
//! them at well-defined points, through the traits below.

use crate::AudioError;

/// Side effects triggered by lifecycle transitions.
pub trait Hooks: Send + Sync {
    /// Resume audio playback. Called exactly when entering the foreground.
    fn resume_audio(&self) -> Result<(), AudioError>;

    /// Suspend audio playback. Called exactly when leaving the foreground.
    fn suspend_audio(&self) -> Result<(), AudioError>;

    /// Previously created GPU resources are gone and must be recreated lazily.
    fn on_context_lost(&self) {}
}

/// Hooks that do nothing. Useful when no audio subsystem is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl Hooks for NoopHooks {
    fn resume_audio(&self) -> Result<(), AudioError> {
        Ok(())
    }

    fn suspend_audio(&self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Platform query for the device scale factor (physical pixels per logical
/// unit).
pub trait ScaleSource: Send + Sync {
    /// Current device scale factor. Must be positive.
    fn device_scale_factor(&self) -> f64;
}

/// Scale source returning a constant.
#[derive(Debug, Clone, Copy)]
pub struct FixedScale(pub f64);

impl ScaleSource for FixedScale {
    fn device_scale_factor(&self) -> f64 {
        self.0
    }
}

/// Host mechanism for rendering only when asked to.
///
/// Installed by embedders whose view supports on-demand redraws.
pub trait RenderRequester: Send + Sync {
    /// Switch the host view between continuous and explicit rendering.
    fn set_explicit_rendering_mode(&self, explicit: bool);

    /// Ask the host for a redraw if it is in explicit rendering mode.
    fn request_render_if_needed(&self);
}
