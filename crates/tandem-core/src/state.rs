//! Shared state read by the update thread and written by the platform.
//!
//! Every field is either an atomic scalar (foreground flag, FPS mode) or
//! behind its own lock (sizes, render requester). The device scale factor is
//! computed once on first access and cached for the lifetime of the store:
//! it never changes on the class of device this runs on.

use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicBool, AtomicU8, Ordering},
};

use parking_lot::RwLock;

use crate::{AudioError, Hooks, RenderRequester, ScaleSource};

/// Default logical outside size, used until the host reports one.
pub const DEFAULT_OUTSIDE_SIZE: (f64, f64) = (640.0, 480.0);

/// Frame pacing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FpsMode {
    /// Continuous rendering synchronized to the display.
    #[default]
    VsyncOn = 0,
    /// Continuous rendering as fast as possible.
    VsyncOffMaximum = 1,
    /// Render only when explicitly requested.
    VsyncOffMinimum = 2,
}

impl FpsMode {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::VsyncOffMaximum,
            2 => Self::VsyncOffMinimum,
            _ => Self::VsyncOn,
        }
    }

    /// Whether frames are only produced on request.
    pub fn is_on_demand(self) -> bool {
        self == Self::VsyncOffMinimum
    }
}

#[derive(Debug, Clone, Copy)]
struct Sizes {
    /// Logical size reported by an embedding host view.
    outside: (f64, f64),
    /// Physical size reported by the platform event loop. Zero until known.
    pixels: (u32, u32),
}

/// Thread-safe state store shared by both threads.
pub struct StateStore {
    foreground: AtomicBool,
    fps_mode: AtomicU8,
    sizes: RwLock<Sizes>,
    scale: OnceLock<f64>,
    scale_source: Arc<dyn ScaleSource>,
    hooks: Arc<dyn Hooks>,
    render_requester: RwLock<Option<Arc<dyn RenderRequester>>>,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("foreground", &self.is_foreground())
            .field("fps_mode", &self.fps_mode())
            .field("sizes", &*self.sizes.read())
            .field("scale", &self.scale.get())
            .finish_non_exhaustive()
    }
}

impl StateStore {
    /// Create a store in the foreground with the given defaults.
    pub fn new(
        outside_size: (f64, f64),
        fps_mode: FpsMode,
        scale_source: Arc<dyn ScaleSource>,
        hooks: Arc<dyn Hooks>,
    ) -> Self {
        Self {
            foreground: AtomicBool::new(true),
            fps_mode: AtomicU8::new(fps_mode as u8),
            sizes: RwLock::new(Sizes { outside: outside_size, pixels: (0, 0) }),
            scale: OnceLock::new(),
            scale_source,
            hooks,
            render_requester: RwLock::new(None),
        }
    }

    /// Lifecycle hooks attached to this store.
    pub fn hooks(&self) -> &dyn Hooks {
        self.hooks.as_ref()
    }

    /// Whether the surface is visible and focused.
    pub fn is_foreground(&self) -> bool {
        self.foreground.load(Ordering::Acquire)
    }

    /// Record a foreground transition and run the matching audio hook.
    ///
    /// Setting the current value again is a no-op: no hook runs. Hook failures
    /// are returned to the caller; the flag keeps its new value.
    pub fn set_foreground(&self, foreground: bool) -> Result<(), AudioError> {
        let previous = self.foreground.swap(foreground, Ordering::AcqRel);
        if previous == foreground {
            return Ok(());
        }

        tracing::debug!(foreground, "foreground changed");
        if foreground { self.hooks.resume_audio() } else { self.hooks.suspend_audio() }
    }

    /// Current FPS mode.
    pub fn fps_mode(&self) -> FpsMode {
        FpsMode::from_u8(self.fps_mode.load(Ordering::Acquire))
    }

    /// Change the FPS mode and re-arm the explicit rendering mechanism.
    pub fn set_fps_mode(&self, mode: FpsMode) {
        self.fps_mode.store(mode as u8, Ordering::Release);
        self.update_explicit_rendering_mode(mode);
    }

    /// Install the host's render requester.
    pub fn set_render_requester(&self, requester: Arc<dyn RenderRequester>) {
        *self.render_requester.write() = Some(requester);
        self.update_explicit_rendering_mode(self.fps_mode());
    }

    /// Ask the host for a redraw when rendering on demand.
    pub fn request_render_if_on_demand(&self) {
        if !self.fps_mode().is_on_demand() {
            return;
        }
        if let Some(requester) = self.render_requester.read().as_ref() {
            requester.request_render_if_needed();
        }
    }

    fn update_explicit_rendering_mode(&self, mode: FpsMode) {
        if let Some(requester) = self.render_requester.read().as_ref() {
            requester.set_explicit_rendering_mode(mode.is_on_demand());
        }
    }

    /// Device scale factor, queried once and cached.
    pub fn device_scale_factor(&self) -> f64 {
        *self.scale.get_or_init(|| {
            let scale = self.scale_source.device_scale_factor();
            tracing::debug!(scale, "device scale factor cached");
            scale
        })
    }

    /// Set the logical outside size reported by an embedding host view.
    pub fn set_outside_size(&self, width: f64, height: f64) {
        self.sizes.write().outside = (width, height);
    }

    /// Set the physical size reported by the platform event loop.
    pub fn set_pixel_size(&self, width_px: u32, height_px: u32) {
        self.sizes.write().pixels = (width_px, height_px);
    }

    /// Physical size reported by the platform, `(0, 0)` until known.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.sizes.read().pixels
    }

    /// Logical outside size.
    ///
    /// A non-zero pixel size takes precedence and is converted to logical
    /// units through the device scale factor.
    pub fn outside_size(&self) -> (f64, f64) {
        let sizes = self.sizes.read();
        match sizes.pixels {
            (0, _) | (_, 0) => sizes.outside,
            (width_px, height_px) => {
                let scale = self.device_scale_factor();
                (f64::from(width_px) / scale, f64::from(height_px) / scale)
            },
        }
    }
}
