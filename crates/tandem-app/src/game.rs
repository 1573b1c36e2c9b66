//! Seams to the graphics driver and the frame callback.
//!
//! Both are external collaborators: the driver factory picks and initializes
//! a GPU backend, and the [`Game`] produces one frame per rendezvous. The
//! orchestrator only wires them together.

use std::sync::Arc;

use tandem_core::{InputSource, RenderThread};

use crate::{DriverError, FrameError};

/// Graphics library preference and result of driver selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphicsLibrary {
    /// Let the driver factory choose.
    #[default]
    Auto,
    /// OpenGL ES.
    OpenGl,
    /// Metal.
    Metal,
}

/// Inputs for creating a graphics driver.
pub struct DriverInit<C> {
    /// Platform-owned context. Present only when the platform drives painting.
    pub context: Option<C>,
    /// Queue for commands that must run on the host's render thread. Present
    /// only when the host drives frames through `UserInterface::update`.
    pub render_thread: Option<Arc<RenderThread>>,
    /// Preferred graphics library.
    pub library: GraphicsLibrary,
}

/// Creates the graphics driver on the update thread.
pub trait DriverFactory<C>: Send + 'static {
    /// Driver handle passed to every frame.
    type Driver: Send + 'static;

    /// Create a driver, returning it with the library actually chosen.
    fn create(&self, init: DriverInit<C>) -> Result<(Self::Driver, GraphicsLibrary), DriverError>;
}

/// Everything a frame callback sees for one frame.
pub struct FrameContext<'a, G> {
    /// Graphics driver handle.
    pub driver: &'a mut G,
    /// Logical outside size (width, height).
    pub outside_size: (f64, f64),
    /// Cached device scale factor.
    pub device_scale_factor: f64,
    /// Aggregated input; reading it consumes pending runes.
    pub input: &'a dyn InputSource,
}

/// Game-level frame production.
pub trait Game<G>: Send + 'static {
    /// Produce exactly one frame.
    fn update_frame(&mut self, frame: FrameContext<'_, G>) -> Result<(), FrameError>;
}
