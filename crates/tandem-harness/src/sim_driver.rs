//! Simulated graphics driver.
//!
//! [`SimDriverFactory`] implements [`DriverFactory`] without touching a GPU.
//! It records every initialization through a shared [`DriverProbe`], since
//! the factory itself moves onto the update thread.

use std::{
    sync::Arc,
    thread::{self, ThreadId},
};

use parking_lot::Mutex;
use tandem_app::{DriverError, DriverFactory, DriverInit, FrameError, GraphicsLibrary};
use tandem_core::RenderThread;

/// What the factory observed when asked to create a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct InitRecord<C> {
    /// Context delivered by the platform, if any.
    pub context: Option<C>,
    /// Whether a render-thread queue was lent to the driver.
    pub has_render_thread: bool,
    /// Library requested by the configuration.
    pub requested: GraphicsLibrary,
    /// Thread the driver was created on.
    pub thread: ThreadId,
}

/// Shared view of driver initializations.
#[derive(Debug)]
pub struct DriverProbe<C>(Arc<Mutex<Vec<InitRecord<C>>>>);

impl<C> Clone for DriverProbe<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C: Clone> DriverProbe<C> {
    /// Every initialization so far.
    pub fn inits(&self) -> Vec<InitRecord<C>> {
        self.0.lock().clone()
    }
}

/// Driver factory that never touches a GPU.
#[derive(Debug)]
pub struct SimDriverFactory<C> {
    /// Library reported when the configuration asks for `Auto`.
    auto_choice: GraphicsLibrary,
    failure: Option<DriverError>,
    probe: DriverProbe<C>,
}

impl<C> SimDriverFactory<C> {
    /// Factory that succeeds, resolving `Auto` to OpenGL.
    pub fn new() -> Self {
        Self {
            auto_choice: GraphicsLibrary::OpenGl,
            failure: None,
            probe: DriverProbe(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    /// Factory whose every initialization fails with `err`.
    pub fn failing(err: DriverError) -> Self {
        Self { failure: Some(err), ..Self::new() }
    }

    /// Resolve `Auto` to `library` instead.
    #[must_use]
    pub fn choosing(mut self, library: GraphicsLibrary) -> Self {
        self.auto_choice = library;
        self
    }

    /// Handle for inspecting initializations after the factory has moved.
    pub fn probe(&self) -> DriverProbe<C> {
        self.probe.clone()
    }
}

impl<C> Default for SimDriverFactory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Send + 'static> DriverFactory<C> for SimDriverFactory<C> {
    type Driver = SimGpu;

    fn create(&self, init: DriverInit<C>) -> Result<(SimGpu, GraphicsLibrary), DriverError> {
        let DriverInit { context, render_thread, library: requested } = init;

        self.probe.0.lock().push(InitRecord {
            context,
            has_render_thread: render_thread.is_some(),
            requested,
            thread: thread::current().id(),
        });

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let library = match requested {
            GraphicsLibrary::Auto => self.auto_choice,
            other => other,
        };
        Ok((SimGpu { library, render_thread, frames: 0 }, library))
    }
}

/// Simulated graphics driver handle.
#[derive(Debug)]
pub struct SimGpu {
    library: GraphicsLibrary,
    render_thread: Option<Arc<RenderThread>>,
    frames: u64,
}

impl SimGpu {
    /// Library this driver was created for.
    pub fn library(&self) -> GraphicsLibrary {
        self.library
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Record one drawn frame.
    pub fn draw(&mut self) {
        self.frames += 1;
    }

    /// Run `f` where graphics calls are legal: on the host's render thread
    /// when one was lent, otherwise on the calling thread.
    pub fn run_graphics<R, F>(&self, f: F) -> Result<R, FrameError>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        match &self.render_thread {
            Some(render_thread) => Ok(render_thread.call(f)?),
            None => Ok(f()),
        }
    }
}
