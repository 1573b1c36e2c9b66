//! Frame orchestration on the update thread.
//!
//! The [`Runtime`] owns the update loop:
//!
//! 1. Obtain the graphics context (main-loop mode) or lend the render-thread
//!    queue to the driver (host-driven mode)
//! 2. Create the graphics driver and publish the chosen library
//! 3. Wait for the first platform size (main-loop mode)
//! 4. Forever: wait for a start signal, read size and scale, run the frame
//!    callback, signal done
//!
//! The loop never ends under normal operation. Any failure stops it and is
//! reported upward; a panic anywhere in the run is caught by the fault
//! boundary in [`Runtime::run`] and converted into [`RunError::Panicked`].

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use tandem_core::{HandoffError, Rendezvous};

use crate::{DriverFactory, DriverInit, FrameContext, Game, RunError, UserInterface};

/// Who drives frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// The platform library owns the event loop and paints drive frames.
    MainLoop,
    /// An embedding host calls `UserInterface::update` once per frame.
    HostDriven,
}

/// Update-thread orchestrator.
///
/// # Type Parameters
///
/// - `C`: Platform graphics context
/// - `F`: Graphics driver factory
/// - `G`: Frame callback
pub struct Runtime<C, F, G>
where
    F: DriverFactory<C>,
    G: Game<F::Driver>,
{
    ui: Arc<UserInterface<C>>,
    factory: F,
    game: G,
    mode: RunMode,
}

impl<C, F, G> Runtime<C, F, G>
where
    C: Send + 'static,
    F: DriverFactory<C>,
    G: Game<F::Driver>,
{
    /// Create a runtime for the given interface.
    pub fn new(ui: Arc<UserInterface<C>>, factory: F, game: G, mode: RunMode) -> Self {
        Self { ui, factory, game, mode }
    }

    /// Run the update loop until it fails or the interface shuts down.
    ///
    /// Returns `Ok(())` only on shutdown. Panics are caught and returned as
    /// [`RunError::Panicked`]; the running flag is cleared on every exit path.
    pub fn run(mut self) -> Result<(), RunError> {
        let ui = Arc::clone(&self.ui);
        let result = match panic::catch_unwind(AssertUnwindSafe(|| self.run_loop())) {
            Ok(result) => result,
            Err(payload) => Err(RunError::from_panic(&*payload)),
        };
        ui.set_running(false);

        match result {
            Err(err) if err.is_shutdown() && ui.is_shut_down() => Ok(()),
            Err(RunError::Handoff(HandoffError::Closed)) if ui.is_shut_down() => Ok(()),
            other => other,
        }
    }

    /// Run, then route any failure through the interface's error channel and
    /// close the rendezvous so the platform side is released.
    pub(crate) fn run_reporting(self) {
        let ui = Arc::clone(&self.ui);
        let mode = self.mode;

        match self.run() {
            Ok(()) => tracing::debug!(?mode, "update loop stopped"),
            Err(err) => {
                tracing::error!(?mode, %err, "update loop failed");
                ui.report_error(err);
                ui.shutdown();
            },
        }
    }

    fn run_loop(&mut self) -> Result<(), RunError> {
        let (context, render_thread) = match self.mode {
            // Driver calls are only legal once the platform hands over its
            // context.
            RunMode::MainLoop => (Some(self.ui.handoff().receive()?), None),
            RunMode::HostDriven => (None, Some(Arc::clone(self.ui.render_thread()))),
        };

        self.ui.set_running(true);

        let library = self.ui.config().graphics_library;
        let (mut driver, library) =
            self.factory.create(DriverInit { context, render_thread, library })?;
        tracing::info!(?library, mode = ?self.mode, "graphics driver initialized");
        self.ui.set_graphics_library(library);

        if self.mode == RunMode::MainLoop && !self.ui.wait_size_known() {
            return Ok(());
        }

        loop {
            self.update(&mut driver)?;
        }
    }

    /// Produce exactly one frame.
    fn update(&mut self, driver: &mut F::Driver) -> Result<(), RunError> {
        let rendezvous = self.ui.rendezvous();
        rendezvous.wait_start()?;
        let _done = DoneGuard(rendezvous);

        let outside_size = self.ui.outside_size();
        let device_scale_factor = self.ui.device_scale_factor();
        self.game.update_frame(FrameContext {
            driver,
            outside_size,
            device_scale_factor,
            input: self.ui.input(),
        })?;
        Ok(())
    }
}

/// Signals frame completion when dropped, including during unwinding.
struct DoneGuard<'a>(&'a Rendezvous);

impl Drop for DoneGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.0.signal_done() {
            tracing::warn!(%err, "frame completion not delivered");
        }
    }
}
