//! The user interface shared by the platform and update threads.
//!
//! A [`UserInterface`] owns every cross-thread handoff point: the state store,
//! the input aggregator, the context handoff, the render rendezvous, the
//! render-thread job queue and the single-slot error channel. It is created
//! once and shared through an `Arc` by the [`crate::Translator`] on the
//! platform thread and the [`crate::Runtime`] on the update thread.
//!
//! # Modes
//!
//! - **Main loop** ([`UserInterface::run`]): the platform library owns the
//!   event loop and the graphics context. Paint events drive frames.
//! - **Host driven** ([`UserInterface::run_without_main_loop`]): an embedding
//!   view calls [`UserInterface::update`] once per paint opportunity and lends
//!   its thread to the render-thread job queue for the duration of the frame.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, select};
use parking_lot::Mutex;
use tandem_core::{
    AudioError, ContextHandoff, FpsMode, Hooks, InputAggregator, Key, Latch, RenderRequester,
    RenderThread, Rendezvous, ScaleSource, StateStore, Touch,
};

use crate::{
    DriverFactory, Game, GraphicsLibrary, Platform, RunError, RunMode, Runtime, Translator,
    UiConfig,
};

/// Thread-safe hub between the platform thread and the update thread.
///
/// `C` is the platform graphics context type.
pub struct UserInterface<C> {
    config: UiConfig,
    state: StateStore,
    input: InputAggregator,
    handoff: ContextHandoff<C>,
    rendezvous: Arc<Rendezvous>,
    render_thread: Arc<RenderThread>,
    /// Released by the first platform size event.
    size_known: Latch,
    /// Released once the driver factory has chosen a library.
    graphics_ready: Latch,
    graphics_library: Mutex<Option<GraphicsLibrary>>,
    running: AtomicBool,
    err_tx: Sender<RunError>,
    err_rx: Receiver<RunError>,
}

impl<C> std::fmt::Debug for UserInterface<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInterface")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl<C: Send + 'static> UserInterface<C> {
    /// Create a user interface in the foreground with no frame in flight.
    pub fn new(
        config: UiConfig,
        scale_source: Arc<dyn ScaleSource>,
        hooks: Arc<dyn Hooks>,
    ) -> Arc<Self> {
        let (err_tx, err_rx) = bounded(1);
        Arc::new(Self {
            config,
            state: StateStore::new(config.outside_size, config.fps_mode, scale_source, hooks),
            input: InputAggregator::new(),
            handoff: ContextHandoff::new(),
            rendezvous: Arc::new(Rendezvous::new()),
            render_thread: Arc::new(RenderThread::new()),
            size_known: Latch::new(),
            graphics_ready: Latch::new(),
            graphics_library: Mutex::new(None),
            running: AtomicBool::new(false),
            err_tx,
            err_rx,
        })
    }

    /// Run with the platform library owning the main loop.
    ///
    /// Spawns the update thread, then drives `platform` on the calling thread
    /// until its event stream ends. A failure on either thread is returned:
    /// on this class of host there is no graceful recovery.
    pub fn run<F, G, P>(
        self: &Arc<Self>,
        game: G,
        factory: F,
        platform: &mut P,
    ) -> Result<(), RunError>
    where
        C: Clone,
        F: DriverFactory<C>,
        G: Game<F::Driver>,
        P: Platform<C>,
    {
        let update = self.spawn_update_thread(game, factory, RunMode::MainLoop)?;
        let result = Translator::new(Arc::clone(self)).drive(platform);

        self.shutdown();
        if update.join().is_err() {
            tracing::error!("update thread terminated outside the fault boundary");
        }

        // A failure in the last frame is reported after the stream ended.
        match (result, self.take_reported_error()) {
            (Err(err), Some(late)) if !err.is_shutdown() => {
                tracing::warn!(%late, "dropping update failure, platform failed first");
                Err(err)
            },
            (_, Some(late)) => Err(late),
            (result, None) => result,
        }
    }

    /// Run with the host driving frames through [`Self::update`].
    ///
    /// Returns once the update thread is started. Failures are reported
    /// through [`Self::update`].
    pub fn run_without_main_loop<F, G>(
        self: &Arc<Self>,
        game: G,
        factory: F,
    ) -> Result<thread::JoinHandle<()>, RunError>
    where
        F: DriverFactory<C>,
        G: Game<F::Driver>,
    {
        self.spawn_update_thread(game, factory, RunMode::HostDriven)
    }

    fn spawn_update_thread<F, G>(
        self: &Arc<Self>,
        game: G,
        factory: F,
        mode: RunMode,
    ) -> Result<thread::JoinHandle<()>, RunError>
    where
        F: DriverFactory<C>,
        G: Game<F::Driver>,
    {
        let runtime = Runtime::new(Arc::clone(self), factory, game, mode);
        let handle = thread::Builder::new().name("tandem-update".into()).spawn(move || {
            runtime.run_reporting();
        })?;
        Ok(handle)
    }
}

impl<C> UserInterface<C> {
    /// Produce one frame on behalf of the host.
    ///
    /// Must be called on the host's render thread, once per paint
    /// opportunity. Returns a failure reported by the update thread, if any,
    /// even when unfocused. Otherwise does nothing while unfocused.
    pub fn update(&self) -> Result<(), RunError> {
        if let Some(err) = self.take_reported_error() {
            return Err(err);
        }

        if !self.is_focused() {
            return Ok(());
        }

        if let Err(err) = self.rendezvous.signal_start() {
            return Err(self.take_reported_error().unwrap_or_else(|| err.into()));
        }

        // The watcher observes frame completion and stops the job loop below.
        // Spawned detached so this thread never blocks on the cancellation.
        let cancel = Arc::new(Latch::new());
        let watcher = {
            let rendezvous = Arc::clone(&self.rendezvous);
            let cancel = Arc::clone(&cancel);
            thread::Builder::new().name("tandem-frame-watcher".into()).spawn(move || {
                if let Err(err) = rendezvous.wait_done() {
                    tracing::warn!(%err, "frame watcher released without completion");
                }
                cancel.release();
            })
        };

        let jobs = match watcher {
            Ok(_) => self.render_thread.run_until(&cancel),
            Err(err) => {
                tracing::warn!(%err, "frame watcher not spawned, waiting for completion inline");
                self.render_thread
                    .run_until_done(&self.rendezvous)
                    .map_err(|err| self.take_reported_error().unwrap_or_else(|| err.into()))?
            },
        };
        tracing::trace!(jobs, "host frame finished");
        Ok(())
    }

    /// Set the logical outside size. Concurrency safe.
    pub fn set_outside_size(&self, width: f64, height: f64) {
        self.state.set_outside_size(width, height);
    }

    /// Record the physical size reported by the platform and release the
    /// "initial size known" gate on first call.
    pub fn set_pixel_size(&self, width_px: u32, height_px: u32) {
        self.state.set_pixel_size(width_px, height_px);
        if self.size_known.release() {
            tracing::debug!(width_px, height_px, "initial size known");
        }
    }

    /// Whether the platform has reported a size yet.
    pub fn is_size_known(&self) -> bool {
        self.size_known.is_released()
    }

    /// Block until the platform has reported its first size.
    ///
    /// Returns `false` if the interface was shut down first.
    pub fn wait_size_known(&self) -> bool {
        if self.size_known.is_released() {
            return true;
        }
        select! {
            recv(self.size_known.observer()) -> _ => true,
            recv(self.rendezvous.closed_signal()) -> _ => self.size_known.is_released(),
        }
    }

    /// Logical outside size seen by the next frame.
    pub fn outside_size(&self) -> (f64, f64) {
        self.state.outside_size()
    }

    /// Cached device scale factor.
    pub fn device_scale_factor(&self) -> f64 {
        self.state.device_scale_factor()
    }

    /// Push input from an embedding host view.
    ///
    /// In on-demand mode this also asks the host for a redraw.
    pub fn update_input_from_outside(
        &self,
        keys: impl IntoIterator<Item = Key>,
        runes: &[char],
        touches: impl IntoIterator<Item = Touch>,
    ) {
        self.input.update(keys, runes, touches);
        self.state.request_render_if_on_demand();
    }

    /// Enter or leave the foreground, running the matching audio hook.
    pub fn set_foreground(&self, foreground: bool) -> Result<(), AudioError> {
        self.state.set_foreground(foreground)
    }

    /// Whether the surface is in the foreground.
    pub fn is_focused(&self) -> bool {
        self.state.is_foreground()
    }

    /// Current FPS mode.
    pub fn fps_mode(&self) -> FpsMode {
        self.state.fps_mode()
    }

    /// Change the FPS mode.
    pub fn set_fps_mode(&self, mode: FpsMode) {
        self.state.set_fps_mode(mode);
    }

    /// Install the host's render requester.
    pub fn set_render_requester(&self, requester: Arc<dyn RenderRequester>) {
        self.state.set_render_requester(requester);
    }

    /// Ask for another frame when rendering on demand.
    pub fn schedule_frame(&self) {
        self.state.request_render_if_on_demand();
    }

    /// Graphics library chosen by the driver factory, once initialized.
    pub fn graphics_library(&self) -> Option<GraphicsLibrary> {
        *self.graphics_library.lock()
    }

    /// Block until the driver factory has chosen a library.
    ///
    /// Returns `None` if the update loop stopped before choosing one.
    pub fn wait_graphics_library(&self) -> Option<GraphicsLibrary> {
        if !self.graphics_ready.is_released() {
            select! {
                recv(self.graphics_ready.observer()) -> _ => {},
                recv(self.rendezvous.closed_signal()) -> _ => {},
            }
        }
        self.graphics_library()
    }

    /// Whether the update loop is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stop the update loop after its current frame.
    ///
    /// Closes the render rendezvous and the context handoff so that an update
    /// thread blocked on either is released.
    pub fn shutdown(&self) {
        self.rendezvous.close();
        self.handoff.close();
    }

    /// Whether [`Self::shutdown`] has been called or the update loop ended.
    pub fn is_shut_down(&self) -> bool {
        self.rendezvous.is_closed()
    }

    /// Configuration this interface was built with.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Shared state store.
    pub fn state(&self) -> &StateStore {
        &self.state
    }

    /// Aggregated input.
    pub fn input(&self) -> &InputAggregator {
        &self.input
    }

    /// Render rendezvous.
    pub fn rendezvous(&self) -> &Rendezvous {
        &self.rendezvous
    }

    /// Graphics context handoff slot.
    pub fn handoff(&self) -> &ContextHandoff<C> {
        &self.handoff
    }

    pub(crate) fn render_thread(&self) -> &Arc<RenderThread> {
        &self.render_thread
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    pub(crate) fn set_graphics_library(&self, library: GraphicsLibrary) {
        *self.graphics_library.lock() = Some(library);
        self.graphics_ready.release();
    }

    /// Report a late failure. Only the first one is kept.
    pub(crate) fn report_error(&self, err: RunError) {
        match self.err_tx.try_send(err) {
            Ok(()) => {},
            Err(TrySendError::Full(err) | TrySendError::Disconnected(err)) => {
                tracing::warn!(%err, "dropping error, one is already pending");
            },
        }
    }

    /// Take the pending reported failure, if any.
    pub fn take_reported_error(&self) -> Option<RunError> {
        self.err_rx.try_recv().ok()
    }
}
