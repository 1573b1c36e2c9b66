//! Render rendezvous between the platform thread and the update thread.
//!
//! A frame is produced by exactly one cycle of four calls, always in this
//! order:
//!
//! ```text
//! platform thread                 update thread
//! ---------------                 -------------
//! signal_start()  ──── start ───► wait_start()
//!                                 ... produce frame ...
//! wait_done()     ◄──── done ──── signal_done()
//! ```
//!
//! Both slots are zero-capacity channels: a send completes only when the
//! matching receive is ready. Since the update thread cannot reach its next
//! `wait_start()` before its `signal_done()` has been received, a second
//! `signal_start()` can never overlap a frame in flight.
//!
//! # Shutdown
//!
//! [`Rendezvous::close`] releases every party blocked on either slot with
//! [`RendezvousError::Closed`]. The orchestrator closes the rendezvous when
//! the update thread terminates so the platform thread is never stranded.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded, select};

use crate::{Latch, RendezvousError};

/// Pair of single-slot signals serializing frame production.
#[derive(Debug)]
pub struct Rendezvous {
    start_tx: Sender<()>,
    start_rx: Receiver<()>,
    done_tx: Sender<()>,
    done_rx: Receiver<()>,
    shutdown: Latch,
    /// Set between a successful `signal_start` and the matching `wait_done`.
    in_flight: AtomicBool,
    /// Number of completed start→done cycles.
    completed: AtomicU64,
}

impl Default for Rendezvous {
    fn default() -> Self {
        Self::new()
    }
}

impl Rendezvous {
    /// Create an open rendezvous with no frame in flight.
    pub fn new() -> Self {
        let (start_tx, start_rx) = bounded(0);
        let (done_tx, done_rx) = bounded(0);
        Self {
            start_tx,
            start_rx,
            done_tx,
            done_rx,
            shutdown: Latch::new(),
            in_flight: AtomicBool::new(false),
            completed: AtomicU64::new(0),
        }
    }

    /// Ask the update thread to produce a frame.
    ///
    /// Blocks until the update thread is waiting in [`Self::wait_start`].
    pub fn signal_start(&self) -> Result<(), RendezvousError> {
        self.send(&self.start_tx)?;
        let was_in_flight = self.in_flight.swap(true, Ordering::AcqRel);
        debug_assert!(!was_in_flight, "invariant: at most one frame in flight");
        tracing::trace!("frame started");
        Ok(())
    }

    /// Block the update thread until a start signal arrives.
    pub fn wait_start(&self) -> Result<(), RendezvousError> {
        self.recv(&self.start_rx)
    }

    /// Report that the frame requested by the last start signal is complete.
    ///
    /// Blocks until the platform side is waiting in [`Self::wait_done`].
    pub fn signal_done(&self) -> Result<(), RendezvousError> {
        self.send(&self.done_tx)
    }

    /// Block until the frame in flight has been produced.
    pub fn wait_done(&self) -> Result<(), RendezvousError> {
        self.recv(&self.done_rx)?;
        self.finish_frame();
        Ok(())
    }

    /// Run one full platform-side cycle: `signal_start` then `wait_done`.
    pub fn cycle(&self) -> Result<(), RendezvousError> {
        self.signal_start()?;
        self.wait_done()
    }

    /// Release all blocked parties and reject further signals.
    pub fn close(&self) {
        if self.shutdown.release() {
            tracing::debug!("render rendezvous closed");
        }
    }

    /// Whether [`Self::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.shutdown.is_released()
    }

    /// Receiver that becomes ready once the rendezvous is closed.
    ///
    /// Lets other blocking waits on the update thread observe shutdown through
    /// `crossbeam_channel::select!`.
    pub fn closed_signal(&self) -> &Receiver<()> {
        self.shutdown.observer()
    }

    /// Whether a frame has been started but not yet observed as done.
    pub fn is_frame_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Number of completed start→done cycles.
    pub fn completed_frames(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Done slot, for waits that select over it alongside other channels.
    ///
    /// A successful receive must be followed by [`Self::finish_frame`].
    pub(crate) fn done_slot(&self) -> &Receiver<()> {
        &self.done_rx
    }

    pub(crate) fn finish_frame(&self) {
        self.in_flight.store(false, Ordering::Release);
        let frame = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(frame, "frame completed");
    }

    fn send(&self, slot: &Sender<()>) -> Result<(), RendezvousError> {
        if self.shutdown.is_released() {
            return Err(RendezvousError::Closed);
        }
        select! {
            send(slot, ()) -> res => res.map_err(|_| RendezvousError::Closed),
            recv(self.shutdown.observer()) -> _ => Err(RendezvousError::Closed),
        }
    }

    fn recv(&self, slot: &Receiver<()>) -> Result<(), RendezvousError> {
        if self.shutdown.is_released() {
            return Err(RendezvousError::Closed);
        }
        select! {
            recv(slot) -> res => res.map_err(|_| RendezvousError::Closed),
            recv(self.shutdown.observer()) -> _ => Err(RendezvousError::Closed),
        }
    }
}
