//! One-way release signal.
//!
//! A [`Latch`] starts closed and can be released exactly once. Every waiter,
//! past and future, observes the release. It backs the "initial size known"
//! gate, the "graphics library initialized" gate, frame cancellation and
//! rendezvous shutdown.
//!
//! Release is modelled as disconnecting a zero-capacity channel: nothing is
//! ever sent, so a receive only returns once the sender is dropped.

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded};
use parking_lot::Mutex;

/// Signal that is released at most once and stays released.
#[derive(Debug)]
pub struct Latch {
    trigger: Mutex<Option<Sender<()>>>,
    observer: Receiver<()>,
}

impl Default for Latch {
    fn default() -> Self {
        Self::new()
    }
}

impl Latch {
    /// Create a closed latch.
    pub fn new() -> Self {
        let (trigger, observer) = bounded(0);
        Self { trigger: Mutex::new(Some(trigger)), observer }
    }

    /// Release the latch.
    ///
    /// Returns `true` if this call performed the release, `false` if the latch
    /// was already released.
    pub fn release(&self) -> bool {
        self.trigger.lock().take().is_some()
    }

    /// Whether the latch has been released.
    pub fn is_released(&self) -> bool {
        matches!(self.observer.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Receiver that becomes ready (disconnected) on release.
    ///
    /// Intended for `crossbeam_channel::select!` alongside other channels.
    pub fn observer(&self) -> &Receiver<()> {
        &self.observer
    }
}
