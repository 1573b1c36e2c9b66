//! One-shot graphics context handoff.
//!
//! When the platform framework owns the render thread, it must hand its
//! graphics context to the update thread before any driver call is legal. The
//! [`ContextHandoff`] slot carries that context across threads exactly once.
//!
//! After the first delivery the sending half is torn down, so a second
//! [`ContextHandoff::deliver`] fails with [`HandoffError::AlreadyDelivered`]
//! instead of silently replacing the context.

use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::Mutex;

use crate::HandoffError;

/// Single-use delivery slot for a graphics context of type `C`.
#[derive(Debug)]
pub struct ContextHandoff<C> {
    tx: Mutex<Option<Sender<C>>>,
    rx: Receiver<C>,
}

impl<C> Default for ContextHandoff<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ContextHandoff<C> {
    /// Create an empty slot.
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx: Mutex::new(Some(tx)), rx }
    }

    /// Deliver the context. Callable exactly once.
    pub fn deliver(&self, context: C) -> Result<(), HandoffError> {
        let tx = self.tx.lock().take().ok_or(HandoffError::AlreadyDelivered)?;
        // Capacity one and a single sender: this never blocks.
        tx.send(context).map_err(|_| HandoffError::Closed)?;
        tracing::debug!("graphics context delivered");
        Ok(())
    }

    /// Whether the slot no longer accepts a delivery, because a context was
    /// delivered or the slot was closed.
    pub fn is_delivered(&self) -> bool {
        self.tx.lock().is_none()
    }

    /// Tear the slot down without delivering.
    ///
    /// A receiver still waiting is released with [`HandoffError::Closed`];
    /// later deliveries fail with [`HandoffError::AlreadyDelivered`].
    pub fn close(&self) {
        self.tx.lock().take();
    }

    /// Block until the context is delivered and take it.
    ///
    /// Only one receiver is expected. Once the context has been taken, later
    /// calls return [`HandoffError::Closed`].
    pub fn receive(&self) -> Result<C, HandoffError> {
        self.rx.recv().map_err(|_| HandoffError::Closed)
    }
}
