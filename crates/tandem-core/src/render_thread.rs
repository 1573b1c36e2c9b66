//! Job queue executed on the host's render thread.
//!
//! Some graphics APIs must be driven from one specific OS thread. When the
//! host owns that thread and calls into the core once per frame, the update
//! thread cannot touch the API directly. Instead it submits closures with
//! [`RenderThread::call`], and the host thread executes them inside
//! [`RenderThread::run_until`] until the frame is finished.
//! [`RenderThread::run_until_done`] does the same without a watcher thread by
//! waiting on the rendezvous directly.

use crossbeam_channel::{Receiver, Sender, bounded, select, unbounded};

use crate::{Latch, RenderThreadError, Rendezvous, RendezvousError};

type Job = Box<dyn FnOnce() + Send>;

/// Queue of closures bound for the render thread.
#[derive(Debug)]
pub struct RenderThread {
    tx: Sender<Job>,
    rx: Receiver<Job>,
}

impl Default for RenderThread {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderThread {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Run `f` on the render thread and wait for its result.
    ///
    /// Blocks until a thread inside [`Self::run_until`] has executed the job.
    pub fn call<R, F>(&self, f: F) -> Result<R, RenderThreadError>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        let (result_tx, result_rx) = bounded(1);
        let job: Job = Box::new(move || {
            let _ = result_tx.send(f());
        });
        self.tx.send(job).map_err(|_| RenderThreadError::Stopped)?;
        result_rx.recv().map_err(|_| RenderThreadError::Stopped)
    }

    /// Execute submitted jobs on the calling thread until `cancel` is
    /// released. Returns the number of jobs executed.
    ///
    /// Jobs already queued when the latch is released still run before this
    /// returns.
    pub fn run_until(&self, cancel: &Latch) -> usize {
        let mut executed = 0;
        loop {
            select! {
                recv(self.rx) -> job => match job {
                    Ok(job) => {
                        job();
                        executed += 1;
                    },
                    Err(_) => break,
                },
                recv(cancel.observer()) -> _ => break,
            }
        }

        executed + self.drain()
    }

    /// Execute submitted jobs on the calling thread until the frame in flight
    /// on `rendezvous` is done. Returns the number of jobs executed.
    ///
    /// Consumes the done signal, so it replaces [`Rendezvous::wait_done`] for
    /// that frame. Queued jobs still run when the rendezvous closes.
    pub fn run_until_done(&self, rendezvous: &Rendezvous) -> Result<usize, RendezvousError> {
        let mut executed = 0;
        let outcome = loop {
            if rendezvous.is_closed() {
                break Err(RendezvousError::Closed);
            }
            select! {
                recv(self.rx) -> job => {
                    if let Ok(job) = job {
                        job();
                        executed += 1;
                    }
                },
                recv(rendezvous.done_slot()) -> res => {
                    break res.map_err(|_| RendezvousError::Closed);
                },
                recv(rendezvous.closed_signal()) -> _ => break Err(RendezvousError::Closed),
            }
        };

        if outcome.is_ok() {
            rendezvous.finish_frame();
        }
        executed += self.drain();
        outcome.map(|()| executed)
    }

    fn drain(&self) -> usize {
        let mut executed = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            executed += 1;
        }
        executed
    }
}
