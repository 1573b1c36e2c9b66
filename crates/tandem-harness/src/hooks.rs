//! Recording doubles for audio hooks, scale queries and render requests.

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use tandem_core::{AudioError, Hooks, RenderRequester, ScaleSource};

/// A call observed by [`RecordingHooks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCall {
    /// `resume_audio`
    Resume,
    /// `suspend_audio`
    Suspend,
    /// `on_context_lost`
    ContextLost,
}

/// Hooks that record every call in order.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    calls: Mutex<Vec<HookCall>>,
    fail_resume: AtomicBool,
    fail_suspend: AtomicBool,
}

impl RecordingHooks {
    /// Hooks that succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make later `resume_audio` calls fail.
    pub fn fail_resume(&self) {
        self.fail_resume.store(true, Ordering::Release);
    }

    /// Make later `suspend_audio` calls fail.
    pub fn fail_suspend(&self) {
        self.fail_suspend.store(true, Ordering::Release);
    }

    /// All calls so far.
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().clone()
    }

    /// Audio calls only, in order.
    pub fn audio_calls(&self) -> Vec<HookCall> {
        self.calls.lock().iter().copied().filter(|c| *c != HookCall::ContextLost).collect()
    }
}

impl Hooks for RecordingHooks {
    fn resume_audio(&self) -> Result<(), AudioError> {
        self.calls.lock().push(HookCall::Resume);
        if self.fail_resume.load(Ordering::Acquire) {
            return Err(AudioError::Resume("audio device unavailable".into()));
        }
        Ok(())
    }

    fn suspend_audio(&self) -> Result<(), AudioError> {
        self.calls.lock().push(HookCall::Suspend);
        if self.fail_suspend.load(Ordering::Acquire) {
            return Err(AudioError::Suspend("audio device unavailable".into()));
        }
        Ok(())
    }

    fn on_context_lost(&self) {
        self.calls.lock().push(HookCall::ContextLost);
    }
}

/// Scale source returning a different value on every query.
///
/// Once the scripted values run out the last one repeats. Counts queries so
/// tests can check how often the platform was asked.
#[derive(Debug)]
pub struct SequenceScale {
    values: Mutex<VecDeque<f64>>,
    last: Mutex<f64>,
    queries: AtomicUsize,
}

impl SequenceScale {
    /// Answer with `values` in order. An empty sequence answers `1.0`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            last: Mutex::new(1.0),
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of times the scale was queried.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Acquire)
    }
}

impl ScaleSource for SequenceScale {
    fn device_scale_factor(&self) -> f64 {
        self.queries.fetch_add(1, Ordering::AcqRel);
        let mut last = self.last.lock();
        if let Some(next) = self.values.lock().pop_front() {
            *last = next;
        }
        *last
    }
}

/// Render requester recording the host-side calls.
#[derive(Debug, Default)]
pub struct RecordingRequester {
    explicit: Mutex<Vec<bool>>,
    renders: AtomicUsize,
}

impl RecordingRequester {
    /// Requester with no calls recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every explicit-mode switch, in order.
    pub fn explicit_modes(&self) -> Vec<bool> {
        self.explicit.lock().clone()
    }

    /// Number of redraw requests.
    pub fn render_requests(&self) -> usize {
        self.renders.load(Ordering::Acquire)
    }
}

impl RenderRequester for RecordingRequester {
    fn set_explicit_rendering_mode(&self, explicit: bool) {
        self.explicit.lock().push(explicit);
    }

    fn request_render_if_needed(&self) {
        self.renders.fetch_add(1, Ordering::AcqRel);
    }
}
