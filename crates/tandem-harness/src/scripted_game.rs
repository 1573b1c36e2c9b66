//! Scripted frame callback.
//!
//! [`ScriptedGame`] records what every frame saw and can be told to fail or
//! panic at a given frame. Records go to a shared [`GameProbe`] because the
//! game itself moves onto the update thread.

use std::{
    sync::Arc,
    thread::{self, ThreadId},
};

use parking_lot::Mutex;
use tandem_app::{FrameContext, FrameError, Game};
use tandem_core::InputState;

use crate::SimGpu;

/// What a single frame observed.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Logical outside size passed to the frame.
    pub outside_size: (f64, f64),
    /// Device scale factor passed to the frame.
    pub device_scale_factor: f64,
    /// Input drained by the frame.
    pub input: InputState,
    /// Thread the frame callback ran on.
    pub update_thread: ThreadId,
    /// Thread the frame's graphics job ran on, when one was submitted.
    pub graphics_thread: Option<ThreadId>,
}

/// Shared view of the frames produced.
#[derive(Debug, Clone, Default)]
pub struct GameProbe(Arc<Mutex<Vec<FrameRecord>>>);

impl GameProbe {
    /// Every frame produced so far.
    pub fn frames(&self) -> Vec<FrameRecord> {
        self.0.lock().clone()
    }

    /// Number of frames produced.
    pub fn count(&self) -> usize {
        self.0.lock().len()
    }

    /// Most recent frame.
    pub fn last(&self) -> Option<FrameRecord> {
        self.0.lock().last().cloned()
    }
}

/// Frame callback driven by a script.
#[derive(Debug, Default)]
pub struct ScriptedGame {
    probe: GameProbe,
    frame: u64,
    fail_at: Option<u64>,
    panic_at: Option<u64>,
    graphics_job: bool,
}

impl ScriptedGame {
    /// Game that produces frames forever.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an error from frame `frame` (1-based).
    #[must_use]
    pub fn failing_at(mut self, frame: u64) -> Self {
        self.fail_at = Some(frame);
        self
    }

    /// Panic in frame `frame` (1-based).
    #[must_use]
    pub fn panicking_at(mut self, frame: u64) -> Self {
        self.panic_at = Some(frame);
        self
    }

    /// Submit one graphics job per frame through the driver.
    #[must_use]
    pub fn with_graphics_job(mut self) -> Self {
        self.graphics_job = true;
        self
    }

    /// Handle for inspecting frames after the game has moved.
    pub fn probe(&self) -> GameProbe {
        self.probe.clone()
    }
}

impl Game<SimGpu> for ScriptedGame {
    #[allow(clippy::panic, reason = "Panic injection for fault boundary tests")]
    fn update_frame(&mut self, frame: FrameContext<'_, SimGpu>) -> Result<(), FrameError> {
        self.frame += 1;

        if self.panic_at == Some(self.frame) {
            panic!("scripted panic at frame {}", self.frame);
        }
        if self.fail_at == Some(self.frame) {
            return Err(FrameError::msg(format!("scripted failure at frame {}", self.frame)));
        }

        let input = frame.input.read_input();
        let graphics_thread = if self.graphics_job {
            Some(frame.driver.run_graphics(|| thread::current().id())?)
        } else {
            None
        };
        frame.driver.draw();

        self.probe.0.lock().push(FrameRecord {
            frame: self.frame,
            outside_size: frame.outside_size,
            device_scale_factor: frame.device_scale_factor,
            input,
            update_thread: thread::current().id(),
            graphics_thread,
        });
        Ok(())
    }
}
