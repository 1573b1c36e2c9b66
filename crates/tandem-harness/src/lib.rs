//! Deterministic simulation harness for Tandem.
//!
//! Test doubles for every external collaborator of the frame orchestrator:
//! the platform event loop, audio hooks, the device scale query, the host
//! render requester, the graphics driver and the game. Each double records
//! what it observed so tests can assert on the exact sequence of calls.
//!
//! The same [`tandem_app::Translator`] and [`tandem_app::Runtime`] code runs
//! against these doubles as against a real platform.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod hooks;
pub mod scripted_game;
pub mod sim_driver;
pub mod sim_platform;

pub use hooks::{HookCall, RecordingHooks, RecordingRequester, SequenceScale};
pub use scripted_game::{FrameRecord, GameProbe, ScriptedGame};
pub use sim_driver::{DriverProbe, InitRecord, SimDriverFactory, SimGpu};
pub use sim_platform::{SimContext, SimPlatform};
