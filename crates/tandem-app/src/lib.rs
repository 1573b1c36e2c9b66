//! Frame orchestration for Tandem
//!
//! Couples a platform-owned event thread to a single update thread that
//! produces one frame per paint opportunity. The platform side runs a pure
//! event translator; the update side runs the orchestrator that owns the
//! graphics driver and calls the game.
//!
//! # Components
//!
//! - [`UserInterface`]: shared hub, entry points for both run modes
//! - [`Translator`]: platform event state machine (events in, actions out)
//! - [`Platform`]: trait for the host event loop and presentation surface
//! - [`Runtime`]: update-thread loop behind a panic fault boundary
//! - [`Game`], [`DriverFactory`]: external frame callback and GPU driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod config;
mod error;
mod event;
mod game;
mod platform;
mod runtime;
mod surface;
mod translator;
mod ui;

pub use action::PlatformAction;
pub use config::UiConfig;
pub use error::{DriverError, FrameError, RunError};
pub use event::{
    Crossing, KeyDirection, KeyEvent, LifecycleEvent, PlatformEvent, Stage, TouchEvent,
    TouchPhase,
};
pub use game::{DriverFactory, DriverInit, FrameContext, Game, GraphicsLibrary};
pub use platform::Platform;
pub use runtime::{RunMode, Runtime};
pub use surface::{CursorMode, CursorShape, Monitor, NullWindow, is_screen_transparent_available};
pub use translator::Translator;
pub use ui::UserInterface;
