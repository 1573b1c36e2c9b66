//! Window-style queries on a mobile surface.
//!
//! Desktop hosts expose cursor, fullscreen, monitor and window controls. A
//! mobile surface has none of them, so every query here answers a fixed value
//! and every setter is accepted and ignored.

use crate::UserInterface;

static MONITOR: Monitor = Monitor { _private: () };

/// Mouse cursor visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Cursor shown.
    Visible,
    /// Cursor hidden.
    Hidden,
    /// Cursor hidden and locked to the surface.
    Captured,
}

/// Mouse cursor shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// Platform default arrow.
    #[default]
    Default,
    /// Text insertion bar.
    Text,
    /// Crosshair.
    Crosshair,
    /// Pointing hand.
    Pointer,
    /// Horizontal resize.
    EwResize,
    /// Vertical resize.
    NsResize,
    /// Diagonal resize, north-east to south-west.
    NeswResize,
    /// Diagonal resize, north-west to south-east.
    NwseResize,
    /// Move.
    Move,
    /// Action not allowed.
    NotAllowed,
}

/// The single display a mobile surface lives on.
#[derive(Debug)]
pub struct Monitor {
    _private: (),
}

impl Monitor {
    /// Minimum and maximum corners of the monitor, in device-independent
    /// pixels. Always empty.
    pub fn bounds(&self) -> ((i32, i32), (i32, i32)) {
        ((0, 0), (0, 0))
    }

    /// Human readable name. Always empty.
    pub fn name(&self) -> &str {
        ""
    }
}

/// Window handle with nothing behind it.
///
/// Queries answer the values of a maximized, undecorated surface at the
/// origin; every setter is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NullWindow;

impl NullWindow {
    /// Always `false`.
    pub fn is_decorated(&self) -> bool {
        false
    }

    /// Ignored.
    pub fn set_decorated(&self, _decorated: bool) {}

    /// Always `(0, 0)`.
    pub fn position(&self) -> (i32, i32) {
        (0, 0)
    }

    /// Ignored.
    pub fn set_position(&self, _x: i32, _y: i32) {}

    /// Always `(0, 0)`. The surface size comes from the platform.
    pub fn size(&self) -> (u32, u32) {
        (0, 0)
    }

    /// Ignored.
    pub fn set_size(&self, _width: u32, _height: u32) {}

    /// Ignored.
    pub fn set_title(&self, _title: &str) {}

    /// Always `false`.
    pub fn is_maximized(&self) -> bool {
        false
    }

    /// Always `false`.
    pub fn is_minimized(&self) -> bool {
        false
    }

    /// Ignored.
    pub fn maximize(&self) {}

    /// Ignored.
    pub fn minimize(&self) {}

    /// Ignored.
    pub fn restore(&self) {}
}

impl<C> UserInterface<C> {
    /// Always [`CursorMode::Hidden`]: there is no cursor.
    pub fn cursor_mode(&self) -> CursorMode {
        CursorMode::Hidden
    }

    /// Ignored.
    pub fn set_cursor_mode(&self, _mode: CursorMode) {}

    /// Always [`CursorShape::Default`].
    pub fn cursor_shape(&self) -> CursorShape {
        CursorShape::Default
    }

    /// Ignored.
    pub fn set_cursor_shape(&self, _shape: CursorShape) {}

    /// Always `false`.
    pub fn is_fullscreen(&self) -> bool {
        false
    }

    /// Ignored. The surface always covers the screen.
    pub fn set_fullscreen(&self, _fullscreen: bool) {}

    /// Always `false`: frames are only produced in the foreground.
    pub fn is_runnable_on_unfocused(&self) -> bool {
        false
    }

    /// Ignored.
    pub fn set_runnable_on_unfocused(&self, _runnable: bool) {}

    /// Always `(0, 0)`.
    pub fn screen_size_in_fullscreen(&self) -> (u32, u32) {
        (0, 0)
    }

    /// The surface's window, which has no controls.
    pub fn window(&self) -> NullWindow {
        NullWindow
    }

    /// The only monitor.
    pub fn monitor(&self) -> &'static Monitor {
        &MONITOR
    }

    /// Append every known monitor to `monitors`.
    pub fn append_monitors(&self, monitors: &mut Vec<&'static Monitor>) {
        monitors.push(&MONITOR);
    }
}

/// Whether a transparent screen can be requested. Never on mobile.
pub fn is_screen_transparent_available() -> bool {
    false
}
