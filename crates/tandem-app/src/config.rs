//! User interface configuration.

use tandem_core::{DEFAULT_OUTSIDE_SIZE, FpsMode};

use crate::GraphicsLibrary;

/// Construction-time settings for a [`crate::UserInterface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiConfig {
    /// Logical outside size used until the host reports one. Lets the game
    /// start before any size is known.
    pub outside_size: (f64, f64),
    /// Initial frame pacing mode.
    pub fps_mode: FpsMode,
    /// Preferred graphics library passed to the driver factory.
    pub graphics_library: GraphicsLibrary,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            outside_size: DEFAULT_OUTSIDE_SIZE,
            fps_mode: FpsMode::VsyncOn,
            graphics_library: GraphicsLibrary::Auto,
        }
    }
}
