//! Platform input events.
//!
//! This module defines [`PlatformEvent`], the tagged union of notifications a
//! platform event loop delivers to the [`crate::Translator`]:
//! lifecycle transitions, size changes, paint opportunities, touches and keys.
//!
//! Events are plain data. Key codes arrive already translated to
//! [`tandem_core::Key`]; coordinates arrive in physical pixels.

use tandem_core::{Key, TouchId};

/// Events processed by the lifecycle translator.
///
/// `C` is the platform graphics context type.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent<C> {
    /// Application lifecycle stage changed.
    Lifecycle(LifecycleEvent<C>),

    /// Surface size changed.
    Size {
        /// Width in physical pixels.
        width_px: u32,
        /// Height in physical pixels.
        height_px: u32,
    },

    /// Paint opportunity.
    Paint {
        /// Sent by the platform itself rather than requested by this layer.
        external: bool,
    },

    /// Touch input.
    Touch(TouchEvent),

    /// Keyboard input.
    Key(KeyEvent),
}

/// Application lifecycle stage, ordered from least to most active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Not running.
    Dead,
    /// Running, not visible.
    Alive,
    /// Visible on screen.
    Visible,
    /// Visible and receiving input focus.
    Focused,
}

/// Direction in which a lifecycle transition crosses a stage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Transition does not cross the boundary.
    None,
    /// Transition moves from below the stage to at or above it.
    On,
    /// Transition moves from at or above the stage to below it.
    Off,
}

/// Lifecycle transition from one stage to another.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleEvent<C> {
    /// Stage before the transition.
    pub from: Stage,
    /// Stage after the transition.
    pub to: Stage,
    /// Graphics context available for drawing, if any.
    pub draw_context: Option<C>,
}

impl<C> LifecycleEvent<C> {
    /// Whether this transition crosses `stage`, and in which direction.
    pub fn crosses(&self, stage: Stage) -> Crossing {
        match (self.from >= stage, self.to >= stage) {
            (false, true) => Crossing::On,
            (true, false) => Crossing::Off,
            _ => Crossing::None,
        }
    }
}

/// Phase of a touch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// Finger down.
    Begin,
    /// Finger moved.
    Move,
    /// Finger up or sequence cancelled.
    End,
}

/// Touch input in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Stable identifier of the touch sequence.
    pub sequence: TouchId,
    /// Phase of the sequence.
    pub phase: TouchPhase,
    /// Physical X coordinate.
    pub x: f32,
    /// Physical Y coordinate.
    pub y: f32,
}

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    /// Key pressed, or repeated while held.
    Press,
    /// Key released.
    Release,
    /// Direction unknown, treated as a press.
    None,
}

/// Keyboard input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    /// Translated key, `None` if the platform code has no mapping.
    pub key: Option<Key>,
    /// Character produced by the key, if any.
    pub rune: Option<char>,
    /// Press or release.
    pub direction: KeyDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: Stage, to: Stage) -> LifecycleEvent<()> {
        LifecycleEvent { from, to, draw_context: None }
    }

    #[test]
    fn crossing_visible() {
        assert_eq!(transition(Stage::Alive, Stage::Visible).crosses(Stage::Visible), Crossing::On);
        assert_eq!(transition(Stage::Dead, Stage::Focused).crosses(Stage::Visible), Crossing::On);
        assert_eq!(transition(Stage::Focused, Stage::Alive).crosses(Stage::Visible), Crossing::Off);
        assert_eq!(
            transition(Stage::Visible, Stage::Focused).crosses(Stage::Visible),
            Crossing::None
        );
        assert_eq!(transition(Stage::Dead, Stage::Alive).crosses(Stage::Visible), Crossing::None);
    }
}
