//! Input aggregation across the platform and update threads.
//!
//! The platform thread pushes the current `{keys, runes, touches}` triple
//! whenever an input event changes it. The update thread drains a full copy
//! once per frame.
//!
//! # Delivery semantics
//!
//! - Keys and touches describe *membership*: each push replaces them, and a
//!   drain leaves them in place.
//! - Runes are *events*: each push appends, and each drain clears them, so a
//!   typed character is delivered at most once.

use std::collections::BTreeSet;

use parking_lot::Mutex;

/// Platform-translated key code.
///
/// Translation from raw platform codes happens before events reach this
/// crate; the core only needs a stable, hashable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub u16);

/// Stable identifier of a touch sequence, assigned by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

/// Active touch point in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Touch sequence identifier.
    pub id: TouchId,
    /// Logical X coordinate.
    pub x: f64,
    /// Logical Y coordinate.
    pub y: f64,
}

/// Snapshot of input delivered to a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// Currently held keys.
    pub keys: BTreeSet<Key>,
    /// Characters typed since the previous drain.
    pub runes: Vec<char>,
    /// Active touch points, ordered by identifier.
    pub touches: Vec<Touch>,
}

impl InputState {
    /// Whether `key` is currently held.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Active touch with the given identifier, if any.
    pub fn touch(&self, id: TouchId) -> Option<&Touch> {
        self.touches.iter().find(|t| t.id == id)
    }

    /// Copy the full state out and clear the rune buffer.
    fn copy_and_reset(&mut self) -> InputState {
        let snapshot = self.clone();
        self.runes.clear();
        snapshot
    }
}

/// Read side of the aggregated input, handed to the frame callback.
pub trait InputSource: Send + Sync {
    /// Take a snapshot of the current input, consuming pending runes.
    fn read_input(&self) -> InputState;
}

/// Lock-guarded pending input shared by both threads.
#[derive(Debug, Default)]
pub struct InputAggregator {
    state: Mutex<InputState>,
}

impl InputAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the current input triple as one atomic update.
    ///
    /// `keys` and `touches` replace the previous membership, `runes` are
    /// appended to any not yet drained.
    pub fn update(
        &self,
        keys: impl IntoIterator<Item = Key>,
        runes: &[char],
        touches: impl IntoIterator<Item = Touch>,
    ) {
        let keys: BTreeSet<Key> = keys.into_iter().collect();
        let mut touches: Vec<Touch> = touches.into_iter().collect();
        touches.sort_by_key(|t| t.id);

        let mut state = self.state.lock();
        state.keys = keys;
        state.runes.extend_from_slice(runes);
        state.touches = touches;
    }

    /// Drain a snapshot: full copy out, runes cleared.
    pub fn drain(&self) -> InputState {
        self.state.lock().copy_and_reset()
    }

    /// Copy the pending state without consuming runes.
    pub fn peek(&self) -> InputState {
        self.state.lock().clone()
    }
}

impl InputSource for InputAggregator {
    fn read_input(&self) -> InputState {
        self.drain()
    }
}
