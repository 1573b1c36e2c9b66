//! Lifecycle event translator.
//!
//! This module defines the [`Translator`], which turns the platform's event
//! stream into state updates, input snapshots and frame rendezvous.
//!
//! It is an externally driven state machine: the platform thread calls
//! [`Translator::handle`] with each [`PlatformEvent`] and executes the
//! returned [`PlatformAction`]s. The only blocking it does is the frame
//! rendezvous on a paint event.
//!
//! # Responsibilities
//!
//! - Tracks the held graphics context and delivers it to the update thread
//!   on the first visible transition.
//! - Tracks whether a size has been reported; paints and touches wait for it.
//! - Keeps held keys and active touches and pushes the full input triple to
//!   the aggregator whenever input changes.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use tandem_core::{Key, Touch, TouchId};

use crate::{
    Crossing, KeyDirection, KeyEvent, LifecycleEvent, Platform, PlatformAction, PlatformEvent,
    RunError, Stage, TouchEvent, TouchPhase, UserInterface,
};

/// Platform-thread state machine.
#[derive(Debug)]
pub struct Translator<C> {
    ui: Arc<UserInterface<C>>,
    /// Context held while visible. `None` while invisible.
    context: Option<C>,
    /// A size event has been observed.
    size_known: bool,
    touches: BTreeMap<TouchId, Touch>,
    keys: BTreeSet<Key>,
}

impl<C: Clone> Translator<C> {
    /// Create a translator for the given interface.
    pub fn new(ui: Arc<UserInterface<C>>) -> Self {
        Self {
            ui,
            context: None,
            size_known: false,
            touches: BTreeMap::new(),
            keys: BTreeSet::new(),
        }
    }

    /// Pull events from `platform` until its stream ends, executing every
    /// action produced.
    pub fn drive<P: Platform<C>>(&mut self, platform: &mut P) -> Result<(), RunError> {
        while let Some(event) = platform.next_event() {
            for action in self.handle(event)? {
                match action {
                    PlatformAction::RequestPaint => platform.request_paint(),
                    PlatformAction::Publish => platform.publish(),
                }
            }
        }
        Ok(())
    }

    /// Process an event and return actions.
    ///
    /// A paint event blocks for one full frame. Errors are fatal: a failed
    /// audio transition, or the update thread having stopped (in which case
    /// the failure it reported is returned).
    pub fn handle(&mut self, event: PlatformEvent<C>) -> Result<Vec<PlatformAction>, RunError> {
        match event {
            PlatformEvent::Lifecycle(event) => self.handle_lifecycle(event),
            PlatformEvent::Size { width_px, height_px } => {
                self.ui.set_pixel_size(width_px, height_px);
                self.size_known = true;
                Ok(vec![])
            },
            PlatformEvent::Paint { external } => self.handle_paint(external),
            PlatformEvent::Touch(event) => {
                if !self.size_known {
                    return Ok(vec![]);
                }
                self.handle_touch(event);
                self.push_input(&[]);
                Ok(vec![])
            },
            PlatformEvent::Key(event) => {
                let runes = self.handle_key(event);
                self.push_input(&runes);
                Ok(vec![])
            },
        }
    }

    /// Whether a graphics context is currently held.
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Whether a size event has been observed.
    pub fn is_size_known(&self) -> bool {
        self.size_known
    }

    fn handle_lifecycle(
        &mut self,
        event: LifecycleEvent<C>,
    ) -> Result<Vec<PlatformAction>, RunError> {
        match event.crosses(Stage::Visible) {
            Crossing::On => {
                self.ui.set_foreground(true)?;
                self.ui.state().hooks().on_context_lost();

                self.context = event.draw_context;
                // The platform keeps one context for the process lifetime, so
                // only the first one needs to reach the update thread.
                if let Some(context) = &self.context
                    && !self.ui.handoff().is_delivered()
                {
                    self.ui.handoff().deliver(context.clone())?;
                }

                tracing::debug!(has_context = self.context.is_some(), "surface visible");
                Ok(vec![PlatformAction::RequestPaint])
            },
            Crossing::Off => {
                self.ui.set_foreground(false)?;
                self.context = None;
                tracing::debug!("surface hidden");
                Ok(vec![])
            },
            Crossing::None => Ok(vec![]),
        }
    }

    fn handle_paint(&mut self, external: bool) -> Result<Vec<PlatformAction>, RunError> {
        if !self.size_known {
            return Ok(vec![PlatformAction::RequestPaint]);
        }
        if self.context.is_none() || external {
            return Ok(vec![]);
        }

        if let Err(err) = self.ui.rendezvous().cycle() {
            return Err(self.ui.take_reported_error().unwrap_or_else(|| err.into()));
        }
        Ok(vec![PlatformAction::Publish, PlatformAction::RequestPaint])
    }

    fn handle_touch(&mut self, event: TouchEvent) {
        match event.phase {
            TouchPhase::Begin | TouchPhase::Move => {
                let scale = self.ui.device_scale_factor();
                self.touches.insert(event.sequence, Touch {
                    id: event.sequence,
                    x: f64::from(event.x) / scale,
                    y: f64::from(event.y) / scale,
                });
            },
            TouchPhase::End => {
                self.touches.remove(&event.sequence);
            },
        }
    }

    /// Update held keys and return the characters typed by this event.
    fn handle_key(&mut self, event: KeyEvent) -> Vec<char> {
        let pressed = matches!(event.direction, KeyDirection::Press | KeyDirection::None);

        if let Some(key) = event.key {
            if pressed {
                self.keys.insert(key);
            } else {
                self.keys.remove(&key);
            }
        }

        match event.rune {
            Some(rune) if pressed && is_printable(rune) => vec![rune],
            _ => vec![],
        }
    }

    fn push_input(&self, runes: &[char]) {
        self.ui.input().update(self.keys.iter().copied(), runes, self.touches.values().copied());
    }
}

/// Graphic characters and spaces; control characters are dropped.
fn is_printable(rune: char) -> bool {
    !rune.is_control()
}
