//! Simulation platform implementing the Platform trait.
//!
//! `SimPlatform` replays a scripted event queue and records every action the
//! translator asks of it. With a paint budget it behaves like a real
//! platform: each paint request schedules a non-external paint event at the
//! back of the queue, so a single visible transition keeps frames flowing
//! until the budget runs out.

use std::collections::VecDeque;

use tandem_app::{
    KeyDirection, KeyEvent, LifecycleEvent, Platform, PlatformEvent, Stage, TouchEvent, TouchPhase,
};
use tandem_core::{Key, TouchId};

/// Graphics context handed out by the simulated platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimContext(pub u32);

/// Scripted platform event loop.
#[derive(Debug)]
pub struct SimPlatform<C = SimContext> {
    events: VecDeque<PlatformEvent<C>>,
    /// Paint events still to be scheduled in response to requests.
    paint_budget: usize,
    paint_requests: usize,
    published: usize,
    delivered: usize,
}

impl<C> Default for SimPlatform<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SimPlatform<C> {
    /// Create a platform with no scripted events.
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            paint_budget: 0,
            paint_requests: 0,
            published: 0,
            delivered: 0,
        }
    }

    /// Create a platform replaying `events` in order.
    pub fn scripted(events: impl IntoIterator<Item = PlatformEvent<C>>) -> Self {
        let mut platform = Self::new();
        platform.events.extend(events);
        platform
    }

    /// Answer up to `budget` paint requests with a paint event.
    #[must_use]
    pub fn with_paint_budget(mut self, budget: usize) -> Self {
        self.paint_budget = budget;
        self
    }

    /// Queue an event after the ones already scripted.
    pub fn push(&mut self, event: PlatformEvent<C>) {
        self.events.push_back(event);
    }

    /// Queue a lifecycle transition.
    pub fn push_lifecycle(&mut self, from: Stage, to: Stage, draw_context: Option<C>) {
        self.push(PlatformEvent::Lifecycle(LifecycleEvent { from, to, draw_context }));
    }

    /// Queue a size change in physical pixels.
    pub fn push_size(&mut self, width_px: u32, height_px: u32) {
        self.push(PlatformEvent::Size { width_px, height_px });
    }

    /// Queue a paint event.
    pub fn push_paint(&mut self, external: bool) {
        self.push(PlatformEvent::Paint { external });
    }

    /// Queue a touch event in physical pixels.
    pub fn push_touch(&mut self, sequence: u64, phase: TouchPhase, x: f32, y: f32) {
        self.push(PlatformEvent::Touch(TouchEvent { sequence: TouchId(sequence), phase, x, y }));
    }

    /// Queue a key event.
    pub fn push_key(&mut self, key: Option<u16>, rune: Option<char>, direction: KeyDirection) {
        self.push(PlatformEvent::Key(KeyEvent { key: key.map(Key), rune, direction }));
    }

    /// Number of `request_paint` calls observed.
    pub fn paint_requests(&self) -> usize {
        self.paint_requests
    }

    /// Number of frames published.
    pub fn published(&self) -> usize {
        self.published
    }

    /// Number of events handed to the translator.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Events not yet delivered.
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl<C> Platform<C> for SimPlatform<C> {
    fn next_event(&mut self) -> Option<PlatformEvent<C>> {
        let event = self.events.pop_front()?;
        self.delivered += 1;
        Some(event)
    }

    fn request_paint(&mut self) {
        self.paint_requests += 1;
        if self.paint_budget > 0 {
            self.paint_budget -= 1;
            self.events.push_back(PlatformEvent::Paint { external: false });
        }
    }

    fn publish(&mut self) {
        self.published += 1;
        tracing::trace!(frame = self.published, "frame published");
    }
}
