//! Property-based tests for the lifecycle translator.
//!
//! Arbitrary sequences of lifecycle, size, key and touch events are fed to
//! the translator and checked against a small model of what the aggregated
//! input and the foreground state must be afterwards. Paints are left out:
//! they need an update thread and are covered by the session tests.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use proptest::prelude::*;
use tandem_app::{
    KeyDirection, KeyEvent, LifecycleEvent, PlatformEvent, Stage, TouchEvent, TouchPhase,
    Translator, UiConfig, UserInterface,
};
use tandem_core::{FixedScale, Hooks, Key, TouchId};
use tandem_harness::{HookCall, RecordingHooks, SimContext};

const SCALE: f64 = 2.0;

fn stage_strategy() -> impl Strategy<Value = Stage> {
    prop_oneof![Just(Stage::Dead), Just(Stage::Alive), Just(Stage::Visible), Just(Stage::Focused)]
}

fn direction_strategy() -> impl Strategy<Value = KeyDirection> {
    prop_oneof![
        3 => Just(KeyDirection::Press),
        2 => Just(KeyDirection::Release),
        1 => Just(KeyDirection::None),
    ]
}

fn phase_strategy() -> impl Strategy<Value = TouchPhase> {
    prop_oneof![Just(TouchPhase::Begin), Just(TouchPhase::Move), Just(TouchPhase::End)]
}

/// Random translator events, excluding paints.
fn event_strategy() -> impl Strategy<Value = PlatformEvent<SimContext>> {
    prop_oneof![
        2 => (stage_strategy(), stage_strategy(), any::<bool>()).prop_map(|(from, to, ctx)| {
            PlatformEvent::Lifecycle(LifecycleEvent {
                from,
                to,
                draw_context: ctx.then_some(SimContext(1)),
            })
        }),
        1 => (1u32..2000, 1u32..2000)
            .prop_map(|(width_px, height_px)| PlatformEvent::Size { width_px, height_px }),
        4 => (prop::option::of(0u16..8), prop::option::of(any::<char>()), direction_strategy())
            .prop_map(|(key, rune, direction)| {
                PlatformEvent::Key(KeyEvent { key: key.map(Key), rune, direction })
            }),
        4 => (0u64..4, phase_strategy(), 0.0f32..2000.0, 0.0f32..2000.0).prop_map(
            |(id, phase, x, y)| {
                PlatformEvent::Touch(TouchEvent { sequence: TouchId(id), phase, x, y })
            }
        ),
    ]
}

/// Expected observable input after a sequence of events.
#[derive(Default)]
struct Model {
    size_known: bool,
    keys: BTreeSet<Key>,
    runes: Vec<char>,
    touches: BTreeMap<TouchId, (f64, f64)>,
}

impl Model {
    fn apply(&mut self, event: &PlatformEvent<SimContext>) {
        match event {
            PlatformEvent::Size { .. } => self.size_known = true,
            PlatformEvent::Key(key) => {
                let pressed = key.direction != KeyDirection::Release;
                if let Some(code) = key.key {
                    if pressed {
                        self.keys.insert(code);
                    } else {
                        self.keys.remove(&code);
                    }
                }
                if let Some(rune) = key.rune
                    && pressed
                    && !rune.is_control()
                {
                    self.runes.push(rune);
                }
            },
            PlatformEvent::Touch(touch) if self.size_known => match touch.phase {
                TouchPhase::End => {
                    self.touches.remove(&touch.sequence);
                },
                _ => {
                    let position = (f64::from(touch.x) / SCALE, f64::from(touch.y) / SCALE);
                    self.touches.insert(touch.sequence, position);
                },
            },
            _ => {},
        }
    }
}

fn setup() -> (Arc<UserInterface<SimContext>>, Arc<RecordingHooks>, Translator<SimContext>) {
    let hooks = Arc::new(RecordingHooks::new());
    let ui =
        UserInterface::new(UiConfig::default(), Arc::new(FixedScale(SCALE)), Arc::clone(&hooks) as Arc<dyn Hooks>);
    let translator = Translator::new(Arc::clone(&ui));
    (ui, hooks, translator)
}

proptest! {
    /// Aggregated input always matches the model: keys and touches by
    /// membership, runes exactly once.
    #[test]
    fn prop_input_matches_model(events in prop::collection::vec(event_strategy(), 0..60)) {
        let (ui, _hooks, mut translator) = setup();
        let mut model = Model::default();

        for event in events {
            model.apply(&event);
            translator.handle(event).unwrap();
        }

        let input = ui.input().drain();
        prop_assert_eq!(&input.keys, &model.keys);
        prop_assert_eq!(&input.runes, &model.runes);

        let touches: Vec<(TouchId, (f64, f64))> =
            input.touches.iter().map(|t| (t.id, (t.x, t.y))).collect();
        let expected: Vec<(TouchId, (f64, f64))> = model.touches.into_iter().collect();
        prop_assert_eq!(touches, expected);

        prop_assert!(ui.input().drain().runes.is_empty());
    }

    /// Audio calls strictly alternate and start with a suspend, since the
    /// surface starts in the foreground.
    #[test]
    fn prop_audio_calls_alternate(events in prop::collection::vec(event_strategy(), 0..60)) {
        let (ui, hooks, mut translator) = setup();

        for event in events {
            translator.handle(event).unwrap();
        }

        let calls = hooks.audio_calls();
        for (i, call) in calls.iter().enumerate() {
            let expected = if i % 2 == 0 { HookCall::Suspend } else { HookCall::Resume };
            prop_assert_eq!(*call, expected);
        }
        prop_assert_eq!(ui.is_focused(), calls.len() % 2 == 0);
    }

    /// At most one context ever reaches the update thread.
    #[test]
    fn prop_context_delivered_at_most_once(
        events in prop::collection::vec(event_strategy(), 0..60)
    ) {
        let (ui, _hooks, mut translator) = setup();
        let mut offered = false;

        for event in events {
            if let PlatformEvent::Lifecycle(lifecycle) = &event
                && lifecycle.draw_context.is_some()
                && lifecycle.from < Stage::Visible
                && lifecycle.to >= Stage::Visible
            {
                offered = true;
            }
            translator.handle(event).unwrap();
        }

        prop_assert_eq!(ui.handoff().is_delivered(), offered);
        if offered {
            prop_assert_eq!(ui.handoff().receive(), Ok(SimContext(1)));
        }
    }
}
