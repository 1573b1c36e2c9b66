//! End-to-end sessions with the platform owning the event loop.
//!
//! Each test scripts a platform event stream, runs it through
//! `UserInterface::run` and checks what the game, driver, hooks and platform
//! observed once the stream ends.

use std::sync::Arc;

use tandem_app::{
    DriverError, GraphicsLibrary, RunError, Stage, TouchPhase, UiConfig, UserInterface,
};
use tandem_core::{AudioError, FixedScale, Hooks, ScaleSource, TouchId};
use tandem_harness::{
    HookCall, RecordingHooks, ScriptedGame, SequenceScale, SimContext, SimDriverFactory,
    SimPlatform,
};

fn interface(scale: f64, hooks: &Arc<RecordingHooks>) -> Arc<UserInterface<SimContext>> {
    UserInterface::new(UiConfig::default(), Arc::new(FixedScale(scale)), Arc::clone(hooks) as Arc<dyn Hooks>)
}

/// Visible surface with a context and a known size.
fn visible_platform(width_px: u32, height_px: u32) -> SimPlatform {
    let mut platform = SimPlatform::new();
    platform.push_lifecycle(Stage::Alive, Stage::Visible, Some(SimContext(1)));
    platform.push_size(width_px, height_px);
    platform
}

#[test]
fn frame_sees_logical_size_and_touches() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(2.0, &hooks);
    let game = ScriptedGame::new();
    let probe = game.probe();

    let mut platform = visible_platform(800, 480);
    platform.push_touch(3, TouchPhase::Begin, 100.0, 100.0);
    platform.push_paint(false);

    ui.run(game, SimDriverFactory::new(), &mut platform).unwrap();

    let frame = probe.last().unwrap();
    assert_eq!(probe.count(), 1);
    assert_eq!(frame.outside_size, (400.0, 240.0));
    assert_eq!(frame.device_scale_factor, 2.0);

    let touch = frame.input.touch(TouchId(3)).unwrap();
    assert_eq!((touch.x, touch.y), (50.0, 50.0));

    // One from the visible transition, one re-armed by the paint
    assert_eq!(platform.paint_requests(), 2);
    assert_eq!(platform.published(), 1);
    assert_eq!(ui.rendezvous().completed_frames(), 1);
}

#[test]
fn paint_budget_drives_continuous_frames() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let game = ScriptedGame::new();
    let probe = game.probe();

    let mut platform = visible_platform(640, 480).with_paint_budget(10);
    ui.run(game, SimDriverFactory::new(), &mut platform).unwrap();

    assert_eq!(probe.count(), 10);
    assert_eq!(platform.published(), 10);

    let numbers: Vec<u64> = probe.frames().iter().map(|f| f.frame).collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
}

#[test]
fn visibility_round_trip_delivers_context_once() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let factory = SimDriverFactory::new();
    let driver_probe = factory.probe();
    let game = ScriptedGame::new();
    let probe = game.probe();

    let mut platform = SimPlatform::new();
    platform.push_lifecycle(Stage::Dead, Stage::Visible, Some(SimContext(7)));
    platform.push_size(320, 200);
    platform.push_paint(false);
    platform.push_lifecycle(Stage::Visible, Stage::Alive, None);
    platform.push_lifecycle(Stage::Alive, Stage::Focused, Some(SimContext(8)));
    platform.push_paint(false);

    ui.run(game, factory, &mut platform).unwrap();

    let inits = driver_probe.inits();
    assert_eq!(inits.len(), 1);
    assert_eq!(inits[0].context, Some(SimContext(7)));
    assert!(!inits[0].has_render_thread);

    assert_eq!(hooks.audio_calls(), vec![HookCall::Suspend, HookCall::Resume]);
    assert_eq!(hooks.calls().iter().filter(|c| **c == HookCall::ContextLost).count(), 2);
    assert_eq!(probe.count(), 2);
}

#[test]
fn paint_before_size_only_rearms() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let game = ScriptedGame::new();
    let probe = game.probe();

    let mut platform = SimPlatform::new();
    platform.push_lifecycle(Stage::Alive, Stage::Visible, Some(SimContext(1)));
    platform.push_paint(false);

    ui.run(game, SimDriverFactory::new(), &mut platform).unwrap();

    assert_eq!(probe.count(), 0);
    assert_eq!(platform.published(), 0);
    assert_eq!(platform.paint_requests(), 2);
    assert!(!ui.is_size_known());
}

#[test]
fn external_paint_and_missing_context_produce_nothing() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let game = ScriptedGame::new();
    let probe = game.probe();

    let mut platform = visible_platform(640, 480);
    platform.push_paint(true);
    platform.push_lifecycle(Stage::Visible, Stage::Alive, None);
    platform.push_paint(false);

    ui.run(game, SimDriverFactory::new(), &mut platform).unwrap();

    assert_eq!(probe.count(), 0);
    assert_eq!(platform.published(), 0);
}

#[test]
fn no_context_ever_shuts_down_cleanly() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let factory = SimDriverFactory::new();
    let driver_probe = factory.probe();

    let mut platform = SimPlatform::new();
    platform.push_size(640, 480);
    platform.push_paint(false);

    ui.run(ScriptedGame::new(), factory, &mut platform).unwrap();

    assert!(driver_probe.inits().is_empty());
    assert!(ui.is_shut_down());
    assert!(!ui.is_running());
}

#[test]
fn frame_failure_is_returned() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let game = ScriptedGame::new().failing_at(2);
    let probe = game.probe();

    let mut platform = visible_platform(640, 480).with_paint_budget(5);
    let result = ui.run(game, SimDriverFactory::new(), &mut platform);

    assert!(matches!(result, Err(RunError::Frame(_))), "got {result:?}");
    assert_eq!(probe.count(), 1);
    assert!(!ui.is_running());
}

#[test]
fn panic_in_frame_is_returned() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);

    let mut platform = visible_platform(640, 480).with_paint_budget(3);
    let game = ScriptedGame::new().panicking_at(1);
    let result = ui.run(game, SimDriverFactory::new(), &mut platform);

    match result {
        Err(RunError::Panicked { message }) => assert!(message.contains("scripted panic")),
        other => panic!("expected panic error, got {other:?}"),
    }
}

#[test]
fn driver_failure_is_returned() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let factory = SimDriverFactory::failing(DriverError::Init("no gpu".into()));

    let mut platform = visible_platform(640, 480);
    platform.push_paint(false);

    let result = ui.run(ScriptedGame::new(), factory, &mut platform);

    assert!(matches!(result, Err(RunError::DriverInit(DriverError::Init(_)))), "got {result:?}");
    assert_eq!(ui.graphics_library(), None);
}

#[test]
fn failure_in_last_frame_is_returned() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);

    let mut platform = visible_platform(640, 480);
    platform.push_paint(false);

    let result = ui.run(ScriptedGame::new().failing_at(1), SimDriverFactory::new(), &mut platform);

    assert!(matches!(result, Err(RunError::Frame(_))), "got {result:?}");
    assert_eq!(platform.published(), 1);
}

#[test]
fn panic_in_last_frame_is_returned() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);

    let mut platform = visible_platform(640, 480);
    platform.push_paint(false);

    let result =
        ui.run(ScriptedGame::new().panicking_at(1), SimDriverFactory::new(), &mut platform);

    assert!(matches!(result, Err(RunError::Panicked { .. })), "got {result:?}");
}

#[test]
fn driver_failure_without_paint_is_returned() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let factory = SimDriverFactory::failing(DriverError::Init("no gpu".into()));

    // The context is handed over, but no frame is ever asked for
    let mut platform = visible_platform(640, 480);

    let result = ui.run(ScriptedGame::new(), factory, &mut platform);

    assert!(matches!(result, Err(RunError::DriverInit(DriverError::Init(_)))), "got {result:?}");
    assert!(!ui.is_running());
}

#[test]
fn audio_failure_is_fatal() {
    let hooks = Arc::new(RecordingHooks::new());
    hooks.fail_suspend();
    let ui = interface(1.0, &hooks);

    let mut platform = visible_platform(640, 480);
    platform.push_lifecycle(Stage::Visible, Stage::Alive, None);
    platform.push_size(1280, 720);

    let result = ui.run(ScriptedGame::new(), SimDriverFactory::new(), &mut platform);

    assert!(matches!(result, Err(RunError::Audio(AudioError::Suspend(_)))), "got {result:?}");
    // Stream stops at the failing event
    assert_eq!(platform.pending(), 1);
}

#[test]
fn graphics_library_is_published() {
    let hooks = Arc::new(RecordingHooks::new());
    let ui = interface(1.0, &hooks);
    let factory = SimDriverFactory::new().choosing(GraphicsLibrary::Metal);

    let mut platform = visible_platform(640, 480);
    platform.push_paint(false);

    ui.run(ScriptedGame::new(), factory, &mut platform).unwrap();

    assert_eq!(ui.graphics_library(), Some(GraphicsLibrary::Metal));
    assert_eq!(ui.wait_graphics_library(), Some(GraphicsLibrary::Metal));
}

#[test]
fn scale_is_queried_once() {
    let hooks = Arc::new(RecordingHooks::new());
    let scale = Arc::new(SequenceScale::new([2.0, 3.0, 4.0]));
    let ui: Arc<UserInterface<SimContext>> =
        UserInterface::new(UiConfig::default(), Arc::clone(&scale) as Arc<dyn ScaleSource>, Arc::clone(&hooks) as Arc<dyn Hooks>);
    let game = ScriptedGame::new();
    let probe = game.probe();

    let mut platform = visible_platform(600, 300).with_paint_budget(4);
    platform.push_touch(1, TouchPhase::Begin, 60.0, 30.0);

    ui.run(game, SimDriverFactory::new(), &mut platform).unwrap();

    assert_eq!(scale.queries(), 1);
    for frame in probe.frames() {
        assert_eq!(frame.device_scale_factor, 2.0);
        assert_eq!(frame.outside_size, (300.0, 150.0));
    }
}
