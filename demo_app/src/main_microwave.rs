//! Microwave demo: punch in a time, cook, open the door, break and repair

use demo_app::error::DemoError;
use demo_app::microwave_scene::{KeypadKey, MicrowaveApp, ScreenTargets};
use demo_app::script::Script;
use scene_engine::foundation::logging;
use scene_engine::prelude::*;

fn session(targets: &ScreenTargets) -> Result<Script, DemoError> {
    let mut script = Script::new().idle(5);
    for key in [KeypadKey::Digit(3), KeypadKey::Digit(0), KeypadKey::Start] {
        let at = targets.key(key)?;
        script = script.move_to(at.x, at.y).click(at.x, at.y).idle(2);
    }

    // Let it cook for a few seconds, then open the door mid-way.
    script = script.idle(240).click(targets.window.x, targets.window.y).idle(40);
    script = script.tap(KeyCode::Space).idle(40).tap(KeyCode::Enter).idle(120);

    // Keyboard-only round: stop, clear, break and repair.
    Ok(script
        .tap(KeyCode::Backspace)
        .tap(KeyCode::Num1)
        .tap(KeyCode::Num5)
        .tap(KeyCode::Delete)
        .tap(KeyCode::X)
        .idle(30)
        .tap(KeyCode::R)
        .idle(10))
}

fn main() -> Result<(), DemoError> {
    let config = EngineConfig::default();
    logging::init(&config.logging);

    log::info!("Starting Microwave Demo");

    let targets = ScreenTargets::compute(&config)?;
    let script = session(&targets)?;

    let mut engine = Engine::new(config)?;
    let mut app = MicrowaveApp::new();
    match engine.run(&mut app, script) {
        Ok(frames) => {
            log::info!(
                "Microwave demo completed after {} frames: {} / door {}",
                frames,
                app.microwave().state(),
                app.microwave().door()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Microwave demo failed: {:?}", e);
            Err(e.into())
        }
    }
}
