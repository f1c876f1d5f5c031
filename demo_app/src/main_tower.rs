//! Tower demo: stack, spin and pick cubes from a scripted session

use demo_app::script::Script;
use demo_app::tower::TowerApp;
use scene_engine::foundation::logging;
use scene_engine::prelude::*;

fn session() -> Script {
    let mut script = Script::new().idle(5);
    for _ in 0..6 {
        script = script.tap(KeyCode::W).idle(3);
    }
    script = script.hold(KeyCode::Q, 60).hold(KeyCode::E, 20).scroll(2.0).idle(2);

    // Sweep the pointer down the middle of the screen across the stack.
    for step in 0..15 {
        script = script.move_to(400.0, 250.0 + step as f32 * 20.0);
    }
    script
        .click(400.0, 400.0)
        .tap(KeyCode::S)
        .tap(KeyCode::S)
        .scroll(-1.0)
        .idle(10)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::default();
    logging::init(&config.logging);

    log::info!("Starting Tower Demo");

    let mut engine = Engine::new(config)?;
    let mut app = TowerApp::new();
    let result = engine.run(&mut app, session());

    match result {
        Ok(frames) => {
            log::info!("Tower demo completed after {} frames", frames);
            Ok(())
        }
        Err(e) => {
            log::error!("Tower demo failed: {:?}", e);
            Err(e.into())
        }
    }
}
