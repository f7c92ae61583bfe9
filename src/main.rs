//! BasketFall entry point
//!
//! Native builds run a scripted headless session at 60 fps and log what
//! happens. A windowed host drives the same `World` API: feed frame time to
//! `advance`, forward input, paint `render_frame`.

#[cfg(not(target_arch = "wasm32"))]
use basketfall::{
    Action, Settings, SpriteSizes,
    sim::{GameEvent, GameStage, World},
};
#[cfg(not(target_arch = "wasm32"))]
use glam::Vec2;

/// Host frame interval for the scripted session
#[cfg(not(target_arch = "wasm32"))]
const FRAME_SECS: f32 = 1.0 / 60.0;
/// Session length in frames (one minute)
#[cfg(not(target_arch = "wasm32"))]
const SESSION_FRAMES: u32 = 60 * 60;

/// Sizes of the bundled artwork, used when the settings file names none
#[cfg(not(target_arch = "wasm32"))]
fn bundled_sprites() -> SpriteSizes {
    SpriteSizes {
        player: Vec2::new(60.0, 160.0),
        ball: Vec2::new(30.0, 30.0),
        hoop: Vec2::new(200.0, 300.0),
        basket: Vec2::new(160.0, 80.0),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("BasketFall (native, headless) starting...");

    let settings = Settings::load_or_default();
    let sprites = settings.sprites.unwrap_or_else(bundled_sprites);
    let mut world = match World::new(settings, sprites) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Cannot start: {e}");
            std::process::exit(1);
        }
    };
    log::info!("World initialized with seed: {}", world.settings.seed);

    if let Err(e) = run_session(&mut world) {
        log::error!("Session aborted: {e}");
        std::process::exit(1);
    }

    println!(
        "Session over: stage {:?}, score {}, {} ticks",
        world.stage(),
        world.score(),
        world.time_ticks()
    );
}

/// Start a round and play it with a simple script: lean into the fall,
/// shoot every few seconds, restart after a death.
#[cfg(not(target_arch = "wasm32"))]
fn run_session(world: &mut World) -> Result<(), basketfall::SimError> {
    world.handle(Action::AdvanceStage)?;

    for frame in 0..SESSION_FRAMES {
        // Hold against the current lean to stay upright
        let tilt = world.player().map_or(0.0, |p| p.body.tilt);
        world.set_left(tilt > 0.05);
        world.set_right(tilt < -0.05);

        if frame % 180 == 90 {
            world.handle(Action::Shoot)?;
        }
        if frame % 600 == 599 {
            world.handle(Action::CycleBackground)?;
        }

        world.advance(FRAME_SECS)?;
        let painted = world.render_frame().len();
        log::trace!("Frame {frame}: {painted} draw commands");

        for event in world.drain_events() {
            match event {
                GameEvent::Scored { total } => log::info!("Scored! total {total}"),
                GameEvent::BallLost => log::debug!("Ball lost"),
                GameEvent::Died(cause) => log::info!("Died ({cause:?}) at frame {frame}"),
                GameEvent::StageChanged { .. } => {}
            }
        }

        // Terminal -> title -> playing
        if world.stage() == GameStage::Terminal && frame + 1 < SESSION_FRAMES {
            world.handle(Action::AdvanceStage)?;
            world.handle(Action::AdvanceStage)?;
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts embed the library directly; nothing to run here
}
