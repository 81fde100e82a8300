//! Asteroids headless entry point
//!
//! Runs an autopilot session at simulated wall time and logs the HUD.
//! Usage: `asteroids [seconds] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use asteroids::audio::AudioManager;
    use asteroids::sim::Autopilot;
    use asteroids::{Game, JsonFileScoreStore, Tuning};

    env_logger::init();
    log::info!("Asteroids (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seconds: f32 = match args.next().map(|s| s.parse()) {
        Some(Ok(secs)) => secs,
        Some(Err(e)) => {
            log::warn!("Bad duration argument ({}), using 60s", e);
            60.0
        }
        None => 60.0,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(Path::new(&path)),
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let store = JsonFileScoreStore::new("asteroids_highscore.json");
    let rate = tuning.tick_rate;
    let mut game = Game::new(tuning, seed, Box::new(store), AudioManager::default());
    let mut pilot = Autopilot::new();

    // Feed the driver 60 Hz frames, as a display loop would
    let frame = 1.0 / 60.0;
    let frames = (seconds / frame).round() as u64;
    let mut last_report = 0;
    for _ in 0..frames {
        for intent in pilot.intents(game.state()) {
            game.push_intent(intent);
        }
        game.update(frame);

        let ticks = game.state().time_ticks;
        if ticks - last_report >= u64::from(rate) {
            last_report = ticks;
            let hud = game.snapshot().hud;
            log::info!(
                "t={}s level={} score={} high={} lives={} rocks={}",
                ticks / u64::from(rate),
                hud.level,
                hud.score,
                hud.high_score,
                hud.lives,
                game.state().asteroids.len()
            );
        }
    }

    let state = game.state();
    println!(
        "Finished after {} ticks: level {}, score {}, high score {}",
        state.time_ticks,
        state.level + 1,
        state.score,
        state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; a host page drives `Game` directly
}
