//! Farmer Game entry point
//!
//! On the web the page calls the exported `start_game` from the library. The
//! native binary plays one headless round with a scripted farmer and logs the
//! result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use farmer_game::input::ManualInput;
    use farmer_game::renderer::RecordingSurface;
    use farmer_game::sim::{Bounded, GamePhase};
    use farmer_game::ui::LogHud;
    use farmer_game::{Game, Settings, Tuning};

    env_logger::init();
    log::info!("Farmer Game (native) starting...");
    log::info!("Rendering is headless here - build with `wasm-pack build --target web` for the browser");

    let settings = Settings {
        seed: std::env::args().nth(1).and_then(|s| s.parse().ok()),
        ..Settings::default()
    };
    let mut input = ManualInput::new();
    let mut game = Game::new(
        RecordingSurface::new(),
        LogHud::default(),
        &mut input,
        Tuning::default(),
        &settings,
    );

    game.start();

    // Chase the oldest crop at ~60 fps until the round ends
    const FRAME_MS: f64 = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut held: Vec<&'static str> = Vec::new();
    while game.phase() == GamePhase::Playing {
        let wanted = chase_keys(&game);
        for key in held.iter().filter(|k| !wanted.contains(*k)) {
            input.release(key);
        }
        for key in wanted.iter().filter(|k| !held.contains(*k)) {
            input.press(key);
        }
        held = wanted;

        game.frame(now);
        now += FRAME_MS;
    }

    let state = game.state();
    log::info!(
        "Round over: {:?} with {} / {} points, {:.1}s left, {} frames drawn",
        state.phase,
        state.score,
        state.goal,
        state.time_left,
        game.surface().frames
    );
    game.dispose();

    fn chase_keys<S, H>(game: &Game<S, H>) -> Vec<&'static str>
    where
        S: farmer_game::renderer::Surface,
        H: farmer_game::ui::Hud,
    {
        let state = game.state();
        let Some(target) = state.crops.first() else {
            return Vec::new();
        };
        let farmer = state.farmer.bounds();
        let crop = target.bounds();
        let mut keys = Vec::new();
        if crop.right() <= farmer.left() {
            keys.push("ArrowLeft");
        } else if crop.left() >= farmer.right() {
            keys.push("ArrowRight");
        }
        if crop.bottom() <= farmer.top() {
            keys.push("ArrowUp");
        } else if crop.top() >= farmer.bottom() {
            keys.push("ArrowDown");
        }
        keys
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `start_game`, this is just to satisfy the compiler
}
