// Integration tests for the game controller.
// These drive `Game` headless through ManualInput, RecordingSurface and
// MemoryHud, so they run under plain `cargo test` on the host.

use farmer_game::input::{KeyEvent, ManualInput};
use farmer_game::renderer::RecordingSurface;
use farmer_game::sim::entity::{GOLDEN_APPLE, PUMPKIN};
use farmer_game::sim::{Crop, GamePhase};
use farmer_game::ui::{HudSlot, MemoryHud};
use farmer_game::{Game, PauseTrigger, Settings, Tuning};

type TestGame = Game<RecordingSurface, MemoryHud>;

fn new_game(input: &mut ManualInput, settings: Settings) -> TestGame {
    let settings = Settings {
        seed: Some(2024),
        ..settings
    };
    Game::new(
        RecordingSurface::new(),
        MemoryHud::new(),
        input,
        Tuning::default(),
        &settings,
    )
}

fn playing_game(input: &mut ManualInput) -> TestGame {
    let mut game = new_game(input, Settings::default());
    game.start();
    game
}

#[test]
fn new_game_waits_in_menu() {
    let mut input = ManualInput::new();
    let game = new_game(&mut input, Settings::default());

    assert_eq!(game.phase(), GamePhase::Menu);
    assert_eq!(game.hud().get(HudSlot::Status), Some("Menu"));
    assert_eq!(game.hud().get(HudSlot::Goal), Some("15"));
    assert_eq!(game.hud().get(HudSlot::Score), Some("0"));
    assert_eq!(game.hud().get(HudSlot::Time), Some("60"));
    assert_eq!(input.listener_count(), 1);
}

#[test]
fn start_from_menu_begins_fresh_round() {
    let mut input = ManualInput::new();
    let game = playing_game(&mut input);
    let state = game.state();

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.time_left, 60.0);
    assert_eq!(state.score, 0);
    assert!(state.crops.is_empty());
    assert_eq!(state.obstacles.len(), 2);
    assert_eq!(game.hud().get(HudSlot::Status), Some("Playing..."));
}

#[test]
fn reset_then_idle_frame_stays_in_menu() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);
    game.update(5.0);

    game.reset();
    game.update(0.0);

    let state = game.state();
    assert_eq!(state.phase, GamePhase::Menu);
    assert_eq!(state.score, 0);
    assert_eq!(state.time_left, 60.0);
    assert!(state.crops.is_empty());
}

#[test]
fn update_outside_playing_changes_nothing() {
    let mut input = ManualInput::new();
    let mut game = new_game(&mut input, Settings::default());
    input.press("ArrowLeft");

    let before = game.state().clone();
    game.update(1.0);
    let after = game.state();

    assert_eq!(after.phase, before.phase);
    assert_eq!(after.farmer, before.farmer);
    assert_eq!(after.crops, before.crops);
    assert_eq!(after.time_left, before.time_left);
    assert_eq!(after.score, before.score);
}

#[test]
fn full_round_in_one_step_is_game_over_below_goal() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);

    game.update(60.0);

    assert_eq!(game.state().time_left, 0.0);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.hud().get(HudSlot::Status), Some("Game Over"));
    assert_eq!(game.hud().get(HudSlot::Time), Some("0"));
}

#[test]
fn full_round_in_one_step_is_win_at_goal() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);
    game.state_mut().score = 15;

    game.update(60.0);

    assert_eq!(game.phase(), GamePhase::Win);
    assert_eq!(game.hud().get(HudSlot::Status), Some("You Win!"));
}

#[test]
fn overlapping_crop_is_collected_and_scored() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);
    let pos = game.state().farmer.pos;
    game.state_mut().crops.push(Crop::new(pos, Some(PUMPKIN)));

    game.update(0.01);

    assert!(game.state().crops.is_empty());
    assert_eq!(game.state().score, 3);
    assert_eq!(game.hud().get(HudSlot::Score), Some("3"));
}

#[test]
fn reaching_goal_mid_round_wins_immediately() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);
    game.state_mut().score = 10;
    let pos = game.state().farmer.pos;
    game.state_mut().crops.push(Crop::new(pos, Some(GOLDEN_APPLE)));

    game.update(0.016);

    assert_eq!(game.state().score, 15);
    assert_eq!(game.phase(), GamePhase::Win);
    assert!(game.state().time_left > 0.0);
    assert_eq!(game.hud().get(HudSlot::Status), Some("You Win!"));
}

#[test]
fn start_after_round_end_resets() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);
    game.state_mut().score = 7;
    game.update(60.0);
    assert_eq!(game.phase(), GamePhase::GameOver);

    game.start();

    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state().score, 0);
    assert_eq!(game.state().time_left, 60.0);
    assert_eq!(game.hud().get(HudSlot::Score), Some("0"));
}

#[test]
fn held_keys_move_the_farmer() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);
    let start = game.state().farmer.pos;

    input.press("ArrowLeft");
    game.update(0.1);
    assert!((game.state().farmer.pos.x - (start.x - 16.0)).abs() < 1e-3);

    input.release("ArrowLeft");
    game.update(0.1);
    assert!((game.state().farmer.pos.x - (start.x - 16.0)).abs() < 1e-3);
}

#[test]
fn pause_key_toggles_at_next_frame() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);

    input.press("p");
    // Not applied until the frame runs
    assert_eq!(game.phase(), GamePhase::Playing);
    game.frame(0.0);
    assert_eq!(game.phase(), GamePhase::Paused);
    assert_eq!(game.hud().get(HudSlot::Status), Some("Paused"));

    // Time is frozen while paused
    let frozen = game.state().time_left;
    game.frame(16.0);
    game.frame(32.0);
    assert_eq!(game.state().time_left, frozen);

    input.release("p");
    input.press("P");
    game.frame(48.0);
    assert_eq!(game.phase(), GamePhase::Playing);
}

#[test]
fn start_resumes_from_pause_without_reset() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);
    game.update(0.02);
    game.state_mut().score = 6;
    game.toggle_pause();
    assert_eq!(game.phase(), GamePhase::Paused);

    game.start();

    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state().score, 6);
    assert!(game.state().time_left < 60.0);
}

#[test]
fn repeated_pause_key_down_toggles_each_time() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);

    // Auto-repeat: three key-downs without a key-up
    for _ in 0..3 {
        game.handle_key(&KeyEvent::Down("p".to_string()));
    }
    assert_eq!(game.phase(), GamePhase::Paused);

    game.handle_key(&KeyEvent::Down("p".to_string()));
    assert_eq!(game.phase(), GamePhase::Playing);
}

#[test]
fn edge_triggered_pause_ignores_repeats() {
    let mut input = ManualInput::new();
    let settings = Settings {
        pause_trigger: PauseTrigger::PressEdge,
        ..Settings::default()
    };
    let mut game = new_game(&mut input, settings);
    game.start();

    for _ in 0..3 {
        input.press("p");
    }
    game.frame(0.0);
    assert_eq!(game.phase(), GamePhase::Paused);

    input.release("p");
    input.press("p");
    game.frame(16.0);
    assert_eq!(game.phase(), GamePhase::Playing);
}

#[test]
fn pause_key_in_menu_is_ignored() {
    let mut input = ManualInput::new();
    let mut game = new_game(&mut input, Settings::default());
    input.press("p");
    game.frame(0.0);
    assert_eq!(game.phase(), GamePhase::Menu);
}

#[test]
fn pending_pause_press_is_dropped_by_reset() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);

    input.press("p");
    game.reset();
    game.start();
    game.frame(0.0);

    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.hud().get(HudSlot::Status), Some("Playing..."));
}

#[test]
fn pending_pause_press_is_dropped_by_fresh_start() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);
    game.update(60.0);
    assert_eq!(game.phase(), GamePhase::GameOver);

    input.press("p");
    game.start();
    game.frame(0.0);

    assert_eq!(game.phase(), GamePhase::Playing);
}

#[test]
fn invalid_tuning_falls_back_to_defaults() {
    let mut input = ManualInput::new();
    let tuning = Tuning {
        spawn_every_start: 0.0,
        spawn_every_ramp: 0.0,
        ..Tuning::default()
    };
    let settings = Settings {
        seed: Some(2024),
        ..Settings::default()
    };
    let mut game = Game::new(
        RecordingSurface::new(),
        MemoryHud::new(),
        &mut input,
        tuning,
        &settings,
    );
    assert_eq!(game.state().tuning, Tuning::default());

    game.start();
    game.update(0.016);

    assert_eq!(game.phase(), GamePhase::Playing);
    assert!((game.state().spawn_every - 0.8).abs() < 1e-3);
}

#[test]
fn frames_cap_delta_time() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);

    game.frame(1000.0);
    assert_eq!(game.state().time_left, 60.0);

    // A two-second stall only advances the round by the cap
    game.frame(3000.0);
    assert!((game.state().time_left - (60.0 - 0.033)).abs() < 1e-4);
}

#[test]
fn frame_renders_every_phase() {
    let mut input = ManualInput::new();
    let mut game = new_game(&mut input, Settings::default());

    game.frame(0.0);
    assert!(game.surface().texts().any(|t| t == "Press Start to Begin"));

    game.start();
    game.frame(16.0);
    assert!(!game.surface().texts().any(|t| t == "Press Start to Begin"));
    assert_eq!(game.surface().frames, 2);
}

#[test]
fn dispose_stops_input_and_frames() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);

    game.dispose();
    assert!(game.is_disposed());
    assert_eq!(input.listener_count(), 0);

    input.press("ArrowLeft");
    assert!(!game.input().is_held("ArrowLeft"));
    assert!(!game.frame(16.0));

    // Disposing twice is harmless
    game.dispose();
}

#[test]
fn scripted_round_reaches_an_end_state() {
    let mut input = ManualInput::new();
    let mut game = playing_game(&mut input);

    let mut now = 0.0;
    let mut frames = 0;
    while game.phase() == GamePhase::Playing && frames < 10_000 {
        game.frame(now);
        now += 20.0;
        frames += 1;
    }

    assert!(matches!(game.phase(), GamePhase::GameOver | GamePhase::Win));
    assert!(game.state().time_left == 0.0 || game.phase() == GamePhase::Win);
}
