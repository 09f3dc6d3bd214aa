//! Game state and phase transitions
//!
//! Everything the simulation mutates lives here. Presentation layers read the
//! state and drain [`GameEvent`]s; they never write to it directly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Crop, Farmer, Scarecrow};
use crate::consts::{FARMER_START_X, FARMER_START_Y};
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for start
    #[default]
    Menu,
    /// Round in progress
    Playing,
    /// Round frozen by the pause key
    Paused,
    /// Time ran out below the goal
    GameOver,
    /// Goal reached
    Win,
}

impl GamePhase {
    /// Phases from which `start` begins a fresh round
    pub fn is_idle(&self) -> bool {
        matches!(self, GamePhase::Menu | GamePhase::GameOver | GamePhase::Win)
    }
}

/// Something observers (HUD, logs) may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    ScoreChanged(u32),
    /// Crops picked up this tick and the points they were worth
    CropsCollected { count: usize, points: u32 },
    CropSpawned { pos: Vec2 },
    TimeChanged(f32),
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub farmer: Farmer,
    /// Live crops, in spawn order
    pub crops: Vec<Crop>,
    pub obstacles: Vec<Scarecrow>,
    /// Seconds remaining, within [0, game_len]
    pub time_left: f32,
    pub score: u32,
    pub goal: u32,
    /// Current seconds between spawns
    pub spawn_every: f32,
    /// Time accumulated toward the next spawn
    pub accum_spawn: f32,
    /// Pending events since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a state in the menu phase with the given seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            farmer: Farmer::default(),
            crops: Vec::new(),
            obstacles: Vec::new(),
            time_left: tuning.game_len,
            score: 0,
            goal: tuning.goal,
            spawn_every: tuning.spawn_every_start,
            accum_spawn: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Put everything back to the start-of-round layout and enter the menu
    pub fn reset(&mut self) {
        self.farmer.set_pos(Vec2::new(FARMER_START_X, FARMER_START_Y));
        self.farmer.dir = Vec2::ZERO;
        self.crops.clear();
        self.obstacles = Scarecrow::layout();
        self.time_left = self.tuning.game_len;
        self.score = 0;
        self.spawn_every = self.tuning.spawn_every_start;
        self.accum_spawn = 0.0;
        self.set_phase(GamePhase::Menu);
    }

    /// Start a fresh round from an idle phase, or resume from pause.
    /// Returns true if the phase changed.
    pub fn start(&mut self) -> bool {
        match self.phase {
            phase if phase.is_idle() => {
                self.reset();
                self.set_phase(GamePhase::Playing);
                true
            }
            GamePhase::Paused => {
                self.set_phase(GamePhase::Playing);
                true
            }
            _ => false,
        }
    }

    /// Flip between playing and paused. Ignored in the other phases.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.set_phase(GamePhase::Paused),
            GamePhase::Paused => self.set_phase(GamePhase::Playing),
            phase => {
                log::debug!("Pause toggle ignored in {:?}", phase);
                return false;
            }
        }
        true
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.events.push(GameEvent::PhaseChanged(phase));
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn one crop on a random tile, inset one tile from every edge.
    ///
    /// Fields smaller than two tiles collapse the range to the first tile.
    pub fn spawn_crop(&mut self) {
        let tile = self.tuning.tile;
        let cols = grid_slots(self.tuning.field_width, tile);
        let rows = grid_slots(self.tuning.field_height, tile);

        let gx = self.rng.random_range(0..cols) as f32 * tile + tile;
        let gy = self.rng.random_range(0..rows) as f32 * tile + tile;

        let kind = if self.tuning.crop_types.is_empty() {
            None
        } else {
            let idx = self.rng.random_range(0..self.tuning.crop_types.len());
            Some(self.tuning.crop_types[idx].clone())
        };

        let pos = Vec2::new(gx, gy);
        self.crops.push(Crop::new(pos, kind));
        self.events.push(GameEvent::CropSpawned { pos });
    }
}

/// Number of tile positions available between the one-tile margins (at least one)
fn grid_slots(extent: f32, tile: f32) -> u32 {
    let slots = ((extent - 2.0 * tile) / tile).ceil();
    if slots.is_finite() && slots >= 1.0 {
        slots as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::{Bounded, Rect, aabb};
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(Tuning::default(), 42);
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::new(Tuning::default(), 1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_left, 60.0);
        assert_eq!(state.goal, 15);
    }

    #[test]
    fn test_start_from_menu_resets() {
        let mut state = GameState::new(Tuning::default(), 1);
        state.score = 9;
        state.crops.push(Crop::new(Vec2::ZERO, None));
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.crops.is_empty());
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::PhaseChanged(GamePhase::Menu),
                GameEvent::PhaseChanged(GamePhase::Playing)
            ]
        );
    }

    #[test]
    fn test_start_resumes_pause_without_reset() {
        let mut state = playing_state();
        state.score = 4;
        state.time_left = 20.0;
        state.toggle_pause();
        assert_eq!(state.phase, GamePhase::Paused);

        assert!(state.start());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 4);
        assert_eq!(state.time_left, 20.0);
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let mut state = playing_state();
        state.score = 3;
        assert!(!state.start());
        assert_eq!(state.score, 3);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_toggle_pause_only_between_playing_and_paused() {
        let mut state = GameState::new(Tuning::default(), 1);
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Menu);

        state.start();
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::Win;
        assert!(!state.toggle_pause());
        assert_eq!(state.phase, GamePhase::Win);
    }

    #[test]
    fn test_spawn_is_grid_aligned_and_inset() {
        let mut state = playing_state();
        let field = Rect::new(Vec2::ZERO, state.tuning.field_size());
        for _ in 0..500 {
            state.spawn_crop();
        }
        for crop in &state.crops {
            assert_eq!(crop.pos.x % 30.0, 0.0);
            assert_eq!(crop.pos.y % 30.0, 0.0);
            let b = crop.bounds();
            assert!(b.left() >= 30.0 && b.top() >= 30.0);
            assert!(b.right() < field.right() && b.bottom() < field.bottom());
        }
    }

    #[test]
    fn test_spawn_uses_every_crop_type() {
        let mut state = playing_state();
        for _ in 0..300 {
            state.spawn_crop();
        }
        for kind in &state.tuning.crop_types {
            assert!(state.crops.iter().any(|c| &c.kind == kind));
        }
    }

    #[test]
    fn test_spawn_on_tiny_field_collapses_to_one_tile() {
        let tuning = Tuning {
            field_width: 40.0,
            field_height: 10.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 3);
        for _ in 0..20 {
            state.spawn_crop();
        }
        assert!(state.crops.iter().all(|c| c.pos == Vec2::new(30.0, 30.0)));
    }

    #[test]
    fn test_spawn_without_crop_types_uses_default() {
        let tuning = Tuning {
            crop_types: Vec::new(),
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 3);
        state.spawn_crop();
        assert_eq!(state.crops[0].kind.name, "default");
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(Tuning::default(), 99);
        let mut b = GameState::new(Tuning::default(), 99);
        for _ in 0..10 {
            a.spawn_crop();
            b.spawn_crop();
        }
        assert_eq!(a.crops, b.crops);
    }

    proptest! {
        #[test]
        fn spawned_crop_never_touches_field_edges(seed in any::<u64>()) {
            let mut state = GameState::new(Tuning::default(), seed);
            state.spawn_crop();
            let crop = &state.crops[0];
            let b = crop.bounds();
            let inner = Rect::from_xywh(1.0, 1.0, 898.0, 538.0);
            prop_assert!(aabb(&b, &inner));
            prop_assert!(b.left() > 0.0 && b.top() > 0.0);
            prop_assert!(b.right() < 900.0 && b.bottom() < 540.0);
        }
    }
}
