//! Game controller
//!
//! Owns the simulation state together with its collaborators (render surface,
//! HUD, input subscription) and drives one update + render per frame.

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::{InputSource, InputTracker, KeyEvent, Subscription};
use crate::renderer::{SceneOptions, Surface, render};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::tuning::Tuning;
use crate::ui::{Hud, HudSlot, status_text, time_text};

/// Seed used when the settings do not pin one and the host supplies none
pub const DEFAULT_SEED: u64 = 0x5EED_F4A3;

/// Turns animation-frame timestamps into capped simulation deltas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous timestamp, capped at `max_dt`.
    /// The first frame after construction or [`FrameClock::rewind`] yields 0.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp
    pub fn rewind(&mut self) {
        self.last_ms = None;
    }
}

/// Main game controller
pub struct Game<S: Surface, H: Hud> {
    state: GameState,
    input: Rc<RefCell<InputTracker>>,
    subscription: Subscription,
    surface: S,
    hud: H,
    clock: FrameClock,
    scene: SceneOptions,
    disposed: bool,
}

impl<S: Surface, H: Hud> Game<S, H> {
    /// Build a controller around injected collaborators and register for key
    /// events. The game starts in the menu. Invalid tuning falls back to the
    /// defaults.
    pub fn new(
        surface: S,
        hud: H,
        source: &mut dyn InputSource,
        tuning: Tuning,
        settings: &Settings,
    ) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning ({}), using defaults", e);
                Tuning::default()
            }
        };
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        let input = Rc::new(RefCell::new(InputTracker::new(settings.pause_trigger)));

        let sink = Rc::clone(&input);
        let subscription = source.subscribe(Box::new(move |event: &KeyEvent| {
            sink.borrow_mut().handle(event);
        }));

        let clock = FrameClock::new(tuning.max_frame_dt);
        let mut game = Self {
            state: GameState::new(tuning, seed),
            input,
            subscription,
            surface,
            hud,
            clock,
            scene: SceneOptions {
                crop_points: settings.show_crop_points,
            },
            disposed: false,
        };
        log::info!(
            "Game created (seed {}, goal {}, {}s rounds)",
            seed,
            game.state.goal,
            game.state.tuning.game_len
        );
        game.reset();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    pub fn input(&self) -> std::cell::Ref<'_, InputTracker> {
        self.input.borrow()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Begin a new round from the menu or an ended round, or resume from pause
    pub fn start(&mut self) {
        let fresh_round = self.state.phase.is_idle();
        if !self.state.start() {
            return;
        }
        if fresh_round {
            self.input.borrow_mut().clear_pause_requests();
            self.clock.rewind();
            self.sync_ui();
            log::info!("Round started");
        } else {
            log::info!("Resumed");
        }
        self.apply_events();
    }

    /// Return everything to the start-of-round layout and show the menu
    pub fn reset(&mut self) {
        self.state.reset();
        self.input.borrow_mut().clear_pause_requests();
        self.clock.rewind();
        self.apply_events();
        self.sync_ui();
    }

    pub fn toggle_pause(&mut self) {
        if self.state.toggle_pause() {
            log::info!("{}", status_text(self.state.phase));
            self.apply_events();
        }
    }

    /// Feed a key event straight to the tracker and apply any pause toggle now
    pub fn handle_key(&mut self, event: &KeyEvent) {
        self.input.borrow_mut().handle(event);
        self.apply_pending_input();
    }

    /// Apply pause toggles requested since the last frame.
    /// [`Game::reset`] and a fresh [`Game::start`] discard any still pending.
    pub fn apply_pending_input(&mut self) {
        let requests = self.input.borrow_mut().take_pause_requests();
        for _ in 0..requests {
            self.toggle_pause();
        }
    }

    /// Advance the simulation. No-op unless a round is in progress.
    pub fn update(&mut self, dt: f32) {
        {
            let input = self.input.borrow();
            tick(&mut self.state, input.keys(), dt);
        }
        self.apply_events();
    }

    /// Draw the current frame (any phase)
    pub fn render(&mut self) {
        render(&self.state, &mut self.surface, self.scene);
    }

    /// One animation frame: clock, pending input, update, render.
    /// Returns false once the game has been disposed.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.disposed {
            return false;
        }
        let dt = self.clock.advance(now_ms);
        self.apply_pending_input();
        self.update(dt);
        self.render();
        true
    }

    /// Stop listening for input and stop the frame loop
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.subscription.dispose();
        self.disposed = true;
        log::info!("Game disposed");
    }

    /// Push score, time and goal to the HUD
    fn sync_ui(&mut self) {
        self.hud.set_text(HudSlot::Score, &self.state.score.to_string());
        self.hud.set_text(HudSlot::Time, &time_text(self.state.time_left));
        self.hud.set_text(HudSlot::Goal, &self.state.goal.to_string());
    }

    fn apply_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::PhaseChanged(phase) => {
                    self.hud.set_text(HudSlot::Status, status_text(phase));
                }
                GameEvent::ScoreChanged(score) => {
                    self.hud.set_text(HudSlot::Score, &score.to_string());
                }
                GameEvent::TimeChanged(time_left) => {
                    self.hud.set_text(HudSlot::Time, &time_text(time_left));
                }
                GameEvent::CropSpawned { pos } => {
                    log::trace!("Crop spawned at ({}, {})", pos.x, pos.y);
                }
                GameEvent::CropsCollected { .. } => {}
            }
        }
    }
}
