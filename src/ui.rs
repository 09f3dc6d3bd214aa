//! HUD text slots
//!
//! The page shows score, time left, goal and a status line. Hosts implement
//! [`Hud`]; a host that lacks a slot simply ignores writes to it.

use std::collections::HashMap;

use crate::sim::GamePhase;

/// One text slot on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudSlot {
    Score,
    Time,
    Goal,
    Status,
}

impl HudSlot {
    pub const ALL: [HudSlot; 4] = [HudSlot::Score, HudSlot::Time, HudSlot::Goal, HudSlot::Status];

    /// DOM element id backing this slot
    pub fn element_id(&self) -> &'static str {
        match self {
            HudSlot::Score => "score",
            HudSlot::Time => "time",
            HudSlot::Goal => "goal",
            HudSlot::Status => "status",
        }
    }
}

/// Status line text for a phase
pub fn status_text(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Menu => "Menu",
        GamePhase::Playing => "Playing...",
        GamePhase::Paused => "Paused",
        GamePhase::GameOver => "Game Over",
        GamePhase::Win => "You Win!",
    }
}

/// Time left as shown to the player: whole seconds, rounded up
pub fn time_text(time_left: f32) -> String {
    (time_left.ceil() as i64).to_string()
}

/// Display collaborator for HUD text
pub trait Hud {
    fn set_text(&mut self, slot: HudSlot, text: &str);
}

/// HUD that keeps slot contents in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryHud {
    slots: HashMap<HudSlot, String>,
    pub writes: usize,
}

impl MemoryHud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: HudSlot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }
}

impl Hud for MemoryHud {
    fn set_text(&mut self, slot: HudSlot, text: &str) {
        self.writes += 1;
        self.slots.insert(slot, text.to_string());
    }
}

/// HUD that reports changes through the log (native demo)
#[derive(Debug, Clone, Default)]
pub struct LogHud {
    last: HashMap<HudSlot, String>,
}

impl Hud for LogHud {
    fn set_text(&mut self, slot: HudSlot, text: &str) {
        if self.last.get(&slot).map(String::as_str) == Some(text) {
            return;
        }
        // Time changes every second; keep it out of info-level output
        if slot == HudSlot::Time {
            log::debug!("{}: {}", slot.element_id(), text);
        } else {
            log::info!("{}: {}", slot.element_id(), text);
        }
        self.last.insert(slot, text.to_string());
    }
}
