//! Platform abstraction layer
//!
//! Browser bindings live in `web` (wasm32 only): canvas surface lookup, DOM
//! HUD slots, keyboard input source, buttons and the requestAnimationFrame
//! driver. Native builds run the core headless through `ManualInput`,
//! `RecordingSurface` and the in-memory HUDs.

#[cfg(target_arch = "wasm32")]
pub mod web;
