//! Browser platform bindings
//!
//! Looks up the page elements, wires keyboard and button listeners, and runs
//! the requestAnimationFrame loop. Missing HUD elements or buttons are logged
//! and skipped; only a missing canvas is fatal.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlCanvasElement, KeyboardEvent};

use crate::game::Game;
use crate::input::{InputSource, KeyEvent, KeyListener, Subscription};
use crate::renderer::CanvasSurface;
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::ui::{Hud, HudSlot};

const CANVAS_ID: &str = "game";
const START_BUTTON_ID: &str = "btnStart";
const RESET_BUTTON_ID: &str = "btnReset";

type SharedGame = Rc<RefCell<Game<CanvasSurface, DomHud>>>;

/// An event listener that is removed from its target when dropped
struct DomListener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: Box<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Keyboard events from a DOM target (normally the window)
pub struct KeyboardSource {
    target: EventTarget,
}

impl KeyboardSource {
    pub fn new(target: EventTarget) -> Self {
        Self { target }
    }
}

impl InputSource for KeyboardSource {
    fn subscribe(&mut self, listener: KeyListener) -> Subscription {
        let listener = Rc::new(RefCell::new(listener));

        let on_down = {
            let listener = Rc::clone(&listener);
            Box::new(move |event: Event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    (&mut *listener.borrow_mut())(&KeyEvent::Down(event.key()));
                }
            }) as Box<dyn FnMut(Event)>
        };
        let on_up = {
            let listener = Rc::clone(&listener);
            Box::new(move |event: Event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    (&mut *listener.borrow_mut())(&KeyEvent::Up(event.key()));
                }
            }) as Box<dyn FnMut(Event)>
        };

        match (
            DomListener::new(&self.target, "keydown", on_down),
            DomListener::new(&self.target, "keyup", on_up),
        ) {
            (Ok(down), Ok(up)) => Subscription::new(move || drop((down, up))),
            (down, up) => {
                log::error!(
                    "Keyboard listeners failed to register (keydown ok: {}, keyup ok: {})",
                    down.is_ok(),
                    up.is_ok()
                );
                Subscription::empty()
            }
        }
    }
}

/// HUD backed by DOM elements looked up by id
pub struct DomHud {
    slots: Vec<(HudSlot, Element)>,
}

impl DomHud {
    pub fn from_document(document: &Document) -> Self {
        let mut slots = Vec::with_capacity(HudSlot::ALL.len());
        for slot in HudSlot::ALL {
            match document.get_element_by_id(slot.element_id()) {
                Some(el) => slots.push((slot, el)),
                None => log::error!("#{} not found", slot.element_id()),
            }
        }
        Self { slots }
    }
}

impl Hud for DomHud {
    fn set_text(&mut self, slot: HudSlot, text: &str) {
        if let Some((_, el)) = self.slots.iter().find(|(s, _)| *s == slot) {
            el.set_text_content(Some(text));
        }
    }
}

/// Handle returned to the page; keeps the game and its listeners alive
#[wasm_bindgen]
pub struct GameHandle {
    game: SharedGame,
    buttons: Vec<DomListener>,
}

#[wasm_bindgen]
impl GameHandle {
    pub fn start(&self) {
        self.game.borrow_mut().start();
    }

    pub fn reset(&self) {
        self.game.borrow_mut().reset();
    }

    pub fn toggle_pause(&self) {
        self.game.borrow_mut().toggle_pause();
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.game.borrow().phase())
    }

    /// Remove every listener and stop the frame loop
    pub fn dispose(&mut self) {
        self.buttons.clear();
        self.game.borrow_mut().dispose();
    }
}

/// Entry point: build the game on the page's `#game` canvas and start the loop.
///
/// `settings_json` and `tuning_json` are optional JSON overrides.
#[wasm_bindgen]
pub fn start_game(
    settings_json: Option<String>,
    tuning_json: Option<String>,
) -> Result<GameHandle, JsValue> {
    console_error_panic_hook::set_once();

    let parsed = settings_json.as_deref().map(Settings::from_json);
    let level = match &parsed {
        Some(Ok(settings)) => settings.log_level(),
        _ => log::Level::Info,
    };
    // Already initialised when the page starts a second game
    let _ = console_log::init_with_level(level);

    let mut settings = match parsed {
        Some(Ok(settings)) => settings,
        Some(Err(e)) => {
            log::warn!("Ignoring settings ({}), using defaults", e);
            Settings::default()
        }
        None => Settings::default(),
    };
    let tuning = tuning_json
        .as_deref()
        .map(Tuning::from_json_or_default)
        .unwrap_or_default();

    log::info!("Farmer Game starting...");

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = match document.get_element_by_id(CANVAS_ID) {
        Some(el) => el.dyn_into::<HtmlCanvasElement>()?,
        None => {
            log::error!("Canvas #{} not found. Check index.html IDs.", CANVAS_ID);
            return Err(JsValue::from_str("canvas not found"));
        }
    };
    canvas.set_width(tuning.field_width as u32);
    canvas.set_height(tuning.field_height as u32);

    let surface = CanvasSurface::new(&canvas)?;
    let hud = DomHud::from_document(&document);
    let mut keyboard = KeyboardSource::new(window.clone().into());

    if settings.seed.is_none() {
        settings.seed = Some(js_sys::Date::now() as u64);
    }

    let game: SharedGame = Rc::new(RefCell::new(Game::new(
        surface,
        hud,
        &mut keyboard,
        tuning,
        &settings,
    )));

    let buttons = setup_buttons(&document, &game);
    request_animation_frame(Rc::clone(&game));

    log::info!("Farmer Game running!");
    Ok(GameHandle { game, buttons })
}

fn setup_buttons(document: &Document, game: &SharedGame) -> Vec<DomListener> {
    let mut listeners = Vec::new();

    let actions: [(&str, fn(&mut Game<CanvasSurface, DomHud>)); 2] = [
        (START_BUTTON_ID, |g| g.start()),
        (RESET_BUTTON_ID, |g| g.reset()),
    ];
    for (id, action) in actions {
        let Some(button) = document.get_element_by_id(id) else {
            log::error!("#{} not found", id);
            continue;
        };
        let game = Rc::clone(game);
        let handler = Box::new(move |_event: Event| action(&mut game.borrow_mut()))
            as Box<dyn FnMut(Event)>;
        match DomListener::new(&button, "click", handler) {
            Ok(listener) => listeners.push(listener),
            Err(e) => log::error!("Failed to wire #{}: {:?}", id, e),
        }
    }
    listeners
}

fn request_animation_frame(game: SharedGame) {
    let Some(window) = web_sys::window() else {
        log::error!("No window, frame loop stopped");
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(game: SharedGame, time: f64) {
    let keep_running = game.borrow_mut().frame(time);
    if keep_running {
        request_animation_frame(game);
    } else {
        log::info!("Frame loop stopped");
    }
}
