//! Keyboard input tracking
//!
//! The host delivers key events through an [`InputSource`]; the tracker keeps
//! the set of held keys and counts pause-key presses for the controller to
//! apply at the top of the next frame. Presses still pending when the round is
//! reset or restarted are dropped.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::settings::PauseTrigger;

/// A key event, identified by the browser `KeyboardEvent.key` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Down(String),
    Up(String),
}

/// Callback registered with an input source
pub type KeyListener = Box<dyn FnMut(&KeyEvent)>;

/// Something that can deliver key events to listeners
pub trait InputSource {
    /// Register a listener. Events stop once the returned subscription is disposed.
    fn subscribe(&mut self, listener: KeyListener) -> Subscription;
}

/// Handle to a registered listener
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to unregister
    pub fn empty() -> Self {
        Self { cancel: None }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }

    /// Unregister the listener. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Held-key set plus pending pause requests
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    keys: HashSet<String>,
    pause_requests: u32,
    trigger: PauseTrigger,
}

impl InputTracker {
    pub fn new(trigger: PauseTrigger) -> Self {
        Self {
            keys: HashSet::new(),
            pause_requests: 0,
            trigger,
        }
    }

    pub fn is_pause_key(key: &str) -> bool {
        key.eq_ignore_ascii_case("p")
    }

    pub fn handle(&mut self, event: &KeyEvent) {
        match event {
            KeyEvent::Down(key) => self.key_down(key),
            KeyEvent::Up(key) => self.key_up(key),
        }
    }

    pub fn key_down(&mut self, key: &str) {
        if Self::is_pause_key(key) {
            let repeat = self.keys.contains(key);
            if self.trigger == PauseTrigger::EveryKeyDown || !repeat {
                self.pause_requests += 1;
            }
        }
        self.keys.insert(key.to_string());
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.remove(key);
    }

    /// Currently held keys
    pub fn keys(&self) -> &HashSet<String> {
        &self.keys
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of pause toggles requested since the last call
    pub fn take_pause_requests(&mut self) -> u32 {
        std::mem::take(&mut self.pause_requests)
    }

    /// Drop pause toggles that have not been applied yet
    pub fn clear_pause_requests(&mut self) {
        self.pause_requests = 0;
    }
}

type ListenerSlot = Rc<RefCell<Vec<(u32, KeyListener)>>>;

/// In-memory input source, fed by calling [`ManualInput::emit`].
/// Used for headless runs and tests.
#[derive(Default)]
pub struct ManualInput {
    listeners: ListenerSlot,
    next_id: u32,
}

impl ManualInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every live listener
    pub fn emit(&self, event: KeyEvent) {
        for (_, listener) in self.listeners.borrow_mut().iter_mut() {
            listener(&event);
        }
    }

    pub fn press(&self, key: &str) {
        self.emit(KeyEvent::Down(key.to_string()));
    }

    pub fn release(&self, key: &str) {
        self.emit(KeyEvent::Up(key.to_string()));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl InputSource for ManualInput {
    fn subscribe(&mut self, listener: KeyListener) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.borrow_mut().push((id, listener));

        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(lid, _)| *lid != id);
            }
        })
    }
}
