//! Input handling for the visualizer window.
//!
//! [`Input`] folds raw winit window events into per-frame state: which keys
//! and buttons went down this frame (edge-triggered) and which are held. At
//! the end of the frame [`Input::session_events`] turns the edges into
//! [`SessionEvent`]s, so the session never polls continuous input state.
//!
//! | Input | Event |
//! |-------|-------|
//! | Left mouse press | place a positive charge at the cursor |
//! | Right mouse press | place a negative charge at the cursor |
//! | `T` press | spawn the test particle at the cursor |
//!
//! A held button or an OS key repeat never fires twice.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::charge::Polarity;
use crate::session::SessionEvent;
use crate::viewport::Viewport;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

/// Keys the visualizer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    T,
    Escape,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyT => KeyCode::T,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Input state tracking for keyboard and mouse.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,

    mouse_held: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,

    // Physical window pixels
    cursor: Vec2,
    window_size: (u32, u32),
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key went down this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a mouse button went down this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Cursor position in physical window pixels.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Cursor position in plane coordinates of `viewport`.
    pub fn cursor_plane(&self, viewport: Viewport) -> Vec2 {
        viewport.to_plane(viewport.window_to_pixel(self.cursor, self.window_size))
    }

    /// Clear per-frame edges. Call after the frame's events were consumed.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_pressed.clear();
    }

    /// Update the window size used to rescale the cursor.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    fn press_key(&mut self, key: KeyCode) {
        // Only fire pressed event if not already held (no repeat)
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
    }

    fn press_button(&mut self, btn: MouseButton) {
        if self.mouse_held.insert(btn) {
            self.mouse_pressed.insert(btn);
        }
    }

    fn release_button(&mut self, btn: MouseButton) {
        self.mouse_held.remove(&btn);
    }

    fn move_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let key = KeyCode::from(keycode);
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => self.press_button(btn),
                    ElementState::Released => self.release_button(btn),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::Resized(size) => self.set_window_size(size.width, size.height),

            WindowEvent::Focused(false) => {
                // Releases are lost while unfocused
                self.keys_held.clear();
                self.mouse_held.clear();
            }

            _ => {}
        }
    }

    /// Session events for the edges seen this frame, in a fixed order:
    /// positive charge, negative charge, particle spawn.
    pub fn session_events(&self, viewport: Viewport) -> Vec<SessionEvent> {
        let position = self.cursor_plane(viewport);
        let mut events = Vec::new();
        if self.mouse_pressed(MouseButton::Left) {
            events.push(SessionEvent::PlaceCharge {
                position,
                polarity: Polarity::Positive,
            });
        }
        if self.mouse_pressed(MouseButton::Right) {
            events.push(SessionEvent::PlaceCharge {
                position,
                polarity: Polarity::Negative,
            });
        }
        if self.key_pressed(KeyCode::T) {
            events.push(SessionEvent::SpawnParticle { position });
        }
        events
    }
}
