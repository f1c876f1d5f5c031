//! Input management system
//!
//! [`InputManager`] latches raw window events into held state plus
//! per-frame edges (just pressed / just released), pointer delta and scroll.
//! Once per frame the engine takes a [`FrameInput`] snapshot for scene code and
//! picking, then calls [`InputManager::end_frame`] to reset the edges.

pub mod picking;
#[cfg(feature = "glfw")]
pub mod glfw_adapter;

pub use picking::{FrameInput, screen_to_ndc};

use std::collections::HashSet;

use crate::foundation::math::Vec2;

/// Raw input event, as delivered by a windowing backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed or released
    Key {
        /// Key
        key: KeyCode,
        /// `true` on press, `false` on release
        pressed: bool,
    },
    /// Mouse button pressed or released
    MouseButton {
        /// Button
        button: MouseButton,
        /// `true` on press, `false` on release
        pressed: bool,
    },
    /// Pointer moved, in pixels from the top-left corner
    CursorMoved {
        /// X position
        x: f64,
        /// Y position
        y: f64,
    },
    /// Scroll wheel moved
    Scroll {
        /// Vertical offset
        y: f64,
    },
    /// Framebuffer resized
    Resized {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
}

impl InputEvent {
    /// Press and release of a key within one frame
    pub fn tap(key: KeyCode) -> [Self; 2] {
        [
            Self::Key { key, pressed: true },
            Self::Key { key, pressed: false },
        ]
    }

    /// Move the pointer to `(x, y)` and press the left button there
    pub fn click_at(x: f64, y: f64) -> [Self; 3] {
        [
            Self::CursorMoved { x, y },
            Self::MouseButton { button: MouseButton::Left, pressed: true },
            Self::MouseButton { button: MouseButton::Left, pressed: false },
        ]
    }
}

/// Input manager
#[derive(Debug, Clone)]
pub struct InputManager {
    keys_down: HashSet<KeyCode>,
    keys_just_pressed: HashSet<KeyCode>,
    keys_just_released: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    buttons_just_pressed: HashSet<MouseButton>,
    buttons_just_released: HashSet<MouseButton>,
    pointer: Vec2,
    last_pointer: Vec2,
    pointer_delta: Vec2,
    scroll_y: f32,
    viewport: Vec2,
}

impl InputManager {
    /// Create an input manager for a viewport of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            buttons_down: HashSet::new(),
            buttons_just_pressed: HashSet::new(),
            buttons_just_released: HashSet::new(),
            pointer: Vec2::zeros(),
            last_pointer: Vec2::zeros(),
            pointer_delta: Vec2::zeros(),
            scroll_y: 0.0,
            viewport: Vec2::new(width as f32, height as f32),
        }
    }

    /// Apply one raw event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, pressed } => self.handle_key_input(key, pressed),
            InputEvent::MouseButton { button, pressed } => self.handle_mouse_button(button, pressed),
            InputEvent::CursorMoved { x, y } => self.handle_mouse_move(x, y),
            InputEvent::Scroll { y } => self.handle_scroll(y),
            InputEvent::Resized { width, height } => self.set_viewport(width, height),
        }
    }

    /// Handle key input
    ///
    /// A press only counts as "just pressed" when the key was up, so OS key
    /// repeat does not produce extra edges.
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.keys_down.insert(key) {
                self.keys_just_pressed.insert(key);
            }
            self.keys_just_released.remove(&key);
        } else if self.keys_down.remove(&key) {
            self.keys_just_released.insert(key);
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            if self.buttons_down.insert(button) {
                self.buttons_just_pressed.insert(button);
            }
            self.buttons_just_released.remove(&button);
        } else if self.buttons_down.remove(&button) {
            self.buttons_just_released.insert(button);
        }
    }

    /// Handle mouse movement
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.pointer = Vec2::new(x as f32, y as f32);
    }

    /// Accumulate vertical scroll for this frame
    pub fn handle_scroll(&mut self, y: f64) {
        self.scroll_y += y as f32;
    }

    /// Update the viewport size used for NDC conversion
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width as f32, height as f32);
        log::debug!("Input viewport resized to {}x{}", width, height);
    }

    /// Whether a key is held
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether a key went down this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Whether a key went up this frame
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }

    /// Whether a mouse button is held
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Whether a mouse button went down this frame
    pub fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons_just_pressed.contains(&button)
    }

    /// Whether a mouse button went up this frame
    pub fn is_mouse_button_just_released(&self, button: MouseButton) -> bool {
        self.buttons_just_released.contains(&button)
    }

    /// Pointer position in pixels, top-left origin
    pub fn mouse_position(&self) -> Vec2 {
        self.pointer
    }

    /// Pointer movement measured at the last frame boundary, Y up
    pub fn mouse_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    /// Scroll accumulated this frame
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Snapshot of this frame's input
    pub fn frame_input(&self) -> FrameInput {
        let mut keys_pressed: Vec<KeyCode> = self.keys_just_pressed.iter().copied().collect();
        keys_pressed.sort();
        let mut keys_held: Vec<KeyCode> = self.keys_down.iter().copied().collect();
        keys_held.sort();

        FrameInput {
            pointer: self.pointer,
            primary_just_pressed: self.is_mouse_button_just_pressed(MouseButton::Left),
            viewport: self.viewport,
            scroll_y: self.scroll_y,
            keys_pressed,
            keys_held,
        }
    }

    /// Clear per-frame edges and scroll, and measure pointer movement
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.buttons_just_pressed.clear();
        self.buttons_just_released.clear();
        self.scroll_y = 0.0;
        self.pointer_delta = Vec2::new(
            self.pointer.x - self.last_pointer.x,
            self.last_pointer.y - self.pointer.y,
        );
        self.last_pointer = self.pointer;
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// 0 key
    Num0,
    /// 1 key
    Num1,
    /// 2 key
    Num2,
    /// 3 key
    Num3,
    /// 4 key
    Num4,
    /// 5 key
    Num5,
    /// 6 key
    Num6,
    /// 7 key
    Num7,
    /// 8 key
    Num8,
    /// 9 key
    Num9,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl KeyCode {
    /// Digit keys 0 through 9, indexed by their value
    pub const DIGITS: [KeyCode; 10] = [
        KeyCode::Num0,
        KeyCode::Num1,
        KeyCode::Num2,
        KeyCode::Num3,
        KeyCode::Num4,
        KeyCode::Num5,
        KeyCode::Num6,
        KeyCode::Num7,
        KeyCode::Num8,
        KeyCode::Num9,
    ];

    /// Value of a digit key
    pub fn digit(self) -> Option<u8> {
        Self::DIGITS.iter().position(|k| *k == self).map(|d| d as u8)
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
