//! GLFW event translation
//!
//! Maps `glfw::WindowEvent`s onto [`InputEvent`]s. Window creation and the
//! event loop stay with the application.

use glfw::{Action, Key, WindowEvent};

use super::{InputEvent, InputManager, KeyCode, MouseButton};

/// Translate a GLFW key into an engine key code
pub fn map_key(key: Key) -> Option<KeyCode> {
    let code = match key {
        Key::A => KeyCode::A,
        Key::B => KeyCode::B,
        Key::C => KeyCode::C,
        Key::D => KeyCode::D,
        Key::E => KeyCode::E,
        Key::F => KeyCode::F,
        Key::G => KeyCode::G,
        Key::H => KeyCode::H,
        Key::I => KeyCode::I,
        Key::J => KeyCode::J,
        Key::K => KeyCode::K,
        Key::L => KeyCode::L,
        Key::M => KeyCode::M,
        Key::N => KeyCode::N,
        Key::O => KeyCode::O,
        Key::P => KeyCode::P,
        Key::Q => KeyCode::Q,
        Key::R => KeyCode::R,
        Key::S => KeyCode::S,
        Key::T => KeyCode::T,
        Key::U => KeyCode::U,
        Key::V => KeyCode::V,
        Key::W => KeyCode::W,
        Key::X => KeyCode::X,
        Key::Y => KeyCode::Y,
        Key::Z => KeyCode::Z,
        Key::Num0 | Key::Kp0 => KeyCode::Num0,
        Key::Num1 | Key::Kp1 => KeyCode::Num1,
        Key::Num2 | Key::Kp2 => KeyCode::Num2,
        Key::Num3 | Key::Kp3 => KeyCode::Num3,
        Key::Num4 | Key::Kp4 => KeyCode::Num4,
        Key::Num5 | Key::Kp5 => KeyCode::Num5,
        Key::Num6 | Key::Kp6 => KeyCode::Num6,
        Key::Num7 | Key::Kp7 => KeyCode::Num7,
        Key::Num8 | Key::Kp8 => KeyCode::Num8,
        Key::Num9 | Key::Kp9 => KeyCode::Num9,
        Key::Space => KeyCode::Space,
        Key::Enter | Key::KpEnter => KeyCode::Enter,
        Key::Escape => KeyCode::Escape,
        Key::Backspace => KeyCode::Backspace,
        Key::Delete => KeyCode::Delete,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        _ => return None,
    };
    Some(code)
}

/// Translate a GLFW mouse button
pub fn map_mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Translate a window event; unrelated events and key repeats yield `None`
pub fn translate(event: &WindowEvent) -> Option<InputEvent> {
    match *event {
        WindowEvent::Key(key, _, action, _) => {
            let key = map_key(key)?;
            match action {
                Action::Press => Some(InputEvent::Key { key, pressed: true }),
                Action::Release => Some(InputEvent::Key { key, pressed: false }),
                Action::Repeat => None,
            }
        }
        WindowEvent::MouseButton(button, action, _) => {
            let button = map_mouse_button(button)?;
            Some(InputEvent::MouseButton { button, pressed: action == Action::Press })
        }
        WindowEvent::CursorPos(x, y) => Some(InputEvent::CursorMoved { x, y }),
        WindowEvent::Scroll(_, y) => Some(InputEvent::Scroll { y }),
        WindowEvent::FramebufferSize(width, height) if width > 0 && height > 0 => {
            Some(InputEvent::Resized { width: width as u32, height: height as u32 })
        }
        _ => None,
    }
}

impl InputManager {
    /// Feed a GLFW window event into the manager
    pub fn handle_glfw_event(&mut self, event: &WindowEvent) {
        if let Some(event) = translate(event) {
            self.handle_event(event);
        }
    }
}
