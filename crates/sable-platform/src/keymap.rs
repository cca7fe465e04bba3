//! winit → Sable input conversion.

use sable_core::{Key, KeyEvent, Modifiers, Vec2};
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};

use crate::LINE_SCROLL_PX;

/// Logical key mapping. Keys the selector never reacts to map to `None`.
pub fn map_key(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Named(named) => Some(match named {
            NamedKey::Enter => Key::Enter,
            NamedKey::Tab => Key::Tab,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::Delete => Key::Delete,
            NamedKey::Escape => Key::Escape,
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,
            NamedKey::ArrowUp => Key::ArrowUp,
            NamedKey::ArrowDown => Key::ArrowDown,
            NamedKey::Home => Key::Home,
            NamedKey::End => Key::End,
            NamedKey::PageUp => Key::PageUp,
            NamedKey::PageDown => Key::PageDown,
            NamedKey::Space => Key::Space,
            NamedKey::F1 => Key::F(1),
            NamedKey::F2 => Key::F(2),
            NamedKey::F3 => Key::F(3),
            NamedKey::F4 => Key::F(4),
            NamedKey::F5 => Key::F(5),
            NamedKey::F6 => Key::F(6),
            NamedKey::F7 => Key::F(7),
            NamedKey::F8 => Key::F(8),
            NamedKey::F9 => Key::F(9),
            NamedKey::F10 => Key::F(10),
            NamedKey::F11 => Key::F(11),
            NamedKey::F12 => Key::F(12),
            _ => return None,
        }),
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                // dead-key compositions and IME strings go through text input
                return None;
            }
            Some(if c == ' ' { Key::Space } else { Key::Character(c) })
        }
        _ => None,
    }
}

pub fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Key presses only; releases are dropped.
pub fn map_key_event(ev: &winit::event::KeyEvent, mods: ModifiersState) -> Option<KeyEvent> {
    if ev.state != ElementState::Pressed {
        return None;
    }
    let key = map_key(&ev.logical_key)?;
    Some(KeyEvent {
        key,
        modifiers: map_modifiers(mods),
        is_repeat: ev.repeat,
    })
}

/// Wheel delta in px, positive = content moves up.
pub fn wheel_delta(delta: MouseScrollDelta) -> Vec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => Vec2::new(-x * LINE_SCROLL_PX, -y * LINE_SCROLL_PX),
        MouseScrollDelta::PixelDelta(p) => Vec2::new(-(p.x as f32), -(p.y as f32)),
    }
}
