//! Host input events

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// Pointer event in canvas pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Up,
            x,
            y,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key: char,
}

impl KeyEvent {
    pub fn down(key: char) -> Self {
        Self {
            action: KeyAction::Down,
            key,
        }
    }

    pub fn up(key: char) -> Self {
        Self {
            action: KeyAction::Up,
            key,
        }
    }
}
