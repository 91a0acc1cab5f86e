//! Pointer geometry, keyboard keys and update phases shared by the field and
//! the slider.

use serde::{Deserialize, Serialize};

/// Bounding rectangle of a widget in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Percentage position of a client point inside the rectangle, clamped to
    /// `[0, 100]` on both axes.
    ///
    /// A zero-sized (or negative) axis maps to 0.
    pub fn position_of(&self, client_x: f64, client_y: f64) -> PointerPosition {
        PointerPosition {
            x: axis_percent(client_x - self.left, self.width),
            y: axis_percent(client_y - self.top, self.height),
        }
    }
}

fn axis_percent(offset: f64, extent: f64) -> f64 {
    if !(extent > 0.0) {
        return 0.0;
    }
    let percent = offset / extent * 100.0;
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// A pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub pointer_id: i64,
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub const fn new(pointer_id: i64, client_x: f64, client_y: f64) -> Self {
        Self {
            pointer_id,
            client_x,
            client_y,
        }
    }
}

/// Normalized pointer position, each axis in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Keys the widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Enter,
    Escape,
    Tab,
    Char(char),
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "Enter" => Self::Enter,
            "Escape" => Self::Escape,
            "Tab" => Self::Tab,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }

    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }
}

/// A value reported by a widget, tagged with its phase.
///
/// `Live` fires on every intermediate step of an interaction; `Committed`
/// fires once when the interaction concludes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update<T> {
    Live(T),
    Committed(T),
}

impl<T> Update<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Live(v) | Self::Committed(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Live(v) | Self::Committed(v) => v,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Update<U> {
        match self {
            Self::Live(v) => Update::Live(f(v)),
            Self::Committed(v) => Update::Committed(f(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_clamped_far_outside() {
        let rect = Rect::new(10.0, 20.0, 200.0, 100.0);
        let pos = rect.position_of(-5000.0, 9000.0);
        assert_eq!(pos, PointerPosition { x: 0.0, y: 100.0 });
        let pos = rect.position_of(110.0, 45.0);
        assert_eq!(pos, PointerPosition { x: 50.0, y: 25.0 });
    }

    #[test]
    fn degenerate_rect_maps_to_zero() {
        let rect = Rect::new(0.0, 0.0, 0.0, -3.0);
        assert_eq!(rect.position_of(50.0, 50.0), PointerPosition::default());
    }

    #[test]
    fn dom_keys() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("a"), Key::Char('a'));
        assert_eq!(Key::from_dom_key("Shift"), Key::Other);
        assert!(Key::ArrowDown.is_arrow());
        assert!(!Key::Enter.is_arrow());
    }
}
