//! One-dimensional hue selector.
//!
//! The track maps linearly onto `[0, HUE_MAX]` degrees and clamps at both
//! ends; it never wraps.

use float_cmp::approx_eq;

use crate::pointer::{Key, PointerEvent, Rect, Update};

/// Largest hue the slider can reach.
pub const HUE_MAX: f64 = 359.0;

/// Degrees per arrow key press.
pub const HUE_STEP: f64 = 1.0;

/// Hue for a horizontal track percentage.
pub fn hue_from_percent(percent: f64) -> f64 {
    (percent.clamp(0.0, 100.0) * HUE_MAX / 100.0).clamp(0.0, HUE_MAX)
}

/// Thumb `left` offset, in percent, for a hue.
pub fn thumb_percent(hue: f64) -> f64 {
    hue.clamp(0.0, HUE_MAX) / HUE_MAX * 100.0
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    pointer_id: i64,
    rect: Rect,
    last: f64,
}

/// Interaction state of the hue slider.
#[derive(Debug, Clone, Default)]
pub struct HueSlider {
    drag: Option<Drag>,
    key_down: bool,
}

impl HueSlider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_pointer(&self) -> Option<i64> {
        self.drag.map(|d| d.pointer_id)
    }

    fn hue_at(rect: &Rect, event: PointerEvent) -> f64 {
        hue_from_percent(rect.position_of(event.client_x, event.client_y).x)
    }

    pub fn pointer_down(&mut self, event: PointerEvent, rect: Rect) -> Update<f64> {
        let hue = Self::hue_at(&rect, event);
        self.drag = Some(Drag {
            pointer_id: event.pointer_id,
            rect,
            last: hue,
        });
        Update::Live(hue)
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<Update<f64>> {
        let drag = self.drag.as_mut().filter(|d| d.pointer_id == event.pointer_id)?;
        drag.last = Self::hue_at(&drag.rect, event);
        Some(Update::Live(drag.last))
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> Option<Update<f64>> {
        let drag = match self.drag {
            Some(d) if d.pointer_id == event.pointer_id => d,
            _ => return None,
        };
        self.drag = None;
        Some(Update::Committed(Self::hue_at(&drag.rect, event)))
    }

    pub fn pointer_cancel(&mut self) -> Option<Update<f64>> {
        self.drag.take().map(|d| Update::Committed(d.last))
    }

    /// Left/Down decrease, Right/Up increase, Home/End jump to the ends.
    pub fn key_down(&mut self, key: Key, current: f64) -> Option<Update<f64>> {
        let next = match key {
            Key::ArrowLeft | Key::ArrowDown => current - HUE_STEP,
            Key::ArrowRight | Key::ArrowUp => current + HUE_STEP,
            Key::Home => 0.0,
            Key::End => HUE_MAX,
            _ => return None,
        };
        self.key_down = true;

        let next = next.clamp(0.0, HUE_MAX);
        (!approx_eq!(f64, next, current, ulps = 2)).then_some(Update::Live(next))
    }

    pub fn key_up(&mut self, key: Key, current: f64) -> Option<Update<f64>> {
        let handled = key.is_arrow() || matches!(key, Key::Home | Key::End);
        if !handled || !self.key_down {
            return None;
        }
        self.key_down = false;
        Some(Update::Committed(current))
    }
}
