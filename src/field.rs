//! Two-dimensional saturation/brightness selector.
//!
//! The horizontal axis is HSV saturation, the vertical axis is HSV value with
//! 100% at the top. The field never touches hue; the container keeps it.

use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};

use crate::pointer::{Key, PointerEvent, PointerPosition, Rect, Update};

/// Step applied per arrow key press, in percent.
pub const FIELD_STEP: f64 = 1.0;

/// Saturation and value of the field thumb, both in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldPosition {
    pub saturation: f64,
    pub value: f64,
}

impl FieldPosition {
    pub fn new(saturation: f64, value: f64) -> Self {
        Self {
            saturation: saturation.clamp(0.0, 100.0),
            value: value.clamp(0.0, 100.0),
        }
    }

    fn from_pointer(pos: PointerPosition) -> Self {
        Self::new(pos.x, 100.0 - pos.y)
    }

    /// Horizontal thumb offset, percent from the left edge.
    pub fn left(&self) -> f64 {
        self.saturation
    }

    /// Vertical thumb offset, percent from the top edge.
    pub fn top(&self) -> f64 {
        100.0 - self.value
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    pointer_id: i64,
    rect: Rect,
    last: FieldPosition,
}

/// Interaction state of the color field.
///
/// Holds only what an interaction in progress needs: the drag rectangle and
/// whether an arrow key is down. The position itself is passed in by the
/// owner on every call.
#[derive(Debug, Clone, Default)]
pub struct ColorField {
    drag: Option<Drag>,
    key_down: bool,
}

impl ColorField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer id of the drag in progress.
    pub fn drag_pointer(&self) -> Option<i64> {
        self.drag.map(|d| d.pointer_id)
    }

    /// Begin a drag. Reports the pressed position as a live update.
    pub fn pointer_down(&mut self, event: PointerEvent, rect: Rect) -> Update<FieldPosition> {
        let position = FieldPosition::from_pointer(rect.position_of(event.client_x, event.client_y));
        self.drag = Some(Drag {
            pointer_id: event.pointer_id,
            rect,
            last: position,
        });
        Update::Live(position)
    }

    /// Continue a drag. `None` when no drag is active for this pointer.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Option<Update<FieldPosition>> {
        let drag = self.drag.as_mut().filter(|d| d.pointer_id == event.pointer_id)?;
        let position =
            FieldPosition::from_pointer(drag.rect.position_of(event.client_x, event.client_y));
        drag.last = position;
        Some(Update::Live(position))
    }

    /// End a drag at the release position with one committed update.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Option<Update<FieldPosition>> {
        let drag = match self.drag {
            Some(d) if d.pointer_id == event.pointer_id => d,
            _ => return None,
        };
        self.drag = None;
        let position =
            FieldPosition::from_pointer(drag.rect.position_of(event.client_x, event.client_y));
        Some(Update::Committed(position))
    }

    /// Abort a drag, committing the last live position.
    pub fn pointer_cancel(&mut self) -> Option<Update<FieldPosition>> {
        self.drag.take().map(|d| Update::Committed(d.last))
    }

    /// Arrow keys move the thumb by [`FIELD_STEP`]. Presses that would leave
    /// the field are absorbed and report nothing.
    pub fn key_down(&mut self, key: Key, current: FieldPosition) -> Option<Update<FieldPosition>> {
        let (ds, dv) = match key {
            Key::ArrowLeft => (-FIELD_STEP, 0.0),
            Key::ArrowRight => (FIELD_STEP, 0.0),
            Key::ArrowUp => (0.0, FIELD_STEP),
            Key::ArrowDown => (0.0, -FIELD_STEP),
            _ => return None,
        };
        self.key_down = true;

        let next = FieldPosition::new(current.saturation + ds, current.value + dv);
        let unchanged = approx_eq!(f64, next.saturation, current.saturation, ulps = 2)
            && approx_eq!(f64, next.value, current.value, ulps = 2);
        (!unchanged).then_some(Update::Live(next))
    }

    /// Releasing an arrow key after at least one press commits the current
    /// position.
    pub fn key_up(&mut self, key: Key, current: FieldPosition) -> Option<Update<FieldPosition>> {
        if !key.is_arrow() || !self.key_down {
            return None;
        }
        self.key_down = false;
        Some(Update::Committed(current))
    }
}
