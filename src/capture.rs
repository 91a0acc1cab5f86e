//! Global pointer listen scope.
//!
//! While a drag is in progress the host must deliver pointer moves and the
//! final release even when the pointer leaves the widget. The picker asks for
//! that scope on pointer-down and always gives it back on pointer-up or
//! pointer-cancel.

/// Host hook for document-level pointer capture.
pub trait PointerCapture {
    /// Start routing all moves of `pointer_id` to the picker.
    fn begin_global_listen(&mut self, pointer_id: i64);

    /// Stop routing moves of `pointer_id`.
    fn end_global_listen(&mut self, pointer_id: i64);
}

/// Capture that does nothing, for hosts that already deliver every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn begin_global_listen(&mut self, _pointer_id: i64) {}

    fn end_global_listen(&mut self, _pointer_id: i64) {}
}

/// Capture that records which pointers currently hold the scope.
///
/// Useful for hosts that need to query state, and in tests.
#[derive(Debug, Clone, Default)]
pub struct CaptureLog {
    active: Vec<i64>,
    begun: usize,
    ended: usize,
}

impl CaptureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn begun(&self) -> usize {
        self.begun
    }

    pub fn ended(&self) -> usize {
        self.ended
    }
}

impl PointerCapture for CaptureLog {
    fn begin_global_listen(&mut self, pointer_id: i64) {
        self.begun += 1;
        if !self.active.contains(&pointer_id) {
            self.active.push(pointer_id);
        }
    }

    fn end_global_listen(&mut self, pointer_id: i64) {
        self.ended += 1;
        self.active.retain(|&id| id != pointer_id);
    }
}
