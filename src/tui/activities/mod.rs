//! Activity modules for the TUI.

pub mod main;
pub mod markup_preview;

pub use main::MainActivity;
pub use main::Msg;
pub use markup_preview::MarkupPreviewActivity;
