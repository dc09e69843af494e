//! Client-side preview sessions: repaint scheduling and export.

pub mod preview;
