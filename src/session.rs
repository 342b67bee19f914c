/// Application state and event handling.
pub mod editor;
/// Pan/zoom/drag state machine.
pub mod interaction;
