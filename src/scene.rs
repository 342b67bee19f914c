/// Editor configuration.
pub mod config;
/// Data model shared by the session and the renderer.
pub mod model;
