/// Rendered frame readback.
pub mod backend;
/// CPU composite renderer.
pub mod cpu;
