/// PNG export.
pub mod png;
