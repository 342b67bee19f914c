/// Arc text layout.
pub mod arc;
