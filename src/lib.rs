pub mod core;

// Re-export everything from core for ergonomic library use
// Users can write `pipectl::gate` instead of `pipectl::core::gate`
pub use crate::core::*;
