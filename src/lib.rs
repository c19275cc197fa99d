//! Grid Battle - deterministic tick-based battle simulation

pub mod battle;
pub mod core;
