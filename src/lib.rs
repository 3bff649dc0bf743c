//! Rift Armada - Turn-Based Fleet Combat Simulator

pub mod combat;
pub mod content;
pub mod core;
