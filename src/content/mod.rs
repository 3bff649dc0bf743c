pub mod generator;

pub use generator::{random_dice, random_module, random_unit};
