pub mod config;
pub mod error;

pub use config::EncounterConfig;
pub use error::{Result, SimError};
