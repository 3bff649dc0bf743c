pub mod constants;
pub mod dice;
pub mod encounter;
pub mod equipment;
pub mod initiative;
pub mod stats;
pub mod unit;
pub mod volley;

pub use dice::{Die, RollOutcome};
pub use encounter::Encounter;
pub use equipment::Module;
pub use initiative::{AliveCycle, InitiativeOrder};
pub use stats::{Stat, StatVector};
pub use unit::Unit;
pub use volley::{BandKey, Volley};
