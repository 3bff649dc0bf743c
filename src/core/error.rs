use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Not a valid slot index: {0}")]
    InvalidSlot(usize),

    #[error("Module exceeds power budget of {unit}: {module:?}")]
    PowerBudgetExceeded {
        unit: String,
        module: Box<crate::combat::equipment::Module>,
    },

    #[error("Number of modules ({modules}) exceeds number of slots ({slots}) on {unit}")]
    TooManyModules {
        unit: String,
        modules: usize,
        slots: usize,
    },

    #[error("No eligible missile target for {0}")]
    NoEligibleTarget(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
