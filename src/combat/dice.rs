//! Weapon dice
//!
//! A die is the atomic randomness source of the engine: one roll produces
//! one outcome. There are exactly two kinds of die; a third kind is a
//! compile error, not a runtime surprise.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::NORMAL_DIE_FACES;

/// The six fixed faces of a rift die as (hits, self_hits) pairs
const RIFT_FACES: [(u32, u32); 6] = [(1, 0), (2, 0), (3, 1), (0, 1), (0, 0), (0, 0)];

/// A weapon die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Die {
    /// Rolls its fixed hit count at a uniformly sampled accuracy tier.
    ///
    /// The top face is remapped to "no accuracy requirement": one face in
    /// six hits regardless of any later accuracy shift.
    Normal { hits: u32 },

    /// Rolls one of six fixed (hits, self_hits) faces, always unconditional.
    /// The self hits land on the unit firing the die.
    Rift,
}

/// The outcome of rolling a single die
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    pub hits: u32,
    pub self_hits: u32,
    /// Accuracy tier the hits landed at; `None` means unconditional
    pub accuracy: Option<i32>,
}

impl Die {
    /// Roll this die once, consuming randomness from `rng`
    pub fn roll(&self, rng: &mut impl Rng) -> RollOutcome {
        match self {
            Die::Normal { hits } => {
                let face = rng.gen_range(1..=NORMAL_DIE_FACES);
                let accuracy = if face == NORMAL_DIE_FACES {
                    None
                } else {
                    Some(face)
                };
                RollOutcome {
                    hits: *hits,
                    self_hits: 0,
                    accuracy,
                }
            }
            Die::Rift => {
                let (hits, self_hits) = RIFT_FACES[rng.gen_range(0..RIFT_FACES.len())];
                RollOutcome {
                    hits,
                    self_hits,
                    accuracy: None,
                }
            }
        }
    }
}
