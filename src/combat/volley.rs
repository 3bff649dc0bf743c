//! Volley aggregation and accuracy banding
//!
//! A volley combines the outcomes of rolling every die of one attack into
//! accuracy bands. Bands shift as a whole when targeting bonuses or
//! mitigation penalties apply; hits only resolve into damage from bands at
//! or above the resolution threshold.

use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;

use crate::combat::constants::{MIN_ACCURACY_BAND, RESOLVED_ACCURACY};
use crate::combat::dice::{Die, RollOutcome};

/// Key of one accuracy band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BandKey {
    /// Hits with no accuracy requirement; always resolve
    Unconditional,
    /// Hits the attacker inflicts on themselves
    SelfHits,
    /// Hits requiring at least this tier to resolve (always >= 1)
    Tier(i32),
}

/// The combined result of rolling all dice of one attack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volley {
    rolls: Vec<(Die, RollOutcome)>,
    bands: BTreeMap<BandKey, u32>,
}

impl Volley {
    /// Roll every die once, in order, and combine the outcomes
    pub fn from_dice(rng: &mut impl Rng, dice: &[Die]) -> Self {
        let rolls = dice.iter().map(|die| (*die, die.roll(rng))).collect();
        Self::from_rolls(rolls)
    }

    /// Combine pre-rolled outcomes into a banded volley
    pub fn from_rolls(rolls: Vec<(Die, RollOutcome)>) -> Self {
        let mut bands = BTreeMap::new();
        for (_, outcome) in &rolls {
            *bands.entry(BandKey::SelfHits).or_insert(0) += outcome.self_hits;
            let key = match outcome.accuracy {
                None => BandKey::Unconditional,
                Some(tier) => BandKey::Tier(tier),
            };
            *bands.entry(key).or_insert(0) += outcome.hits;
        }
        Self { rolls, bands }
    }

    /// Shift every tier band's key by `amount`
    ///
    /// Positive amounts (targeting) make hits easier to resolve, negative
    /// amounts (mitigation) harder. A band shifted below the minimum tier
    /// is dropped outright, never folded into the unconditional band.
    /// Unconditional and self-hit bands pass through untouched.
    pub fn add_accuracy(mut self, amount: i32) -> Self {
        let mut shifted = BTreeMap::new();
        for (key, count) in self.bands {
            match key {
                BandKey::Unconditional | BandKey::SelfHits => {
                    shifted.insert(key, count);
                }
                BandKey::Tier(tier) => {
                    let new_tier = tier + amount;
                    if new_tier >= MIN_ACCURACY_BAND {
                        *shifted.entry(BandKey::Tier(new_tier)).or_insert(0) += count;
                    }
                }
            }
        }
        self.bands = shifted;
        self
    }

    /// Unconditional hits plus all tier hits at or above `threshold`
    pub fn hits_at_least_accuracy(&self, threshold: i32) -> u32 {
        self.bands
            .iter()
            .map(|(key, count)| match key {
                BandKey::Unconditional => *count,
                BandKey::Tier(tier) if *tier >= threshold => *count,
                _ => 0,
            })
            .sum()
    }

    /// Hits that actually resolve into damage
    pub fn all_hits(&self) -> u32 {
        self.hits_at_least_accuracy(RESOLVED_ACCURACY)
    }

    /// Hits the attacker inflicts on themselves
    pub fn self_hits(&self) -> u32 {
        self.band(BandKey::SelfHits)
    }

    /// Accumulated count of one band, 0 if absent
    pub fn band(&self, key: BandKey) -> u32 {
        self.bands.get(&key).copied().unwrap_or(0)
    }

    /// The original per-die outcomes, in roll order
    pub fn rolls(&self) -> &[(Die, RollOutcome)] {
        &self.rolls
    }
}

impl fmt::Display for Volley {
    /// One fragment per original roll: `3@2` for 3 hits at tier 2, bare `3`
    /// for unconditional hits. Narration only, never engine state.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (_, outcome)) in self.rolls.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match outcome.accuracy {
                Some(tier) => write!(f, "{}@{}", outcome.hits, tier)?,
                None => write!(f, "{}", outcome.hits)?,
            }
        }
        write!(f, "]")
    }
}
