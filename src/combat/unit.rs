//! Combat units
//!
//! A unit owns a fixed number of module slots and derives everything else:
//! its stat aggregate is the sum over slotted modules, its dice pools the
//! concatenation in slot order. The only mutable state is the running
//! count of absorbed hits and the module list itself.

use std::fmt;

use rand::Rng;

use crate::combat::dice::Die;
use crate::combat::equipment::Module;
use crate::combat::stats::StatVector;
use crate::combat::volley::Volley;
use crate::core::error::{Result, SimError};

/// An armed unit in an encounter
#[derive(Debug, Clone)]
pub struct Unit {
    name: String,
    num_slots: usize,
    modules: Vec<Module>,
    absorbed_hits: u32,
}

impl Unit {
    /// Build a unit from its starting modules
    ///
    /// Rejects rosters with more starting modules than slots; that is a
    /// construction error, not something to recover from.
    pub fn new(name: impl Into<String>, num_slots: usize, modules: Vec<Module>) -> Result<Self> {
        let name = name.into();
        if modules.len() > num_slots {
            return Err(SimError::TooManyModules {
                unit: name,
                modules: modules.len(),
                slots: num_slots,
            });
        }
        Ok(Self {
            name,
            num_slots,
            modules,
            absorbed_hits: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn absorbed_hits(&self) -> u32 {
        self.absorbed_hits
    }

    /// Aggregate stats: pointwise sum over all slotted modules
    pub fn stats(&self) -> StatVector {
        self.modules.iter().map(Module::stats).sum()
    }

    /// All missile dice, concatenated in slot order
    pub fn missile_dice(&self) -> Vec<Die> {
        self.modules
            .iter()
            .flat_map(|m| m.missile_dice.iter().copied())
            .collect()
    }

    /// All cannon dice, concatenated in slot order
    pub fn cannon_dice(&self) -> Vec<Die> {
        self.modules
            .iter()
            .flat_map(|m| m.cannon_dice.iter().copied())
            .collect()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Dead iff absorbed hits strictly exceed hull tank; a unit sitting
    /// exactly at its hull tank is still alive.
    pub fn is_dead(&self) -> bool {
        i64::from(self.absorbed_hits) > i64::from(self.stats().hull_tank)
    }

    /// Roll this unit's missile dice and apply its targeting bonus
    pub fn missile_volley(&self, rng: &mut impl Rng) -> Volley {
        Volley::from_dice(rng, &self.missile_dice()).add_accuracy(self.stats().targeting)
    }

    /// Roll this unit's cannon dice and apply its targeting bonus
    pub fn cannon_volley(&self, rng: &mut impl Rng) -> Volley {
        Volley::from_dice(rng, &self.cannon_dice()).add_accuracy(self.stats().targeting)
    }

    /// Defender-side reduction: shift the incoming volley down by this
    /// unit's mitigation stat
    pub fn mitigate(&self, volley: Volley) -> Volley {
        volley.add_accuracy(-self.stats().mitigation)
    }

    // TODO: self-damage mitigation doesn't exist yet
    pub fn mitigate_self_damage(&self, volley: Volley) -> Volley {
        volley
    }

    /// Take the volley's resolved hits as damage; returns the amount
    pub fn absorb(&mut self, volley: &Volley) -> u32 {
        let hits = volley.all_hits();
        self.absorbed_hits += hits;
        hits
    }

    /// Take the volley's self hits as damage; returns the amount
    pub fn absorb_self_damage(&mut self, volley: &Volley) -> u32 {
        let hits = volley.self_hits();
        self.absorbed_hits += hits;
        hits
    }

    /// Reset absorbed damage, e.g. between encounters
    pub fn clear_hits(&mut self) {
        self.absorbed_hits = 0;
    }

    /// Replace the module at `slot`
    ///
    /// Rejects without mutating if the slot is out of range or if the
    /// replacement would drive the aggregate power margin negative. The
    /// budget is enforced at assignment time, not continuously.
    pub fn slot_module(&mut self, slot: usize, module: Module) -> Result<()> {
        if slot >= self.num_slots {
            return Err(SimError::InvalidSlot(slot));
        }
        let current = self
            .modules
            .get(slot)
            .ok_or(SimError::InvalidSlot(slot))?;

        let margin = self.stats().power_margin() - current.stats().power_margin()
            + module.stats().power_margin();
        if margin < 0 {
            return Err(SimError::PowerBudgetExceeded {
                unit: self.name.clone(),
                module: Box::new(module),
            });
        }

        self.modules[slot] = module;
        Ok(())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name)
    }
}

/// Pick the best target among living candidates, excluding the attacker:
/// lowest hull tank first, then the most dice of the relevant kind. The
/// first maximal candidate in roster order wins full ties.
fn best_target(units: &[Unit], attacker: usize, dice_count: impl Fn(&Unit) -> usize) -> Option<usize> {
    let mut best: Option<(usize, (i32, usize))> = None;
    for (i, unit) in units.iter().enumerate() {
        if i == attacker || unit.is_dead() {
            continue;
        }
        let key = (-unit.stats().hull_tank, dice_count(unit));
        match best {
            Some((_, best_key)) if key <= best_key => {}
            _ => best = Some((i, key)),
        }
    }
    best.map(|(i, _)| i)
}

/// Select a missile target for `attacker`
///
/// Missile combat requires at least one other living unit; the caller
/// guarantees that, so an empty field is a precondition violation.
pub fn select_missile_target(units: &[Unit], attacker: usize) -> Result<usize> {
    best_target(units, attacker, |u| u.missile_dice().len())
        .ok_or_else(|| SimError::NoEligibleTarget(units[attacker].name().to_string()))
}

/// Select a cannon target for `attacker`; `None` means nobody is left to
/// shoot at and the cannon phase should end
pub fn select_cannon_target(units: &[Unit], attacker: usize) -> Option<usize> {
    best_target(units, attacker, |u| u.cannon_dice().len())
}
