//! Equipment modules
//!
//! A module is an immutable value object: dice it contributes to volleys
//! plus flat attribute contributions. Slotting a new module replaces the
//! reference on the unit, never mutates a module in place.

use serde::{Deserialize, Serialize};

use crate::combat::dice::Die;
use crate::combat::stats::StatVector;

/// A piece of equipment filling one unit slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub missile_dice: Vec<Die>,
    pub cannon_dice: Vec<Die>,
    pub targeting: i32,
    pub mitigation: i32,
    pub hull_tank: i32,
    pub power: i32,
    pub speed: i32,
    pub initiative: i32,
    pub power_cost: i32,
}

impl Module {
    /// Materialize this module's attribute contributions
    pub fn stats(&self) -> StatVector {
        StatVector {
            targeting: self.targeting,
            mitigation: self.mitigation,
            hull_tank: self.hull_tank,
            power: self.power,
            speed: self.speed,
            initiative: self.initiative,
            power_cost: self.power_cost,
        }
    }

    /// Reactor module: supplies power, nothing else
    pub fn power_core(power: i32) -> Self {
        Self {
            power,
            ..Self::default()
        }
    }

    /// Battery module: cannon dice only
    pub fn cannon_battery(dice: Vec<Die>) -> Self {
        Self {
            cannon_dice: dice,
            ..Self::default()
        }
    }

    /// Launcher module: missile dice only
    pub fn missile_rack(dice: Vec<Die>) -> Self {
        Self {
            missile_dice: dice,
            ..Self::default()
        }
    }
}
