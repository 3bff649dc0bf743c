//! Unit and module attributes
//!
//! The attribute set is closed, so stats are a fixed-field record with a
//! defined zero and pointwise addition rather than an open dictionary.
//! Module contributions and unit aggregates use the same type.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Names of the recognized attributes, for lookup-style access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Targeting,
    Mitigation,
    HullTank,
    Power,
    Speed,
    Initiative,
    PowerCost,
}

/// Additive attribute vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatVector {
    /// Attacker-side accuracy bonus (shifts outgoing bands up)
    pub targeting: i32,
    /// Defender-side accuracy penalty (shifts incoming bands down)
    pub mitigation: i32,
    /// Absorbed hits a unit survives; one more kills it
    pub hull_tank: i32,
    /// Power budget supplied
    pub power: i32,
    pub speed: i32,
    /// Turn order priority, higher acts first
    pub initiative: i32,
    /// Power budget consumed
    pub power_cost: i32,
}

impl StatVector {
    pub const ZERO: Self = Self {
        targeting: 0,
        mitigation: 0,
        hull_tank: 0,
        power: 0,
        speed: 0,
        initiative: 0,
        power_cost: 0,
    };

    /// Lookup by attribute name
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Targeting => self.targeting,
            Stat::Mitigation => self.mitigation,
            Stat::HullTank => self.hull_tank,
            Stat::Power => self.power,
            Stat::Speed => self.speed,
            Stat::Initiative => self.initiative,
            Stat::PowerCost => self.power_cost,
        }
    }

    /// Net power margin: supplied minus consumed
    pub fn power_margin(&self) -> i32 {
        self.power - self.power_cost
    }
}

impl Add for StatVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            targeting: self.targeting + other.targeting,
            mitigation: self.mitigation + other.mitigation,
            hull_tank: self.hull_tank + other.hull_tank,
            power: self.power + other.power,
            speed: self.speed + other.speed,
            initiative: self.initiative + other.initiative,
            power_cost: self.power_cost + other.power_cost,
        }
    }
}

impl Sum for StatVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
