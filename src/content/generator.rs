//! Weighted random equipment generation
//!
//! Produces flavor content for demo encounters: modules with weighted
//! effect rolls and units assembled by repeatedly trying random refits,
//! discarding any the power budget rejects.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::combat::dice::Die;
use crate::combat::equipment::Module;
use crate::combat::unit::Unit;
use crate::core::error::Result;

/// Random refit attempts made when assembling a unit
const REFIT_ATTEMPTS: usize = 300;

/// Rift dice have no pip count; price one as this many pips for the power
/// cost estimate
const RIFT_DIE_VALUE: i32 = 5;

/// Pick a value from `(weight, value)` pairs by cumulative weight
///
/// The slice must be non-empty.
fn weighted<T: Copy>(rng: &mut impl Rng, choices: &[(u32, T)]) -> T {
    let total: u32 = choices.iter().map(|(w, _)| w).sum();
    let mut pick = rng.gen_range(0..total);
    for &(weight, value) in &choices[..choices.len() - 1] {
        if pick < weight {
            return value;
        }
        pick -= weight;
    }
    choices[choices.len() - 1].1
}

/// Properties a random module can grant, drawn from a weighted pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    MissileDice,
    CannonDice,
    HullTank,
    Mitigation,
    Targeting,
    Power,
    Speed,
    Initiative,
}

/// The draw pool; repetition encodes the weights
const EFFECT_POOL: [Effect; 17] = [
    Effect::MissileDice,
    Effect::MissileDice,
    Effect::CannonDice,
    Effect::CannonDice,
    Effect::CannonDice,
    Effect::HullTank,
    Effect::HullTank,
    Effect::Mitigation,
    Effect::Mitigation,
    Effect::Targeting,
    Effect::Power,
    Effect::Power,
    Effect::Power,
    Effect::Power,
    Effect::Speed,
    Effect::Initiative,
    Effect::Initiative,
];

/// Generate a homogeneous list of dice: weighted count, pips and kind
pub fn random_dice(rng: &mut impl Rng) -> Vec<Die> {
    let num_dice = weighted(rng, &[(15, 1), (8, 2), (2, 3), (1, 4)]);
    let num_pips = weighted(rng, &[(8, 1), (3, 2), (3, 3), (1, 4)]);
    let rift = weighted(rng, &[(10, false), (2, true)]);
    let die = if rift {
        Die::Rift
    } else {
        Die::Normal { hits: num_pips }
    };
    vec![die; num_dice as usize]
}

fn dice_value(dice: &[Die]) -> i32 {
    match dice.first() {
        Some(Die::Rift) => RIFT_DIE_VALUE * dice.len() as i32,
        Some(Die::Normal { hits }) => *hits as i32 * dice.len() as i32,
        None => 0,
    }
}

/// Generate a random module with one to three weighted effects
///
/// A module supplying power never also carries attack dice, and a module
/// that supplies no power pays a power cost proportional to its estimated
/// value.
pub fn random_module(rng: &mut impl Rng) -> Module {
    let num_effects: usize = weighted(rng, &[(10, 1), (3, 2), (1, 3)]);
    let mut pool = EFFECT_POOL.to_vec();
    pool.shuffle(rng);

    let mut module = Module::default();
    for effect in &pool[..num_effects] {
        match effect {
            Effect::MissileDice => module.missile_dice = random_dice(rng),
            Effect::CannonDice => module.cannon_dice = random_dice(rng),
            Effect::Targeting => module.targeting = weighted(rng, &[(10, 1), (5, 2), (1, 3)]),
            Effect::Mitigation => module.mitigation = weighted(rng, &[(10, 1), (5, 2), (1, 3)]),
            Effect::HullTank => module.hull_tank = weighted(rng, &[(10, 1), (5, 2), (1, 3)]),
            Effect::Power => module.power = weighted(rng, &[(3, 1), (10, 2), (5, 3), (1, 4)]),
            Effect::Speed => module.speed = weighted(rng, &[(10, 1), (5, 2), (1, 3)]),
            Effect::Initiative => module.initiative = weighted(rng, &[(10, 1), (5, 2), (1, 3)]),
        }
    }

    // A module can't both supply power and mount weapons
    if module.power > 0 && (!module.missile_dice.is_empty() || !module.cannon_dice.is_empty()) {
        module.power = 0;
    }

    let value_estimate = module.targeting
        + module.mitigation
        + module.hull_tank
        + module.power
        + module.speed
        + module.initiative
        + dice_value(&module.missile_dice)
        + dice_value(&module.cannon_dice);

    module.power_cost = if module.power > 0 {
        0
    } else {
        (f64::from(value_estimate) / 1.5).floor() as i32
    };

    module
}

/// Assemble a random unit: a fixed starter loadout padded to a weighted
/// slot count, then repeated random refits with rejections discarded
pub fn random_unit(name: &str, rng: &mut impl Rng) -> Result<Unit> {
    let num_slots: usize = weighted(rng, &[(10, 5), (5, 8), (2, 10)]);
    let mut modules = vec![
        Module::power_core(3),
        Module::cannon_battery(vec![Die::Normal { hits: 2 }; 2]),
        Module::cannon_battery(vec![Die::Normal { hits: 1 }]),
        Module::cannon_battery(vec![Die::Normal { hits: 1 }]),
    ];
    modules.resize(num_slots, Module::default());
    let mut unit = Unit::new(name, num_slots, modules)?;

    for _ in 0..REFIT_ATTEMPTS {
        let slot = rng.gen_range(0..num_slots);
        let module = random_module(rng);
        // Over-budget or otherwise rejected refits are simply retried
        let _ = unit.slot_module(slot, module);
    }

    tracing::debug!(
        name,
        slots = num_slots,
        power_margin = unit.stats().power_margin(),
        "generated unit"
    );
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_weighted_respects_zero_weight() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let picked = weighted(&mut rng, &[(0, "never"), (5, "always")]);
            assert_eq!(picked, "always");
        }
    }

    #[test]
    fn test_random_dice_are_homogeneous() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..200 {
            let dice = random_dice(&mut rng);
            assert!((1..=4).contains(&dice.len()));
            assert!(dice.iter().all(|d| d == &dice[0]));
            if let Die::Normal { hits } = dice[0] {
                assert!((1..=4).contains(&hits));
            }
        }
    }

    #[test]
    fn test_random_module_power_rules() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let module = random_module(&mut rng);
            if module.power > 0 {
                assert!(module.missile_dice.is_empty());
                assert!(module.cannon_dice.is_empty());
                assert_eq!(module.power_cost, 0);
            }
            assert!(module.power_cost >= 0);
        }
    }

    #[test]
    fn test_random_unit_keeps_power_budget() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for i in 0..50 {
            let unit = random_unit(&format!("Hull-{i}"), &mut rng).unwrap();
            assert!(unit.stats().power_margin() >= 0);
            assert_eq!(unit.modules().len(), unit.num_slots());
            assert!(unit.is_alive());
        }
    }
}
