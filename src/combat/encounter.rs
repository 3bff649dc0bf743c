//! The two-phase combat loop
//!
//! One missile pass over the full roster in initiative order, then cannon
//! actions drawn from the alive cycle until a side is eliminated or the
//! action cap is hit. Narration lines are the caller-facing record of the
//! encounter; tracing output is observability only.

use rand::Rng;
use serde::Serialize;

use crate::combat::constants::MAX_CANNON_ACTIONS;
use crate::combat::initiative::InitiativeOrder;
use crate::combat::unit::{select_cannon_target, select_missile_target, Unit};
use crate::combat::volley::Volley;
use crate::core::error::Result;

/// One combat encounter over a fixed roster
#[derive(Debug, Clone)]
pub struct Encounter {
    units: Vec<Unit>,
    order: InitiativeOrder,
    max_cannon_actions: usize,
}

/// Post-encounter view of one unit, for external reporting layers
#[derive(Debug, Clone, Serialize)]
pub struct UnitReport {
    pub name: String,
    pub hull_tank: i32,
    pub absorbed_hits: u32,
    pub alive: bool,
}

impl Encounter {
    pub fn new(units: Vec<Unit>) -> Self {
        Self::with_action_cap(units, MAX_CANNON_ACTIONS)
    }

    pub fn with_action_cap(units: Vec<Unit>, max_cannon_actions: usize) -> Self {
        let order = InitiativeOrder::new(&units);
        Self {
            units,
            order,
            max_cannon_actions,
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Run the encounter to a terminal state, returning one narration line
    /// per turn plus death, victory and elimination announcements
    pub fn run(&mut self, rng: &mut impl Rng) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        self.missile_phase(rng, &mut lines)?;
        self.cannon_phase(rng, &mut lines);
        if self.order.is_everybody_dead(&self.units) {
            lines.push("No combatants remain!".to_string());
        }
        Ok(lines)
    }

    /// Exactly one pass over the full roster; dead members are skipped
    /// with a notice
    fn missile_phase(&mut self, rng: &mut impl Rng, lines: &mut Vec<String>) -> Result<()> {
        tracing::info!("Missile phase begins");
        let round: Vec<usize> = self.order.one_round().collect();
        for attacker in round {
            if self.units[attacker].is_dead() {
                lines.push(format!(
                    "Would-be attacker {} is dead!",
                    self.units[attacker]
                ));
                continue;
            }
            let defender = select_missile_target(&self.units, attacker)?;
            let volley = self.units[attacker].missile_volley(rng);
            let mitigated = self.units[defender].mitigate(volley);
            let damage = self.units[defender].absorb(&mitigated);
            tracing::debug!(
                attacker = self.units[attacker].name(),
                defender = self.units[defender].name(),
                damage,
                "missile turn"
            );
            lines.push(combat_turn_text(
                &self.units[attacker],
                &self.units[defender],
                &mitigated,
                damage,
                0,
            ));
        }
        Ok(())
    }

    /// Bounded cannon actions drawn from the alive cycle; running out of
    /// eligible defenders is victory, not an error
    fn cannon_phase(&mut self, rng: &mut impl Rng, lines: &mut Vec<String>) {
        tracing::info!("Cannon phase begins");
        let mut cycle = self.order.cycle_alive();
        for _ in 0..self.max_cannon_actions {
            let Some(attacker) = cycle.next(&self.units) else {
                break;
            };
            let Some(defender) = select_cannon_target(&self.units, attacker) else {
                lines.push(format!(
                    "No defenders remain!  {} is victorious!",
                    self.units[attacker]
                ));
                break;
            };
            let volley = self.units[attacker].cannon_volley(rng);
            let self_mitigated = self.units[attacker].mitigate_self_damage(volley);
            let self_damage = self.units[attacker].absorb_self_damage(&self_mitigated);
            let mitigated = self.units[defender].mitigate(self_mitigated);
            let damage = self.units[defender].absorb(&mitigated);
            tracing::debug!(
                attacker = self.units[attacker].name(),
                defender = self.units[defender].name(),
                damage,
                self_damage,
                "cannon turn"
            );
            lines.push(combat_turn_text(
                &self.units[attacker],
                &self.units[defender],
                &mitigated,
                damage,
                self_damage,
            ));
        }
    }

    /// Summaries for external reporting; nothing here feeds back into the
    /// engine
    pub fn reports(&self) -> Vec<UnitReport> {
        self.units
            .iter()
            .map(|u| UnitReport {
                name: u.name().to_string(),
                hull_tank: u.stats().hull_tank,
                absorbed_hits: u.absorbed_hits(),
                alive: u.is_alive(),
            })
            .collect()
    }
}

/// Narrate one resolved turn
///
/// The volley passed in is the mitigated one; its textual form still shows
/// the original rolls, while the miss check reflects what resolved after
/// mitigation.
fn combat_turn_text(
    attacker: &Unit,
    defender: &Unit,
    volley: &Volley,
    damage: u32,
    self_damage: u32,
) -> String {
    let mut text = if volley.all_hits() == 0 {
        format!("{attacker} attacks {defender} with {volley} and misses!")
    } else {
        format!(
            "{attacker} attacks {defender} with {volley} mitigated to {} inflicting {damage}",
            volley.all_hits()
        )
    };
    if self_damage > 0 {
        text.push_str(&format!(
            " (they also inflict {self_damage} on themselves)"
        ));
    }
    if defender.is_dead() {
        text.push_str(&format!("\n{defender} has been defeated!"));
    }
    if attacker.is_dead() {
        text.push_str(&format!("\nBut {attacker} has destroyed themselves!"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::dice::Die;
    use crate::combat::equipment::Module;
    use crate::core::error::SimError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Targeting 4 makes every rolled tier resolve, so the unit's cannon
    /// damage per volley is deterministic regardless of the dice.
    fn sure_shot(name: &str, pips: u32, dice: usize, initiative: i32, hull_tank: i32) -> Unit {
        Unit::new(
            name,
            3,
            vec![
                Module::cannon_battery(vec![Die::Normal { hits: pips }; dice]),
                Module {
                    targeting: 4,
                    initiative,
                    ..Module::default()
                },
                Module {
                    hull_tank,
                    ..Module::default()
                },
            ],
        )
        .unwrap()
    }

    fn pacifist(name: &str, hull_tank: i32) -> Unit {
        Unit::new(
            name,
            1,
            vec![Module {
                hull_tank,
                ..Module::default()
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_duel_runs_to_elimination() {
        // Ajax acts first and kills in one cannon volley; Brutus never
        // deals damage. Both missile volleys are empty and miss.
        let units = vec![
            sure_shot("Ajax", 3, 2, 5, 10),
            pacifist("Brutus", 4),
        ];
        let mut encounter = Encounter::new(units);
        let lines = encounter.run(&mut rng()).unwrap();

        assert!(lines.iter().any(|l| l.contains("<Brutus> has been defeated!")));
        assert!(lines
            .last()
            .unwrap()
            .contains("<Ajax> is victorious!"));
        assert!(encounter.units()[0].is_alive());
        assert!(encounter.units()[1].is_dead());
    }

    #[test]
    fn test_missile_misses_are_narrated() {
        let units = vec![pacifist("Hulk", 50), pacifist("Wreck", 50)];
        let mut encounter = Encounter::with_action_cap(units, 10);
        let lines = encounter.run(&mut rng()).unwrap();
        // Two missile misses plus ten empty cannon actions, no deaths
        assert_eq!(lines.len(), 12);
        assert!(lines[0].contains("misses!"));
        assert!(lines.iter().all(|l| !l.contains("defeated")));
    }

    #[test]
    fn test_action_cap_bounds_the_cannon_phase() {
        let units = vec![pacifist("Stone", 50), pacifist("Wall", 50)];
        let mut encounter = Encounter::with_action_cap(units, 7);
        let lines = encounter.run(&mut rng()).unwrap();
        assert_eq!(lines.len(), 2 + 7);
        assert!(encounter.units().iter().all(Unit::is_alive));
    }

    #[test]
    fn test_lone_unit_is_a_missile_precondition_violation() {
        let mut encounter = Encounter::new(vec![pacifist("Hermit", 3)]);
        assert!(matches!(
            encounter.run(&mut rng()),
            Err(SimError::NoEligibleTarget(_))
        ));
    }

    #[test]
    fn test_dead_attacker_skip_notice() {
        // Zeno strikes first in the missile phase and kills Pyrrho, whose
        // turn then produces a skip notice.
        let mut zeno = sure_shot("Zeno", 3, 2, 9, 10);
        zeno.slot_module(0, Module::missile_rack(vec![Die::Normal { hits: 6 }]))
            .unwrap();
        let units = vec![zeno, pacifist("Pyrrho", 2)];
        let mut encounter = Encounter::new(units);
        let lines = encounter.run(&mut rng()).unwrap();
        assert!(lines[0].contains("<Pyrrho> has been defeated!"));
        assert!(lines[1].contains("Would-be attacker <Pyrrho> is dead!"));
        assert!(lines.last().unwrap().contains("<Zeno> is victorious!"));
    }

    #[test]
    fn test_mutual_destruction_reports_elimination() {
        // Two glass cannons with guaranteed damage; whoever the cycle
        // reaches first kills the other, then stands alone and wins. With
        // hull 0 a single resolved hit kills, so at most one survivor.
        let units = vec![
            sure_shot("Flint", 1, 1, 2, 0),
            sure_shot("Tinder", 1, 1, 1, 0),
        ];
        let mut encounter = Encounter::new(units);
        let lines = encounter.run(&mut rng()).unwrap();
        let dead: usize = encounter.units().iter().filter(|u| u.is_dead()).count();
        assert_eq!(dead, 1);
        assert!(lines.iter().any(|l| l.contains("has been defeated!")));
    }

    #[test]
    fn test_reports_expose_stats_and_liveness() {
        let units = vec![pacifist("Ledger", 4), pacifist("Scribe", 6)];
        let encounter = Encounter::new(units);
        let reports = encounter.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "Ledger");
        assert_eq!(reports[0].hull_tank, 4);
        assert!(reports.iter().all(|r| r.alive));
    }
}
