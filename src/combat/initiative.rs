//! Initiative scheduling
//!
//! The order is computed once per encounter from the full roster and never
//! re-sorted; deaths are handled by skipping, not by rebuilding. All
//! iteration primitives hand out roster indices so the encounter loop can
//! mutate units between turns.

use crate::combat::unit::Unit;

/// Turn order over a roster, sorted by descending aggregate initiative
///
/// The sort is stable: ties keep their original roster order.
#[derive(Debug, Clone)]
pub struct InitiativeOrder {
    order: Vec<usize>,
}

impl InitiativeOrder {
    pub fn new(units: &[Unit]) -> Self {
        let mut order: Vec<usize> = (0..units.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(units[i].stats().initiative));
        Self { order }
    }

    /// One forward pass over the full roster, dead units included
    ///
    /// Callers are responsible for skipping dead entries.
    pub fn one_round(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    /// One forward pass over the currently living units
    ///
    /// Filters freshly on every call, so deaths since construction are
    /// reflected immediately.
    pub fn alive<'a>(&'a self, units: &'a [Unit]) -> impl Iterator<Item = usize> + 'a {
        self.order.iter().copied().filter(|&i| units[i].is_alive())
    }

    pub fn is_everybody_dead(&self, units: &[Unit]) -> bool {
        self.order.iter().all(|&i| units[i].is_dead())
    }

    /// An explicit cursor cycling over living units indefinitely
    pub fn cycle_alive(&self) -> AliveCycle {
        AliveCycle {
            order: self.order.clone(),
            pos: 0,
        }
    }
}

/// Cursor over the initiative order that skips the dead and wraps around
///
/// Liveness is re-checked on every step, so a unit that dies mid-cycle is
/// excluded from the very next step onward. Yields `None` once every unit
/// is dead; the encounter loop checks that before each individual turn.
#[derive(Debug, Clone)]
pub struct AliveCycle {
    order: Vec<usize>,
    pos: usize,
}

impl AliveCycle {
    pub fn next(&mut self, units: &[Unit]) -> Option<usize> {
        for _ in 0..self.order.len() {
            let idx = self.order[self.pos];
            self.pos = (self.pos + 1) % self.order.len();
            if units[idx].is_alive() {
                return Some(idx);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::equipment::Module;

    fn unit(name: &str, initiative: i32, hull_tank: i32) -> Unit {
        Unit::new(
            name,
            1,
            vec![Module {
                initiative,
                hull_tank,
                ..Module::default()
            }],
        )
        .unwrap()
    }

    fn kill(unit: &mut Unit) {
        use crate::combat::dice::{Die, RollOutcome};
        use crate::combat::volley::Volley;
        let hull = unit.stats().hull_tank as u32;
        unit.absorb(&Volley::from_rolls(vec![(
            Die::Normal { hits: hull + 1 },
            RollOutcome {
                hits: hull + 1,
                self_hits: 0,
                accuracy: None,
            },
        )]));
        assert!(unit.is_dead());
    }

    #[test]
    fn test_sorted_by_descending_initiative() {
        let units = vec![unit("A", 3, 1), unit("B", 7, 1), unit("C", 1, 1)];
        let order = InitiativeOrder::new(&units);
        let round: Vec<usize> = order.one_round().collect();
        assert_eq!(round, vec![1, 0, 2]);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let units = vec![unit("A", 2, 1), unit("B", 5, 1), unit("C", 2, 1)];
        let order = InitiativeOrder::new(&units);
        let round: Vec<usize> = order.one_round().collect();
        assert_eq!(round, vec![1, 0, 2]);
    }

    #[test]
    fn test_one_round_includes_the_dead() {
        let mut units = vec![unit("A", 3, 0), unit("B", 1, 0)];
        kill(&mut units[0]);
        let order = InitiativeOrder::new(&units);
        assert_eq!(order.one_round().count(), 2);
        let alive: Vec<usize> = order.alive(&units).collect();
        assert_eq!(alive, vec![1]);
    }

    #[test]
    fn test_alive_reflects_later_deaths() {
        let mut units = vec![unit("A", 2, 0), unit("B", 1, 0)];
        let order = InitiativeOrder::new(&units);
        assert_eq!(order.alive(&units).count(), 2);
        kill(&mut units[1]);
        assert_eq!(order.alive(&units).count(), 1);
        assert!(!order.is_everybody_dead(&units));
        kill(&mut units[0]);
        assert!(order.is_everybody_dead(&units));
    }

    #[test]
    fn test_cycle_alive_drops_mid_cycle_deaths() {
        let mut units = vec![unit("A", 5, 0), unit("B", 3, 0)];
        let order = InitiativeOrder::new(&units);
        let mut cycle = order.cycle_alive();

        // First pass visits both in initiative order
        assert_eq!(cycle.next(&units), Some(0));
        assert_eq!(cycle.next(&units), Some(1));

        // After A dies only B is yielded, on every subsequent pass
        kill(&mut units[0]);
        assert_eq!(cycle.next(&units), Some(1));
        assert_eq!(cycle.next(&units), Some(1));

        // Once everybody is dead the cycle terminates
        kill(&mut units[1]);
        assert_eq!(cycle.next(&units), None);
        assert_eq!(cycle.next(&units), None);
    }

    #[test]
    fn test_empty_roster_cycle_terminates() {
        let order = InitiativeOrder::new(&[]);
        assert!(order.is_everybody_dead(&[]));
        assert_eq!(order.cycle_alive().next(&[]), None);
    }
}
