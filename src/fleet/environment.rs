// src/fleet/environment.rs

//! Query and selection facade over the fixed machine pool.

use std::fmt;

use tracing::debug;

use crate::errors::{Result, RollsimError};
use crate::fleet::machine::Machine;
use crate::types::{MachineId, MachineState};

/// Number of machines in each lifecycle state at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetCounts {
    pub old: usize,
    pub updating: usize,
    pub updated: usize,
    pub new: usize,
}

impl FleetCounts {
    pub fn total(&self) -> usize {
        self.old + self.updating + self.updated + self.new
    }

    pub fn all_new(&self) -> bool {
        self.new == self.total()
    }

    fn record(&mut self, state: MachineState) {
        match state {
            MachineState::Old => self.old += 1,
            MachineState::Updating => self.updating += 1,
            MachineState::Updated => self.updated += 1,
            MachineState::New => self.new += 1,
        }
    }
}

impl fmt::Display for FleetCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "old={} updating={} updated={} new={}",
            self.old, self.updating, self.updated, self.new
        )
    }
}

/// The machine pool a simulation runs against.
///
/// Membership and order are fixed at construction. Query methods never
/// mutate; the only mutable access is [`Environment::machine_mut`], which the
/// simulation uses to invoke a transition on a machine it selected.
#[derive(Debug, Clone)]
pub struct Environment {
    machines: Vec<Machine>,
}

impl Environment {
    /// Wrap an existing pool, keeping its order.
    ///
    /// Ids are reassigned to match each machine's position, since selection
    /// and mutable lookup both go by fleet order.
    pub fn new(mut machines: Vec<Machine>) -> Self {
        for (idx, machine) in machines.iter_mut().enumerate() {
            let id = MachineId(idx);
            if machine.id() != id {
                debug!(from = %machine.id(), to = %id, "renumbering machine to its fleet position");
                machine.set_id(id);
            }
        }
        debug!(machines = machines.len(), "environment created");
        Self { machines }
    }

    /// Build a fleet with one machine per countdown, in order.
    pub fn from_delays<I>(delays: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let machines = delays
            .into_iter()
            .enumerate()
            .map(|(idx, delay)| Machine::new(MachineId(idx), delay))
            .collect();
        Self::new(machines)
    }

    /// `count` machines that all share the same countdown.
    pub fn uniform(count: usize, update_delay: u32) -> Self {
        Self::from_delays(std::iter::repeat_n(update_delay, count))
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// The whole fleet, in its fixed order.
    pub fn all_machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn updated_machines(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter().filter(|m| m.is_updated())
    }

    pub fn updating_machines(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter().filter(|m| m.is_updating())
    }

    pub fn new_machines(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter().filter(|m| m.is_new())
    }

    /// Up to `count` machines still in state `Old`, first in fleet order.
    ///
    /// A zero or negative `count` selects nothing. Fewer than `count` ids are
    /// returned when the old pool is smaller than requested.
    pub fn pick_old_servers(&self, count: i64) -> Vec<MachineId> {
        let Ok(count) = usize::try_from(count) else {
            return Vec::new();
        };

        self.machines
            .iter()
            .filter(|m| m.is_old())
            .take(count)
            .map(Machine::id)
            .collect()
    }

    /// Mutable access to a single machine, for applying a transition.
    pub fn machine_mut(&mut self, id: MachineId) -> Result<&mut Machine> {
        self.machines
            .get_mut(id.index())
            .filter(|m| m.id() == id)
            .ok_or(RollsimError::MachineNotFound(id))
    }

    /// Snapshot of how many machines are in each state.
    pub fn counts(&self) -> FleetCounts {
        let mut counts = FleetCounts::default();
        for m in &self.machines {
            counts.record(m.state());
        }
        counts
    }

    /// Current state of every machine, in fleet order.
    pub fn states(&self) -> Vec<MachineState> {
        self.machines.iter().map(Machine::state).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(ms: &[MachineId]) -> Vec<usize> {
        ms.iter().map(|id| id.index()).collect()
    }

    #[test]
    fn pick_old_servers_is_first_n_in_order() {
        let env = Environment::uniform(5, 2);
        assert_eq!(ids(&env.pick_old_servers(3)), vec![0, 1, 2]);
    }

    #[test]
    fn pick_old_servers_skips_machines_that_left_old() {
        let mut env = Environment::uniform(4, 2);
        env.machine_mut(MachineId(0)).unwrap().start_updating().unwrap();
        env.machine_mut(MachineId(2)).unwrap().start_updating().unwrap();

        assert_eq!(ids(&env.pick_old_servers(10)), vec![1, 3]);
    }

    #[test]
    fn pick_old_servers_with_non_positive_count_is_empty() {
        let env = Environment::uniform(3, 1);
        assert!(env.pick_old_servers(0).is_empty());
        assert!(env.pick_old_servers(-4).is_empty());
        assert!(env.pick_old_servers(i64::MIN).is_empty());
    }

    #[test]
    fn filters_partition_the_fleet() {
        let mut env = Environment::uniform(4, 1);
        env.machine_mut(MachineId(1)).unwrap().start_updating().unwrap();
        {
            let m = env.machine_mut(MachineId(2)).unwrap();
            m.start_updating().unwrap();
            m.do_update_work().unwrap();
        }
        {
            let m = env.machine_mut(MachineId(3)).unwrap();
            m.start_updating().unwrap();
            m.do_update_work().unwrap();
            m.move_to_production().unwrap();
        }

        assert_eq!(env.updating_machines().count(), 1);
        assert_eq!(env.updated_machines().count(), 1);
        assert_eq!(env.new_machines().count(), 1);
        assert_eq!(env.all_machines().len(), 4);

        let counts = env.counts();
        assert_eq!(
            counts,
            FleetCounts {
                old: 1,
                updating: 1,
                updated: 1,
                new: 1
            }
        );
        assert_eq!(counts.total(), 4);
        assert!(!counts.all_new());
    }

    #[test]
    fn new_renumbers_machines_by_position() {
        let env = Environment::new(vec![
            Machine::new(MachineId(10), 1),
            Machine::new(MachineId(4), 2),
            Machine::new(MachineId(4), 3),
        ]);

        let assigned: Vec<MachineId> = env.all_machines().iter().map(Machine::id).collect();
        assert_eq!(assigned, vec![MachineId(0), MachineId(1), MachineId(2)]);
        let delays: Vec<u32> = env
            .all_machines()
            .iter()
            .map(Machine::remaining_update_ticks)
            .collect();
        assert_eq!(delays, vec![1, 2, 3]);
        assert_eq!(ids(&env.pick_old_servers(2)), vec![0, 1]);
    }

    #[test]
    fn machine_mut_rejects_unknown_id() {
        let mut env = Environment::uniform(2, 1);
        assert!(matches!(
            env.machine_mut(MachineId(7)),
            Err(RollsimError::MachineNotFound(MachineId(7)))
        ));
    }

    #[test]
    fn empty_fleet_counts_as_all_new() {
        let env = Environment::uniform(0, 2);
        assert!(env.is_empty());
        assert!(env.counts().all_new());
    }
}
