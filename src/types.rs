// src/types.rs

//! Small shared types used across the fleet and engine modules.

use std::fmt;

/// Position of a machine in the fleet.
///
/// Ids are assigned at construction in fleet order (`0..n`) and never change,
/// since the fleet has fixed membership for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MachineId(pub usize);

impl MachineId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "machine-{}", self.0)
    }
}

/// Lifecycle state of a machine.
///
/// The only permitted path is `Old -> Updating -> Updated -> New`.
/// `New` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachineState {
    /// Still running the previous version. Initial state.
    Old,
    /// Update in progress; counting down its remaining update ticks.
    Updating,
    /// Update finished, waiting to be moved into production.
    Updated,
    /// Serving the new version.
    New,
}

impl MachineState {
    /// Position along the lifecycle path (`Old` = 0 .. `New` = 3).
    ///
    /// States never move to a lower rank.
    pub fn rank(self) -> u8 {
        match self {
            MachineState::Old => 0,
            MachineState::Updating => 1,
            MachineState::Updated => 2,
            MachineState::New => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MachineState::Old => "old",
            MachineState::Updating => "updating",
            MachineState::Updated => "updated",
            MachineState::New => "new",
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transition operations a machine accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// `Old -> Updating`.
    StartUpdating,
    /// One unit of update work while `Updating`; may finish into `Updated`.
    DoUpdateWork,
    /// `Updated -> New`.
    MoveToProduction,
}

impl Transition {
    /// The only state this operation may be invoked from.
    pub fn required_state(self) -> MachineState {
        match self {
            Transition::StartUpdating => MachineState::Old,
            Transition::DoUpdateWork => MachineState::Updating,
            Transition::MoveToProduction => MachineState::Updated,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Transition::StartUpdating => "start_updating",
            Transition::DoUpdateWork => "do_update_work",
            Transition::MoveToProduction => "move_to_production",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
