// src/fleet/machine.rs

//! A single simulated server and its deployment lifecycle.

use tracing::trace;

use crate::errors::{Result, RollsimError};
use crate::types::{MachineId, MachineState, Transition};

/// One server moving through `Old -> Updating -> Updated -> New`.
///
/// The countdown models the fact that machines updated in parallel finish at
/// different times. It is only touched while the machine is `Updating`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    id: MachineId,
    state: MachineState,
    remaining_update_ticks: u32,
}

impl Machine {
    /// Create a machine in state `Old` that needs `update_delay` units of
    /// update work before it becomes `Updated`.
    pub fn new(id: MachineId, update_delay: u32) -> Self {
        Self {
            id,
            state: MachineState::Old,
            remaining_update_ticks: update_delay,
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: MachineId) {
        self.id = id;
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn remaining_update_ticks(&self) -> u32 {
        self.remaining_update_ticks
    }

    pub fn is_old(&self) -> bool {
        self.state == MachineState::Old
    }

    pub fn is_updating(&self) -> bool {
        self.state == MachineState::Updating
    }

    pub fn is_updated(&self) -> bool {
        self.state == MachineState::Updated
    }

    pub fn is_new(&self) -> bool {
        self.state == MachineState::New
    }

    /// `Old -> Updating`.
    pub fn start_updating(&mut self) -> Result<()> {
        self.apply(Transition::StartUpdating)
    }

    /// Decrement the countdown; once it reaches zero the machine is `Updated`.
    pub fn do_update_work(&mut self) -> Result<()> {
        self.apply(Transition::DoUpdateWork)
    }

    /// `Updated -> New`.
    pub fn move_to_production(&mut self) -> Result<()> {
        self.apply(Transition::MoveToProduction)
    }

    /// Run a transition against the current state.
    ///
    /// Anything other than the three permitted (state, transition) pairs is
    /// rejected with [`RollsimError::InvalidTransition`] and the machine is
    /// left untouched.
    pub fn apply(&mut self, transition: Transition) -> Result<()> {
        let next = match (self.state, transition) {
            (MachineState::Old, Transition::StartUpdating) => MachineState::Updating,
            (MachineState::Updating, Transition::DoUpdateWork) => {
                self.remaining_update_ticks = self.remaining_update_ticks.saturating_sub(1);
                if self.remaining_update_ticks == 0 {
                    MachineState::Updated
                } else {
                    MachineState::Updating
                }
            }
            (MachineState::Updated, Transition::MoveToProduction) => MachineState::New,
            (state, operation) => {
                return Err(RollsimError::InvalidTransition {
                    machine: self.id,
                    operation,
                    state,
                });
            }
        };

        trace!(
            machine = %self.id,
            %transition,
            from = %self.state,
            to = %next,
            remaining = self.remaining_update_ticks,
            "machine transition"
        );
        self.state = next;
        Ok(())
    }
}
