// tests/transition_guards.rs

use rollsim::errors::RollsimError;
use rollsim::fleet::Machine;
use rollsim::types::{MachineId, MachineState, Transition};

const ALL_TRANSITIONS: [Transition; 3] = [
    Transition::StartUpdating,
    Transition::DoUpdateWork,
    Transition::MoveToProduction,
];

/// A machine parked in `state`, with enough countdown left that one unit of
/// work does not finish it.
fn machine_in(state: MachineState) -> Machine {
    let mut m = Machine::new(MachineId(7), 5);
    let path: &[Transition] = match state {
        MachineState::Old => &[],
        MachineState::Updating => &[Transition::StartUpdating],
        MachineState::Updated => &[
            Transition::StartUpdating,
            Transition::DoUpdateWork,
            Transition::DoUpdateWork,
            Transition::DoUpdateWork,
            Transition::DoUpdateWork,
            Transition::DoUpdateWork,
        ],
        MachineState::New => &[
            Transition::StartUpdating,
            Transition::DoUpdateWork,
            Transition::DoUpdateWork,
            Transition::DoUpdateWork,
            Transition::DoUpdateWork,
            Transition::DoUpdateWork,
            Transition::MoveToProduction,
        ],
    };
    for t in path {
        m.apply(*t).expect("setup path must be valid");
    }
    assert_eq!(m.state(), state);
    m
}

#[test]
fn every_transition_from_the_wrong_state_is_rejected() {
    let states = [
        MachineState::Old,
        MachineState::Updating,
        MachineState::Updated,
        MachineState::New,
    ];

    for state in states {
        for transition in ALL_TRANSITIONS {
            let mut m = machine_in(state);
            let result = m.apply(transition);

            if transition.required_state() == state {
                assert!(result.is_ok(), "{transition} from {state} should succeed");
                continue;
            }

            match result {
                Err(RollsimError::InvalidTransition {
                    machine,
                    operation,
                    state: seen,
                }) => {
                    assert_eq!(machine, MachineId(7));
                    assert_eq!(operation, transition);
                    assert_eq!(seen, state);
                }
                other => panic!("{transition} from {state}: expected InvalidTransition, got {other:?}"),
            }
            // Rejected transitions leave the machine untouched.
            assert_eq!(m.state(), state);
        }
    }
}

#[test]
fn invalid_transition_message_names_state_and_operation() {
    let mut m = machine_in(MachineState::Updated);
    let err = m.start_updating().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("machine-7"), "{msg}");
    assert!(msg.contains("start_updating"), "{msg}");
    assert!(msg.contains("updated"), "{msg}");
}

#[test]
fn named_operations_match_apply() {
    let mut m = machine_in(MachineState::Old);
    assert!(m.do_update_work().is_err());
    assert!(m.move_to_production().is_err());
    assert!(m.start_updating().is_ok());
    assert!(m.start_updating().is_err());
}
