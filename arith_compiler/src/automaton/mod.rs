//! Deterministic finite automata over single characters
//!
//! Tables are built once through [`Automaton::add_state`] and
//! [`Automaton::add_transition`], then only queried. Construction mistakes
//! (second start state, duplicate ids, dangling or nondeterministic
//! transitions) are reported as [`AutomatonError`].

pub mod dfa;
pub mod error;
pub mod patterns;

pub use dfa::{Automaton, AutomatonCursor, State, StateId};
pub use error::{AutomatonError, AutomatonResult};

/// Check that every automaton error code is registered
pub fn init_automaton_logging() -> Result<(), String> {
    use crate::logging::codes::{automaton, ensure_registered};

    ensure_registered(
        "Automaton",
        &[
            automaton::DUPLICATE_START_STATE,
            automaton::DUPLICATE_STATE,
            automaton::UNKNOWN_STATE,
            automaton::NONDETERMINISTIC_TRANSITION,
            automaton::MISSING_START_STATE,
        ],
    )
}
