//! Automaton construction errors

use super::StateId;
use crate::logging::{codes, Code};

pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Errors raised while building an automaton table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("State {attempted} cannot be a start state: state {existing} already is")]
    DuplicateStartState {
        existing: StateId,
        attempted: StateId,
    },

    #[error("State {id} is already registered")]
    DuplicateState { id: StateId },

    #[error("Transition references unregistered state {id}")]
    UnknownState { id: StateId },

    #[error(
        "Nondeterministic transition from {from} on {character:?}: already goes to {existing}, cannot also go to {attempted}"
    )]
    NondeterministicTransition {
        from: StateId,
        character: char,
        existing: StateId,
        attempted: StateId,
    },

    #[error("Automaton has no start state")]
    MissingStartState,
}

impl AutomatonError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::DuplicateStartState { .. } => codes::automaton::DUPLICATE_START_STATE,
            Self::DuplicateState { .. } => codes::automaton::DUPLICATE_STATE,
            Self::UnknownState { .. } => codes::automaton::UNKNOWN_STATE,
            Self::NondeterministicTransition { .. } => {
                codes::automaton::NONDETERMINISTIC_TRANSITION
            }
            Self::MissingStartState => codes::automaton::MISSING_START_STATE,
        }
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }
}
