use super::error::{AutomatonError, AutomatonResult};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Identifier of a state within one automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StateId(pub u32);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct State {
    pub id: StateId,
    pub is_start: bool,
    pub is_accepting: bool,
}

/// Deterministic finite automaton over single characters
///
/// The table is immutable once built; scanning state lives in
/// [`AutomatonCursor`], so one table can serve any number of concurrent scans.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    states: BTreeMap<StateId, State>,
    transitions: HashMap<(StateId, char), StateId>,
    start: Option<StateId>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state; at most one state may be the start state
    pub fn add_state(
        &mut self,
        id: StateId,
        is_start: bool,
        is_accepting: bool,
    ) -> AutomatonResult<()> {
        if self.states.contains_key(&id) {
            return Err(AutomatonError::DuplicateState { id });
        }

        if is_start {
            if let Some(existing) = self.start {
                return Err(AutomatonError::DuplicateStartState {
                    existing,
                    attempted: id,
                });
            }
            self.start = Some(id);
        }

        self.states.insert(
            id,
            State {
                id,
                is_start,
                is_accepting,
            },
        );
        Ok(())
    }

    /// Register `from --character--> to`; both states must already exist
    pub fn add_transition(
        &mut self,
        from: StateId,
        character: char,
        to: StateId,
    ) -> AutomatonResult<()> {
        for id in [from, to] {
            if !self.states.contains_key(&id) {
                return Err(AutomatonError::UnknownState { id });
            }
        }

        if let Some(&existing) = self.transitions.get(&(from, character)) {
            return Err(AutomatonError::NondeterministicTransition {
                from,
                character,
                existing,
                attempted: to,
            });
        }

        self.transitions.insert((from, character), to);
        Ok(())
    }

    /// Register the same transition for every character in `characters`
    pub fn add_transitions<I>(
        &mut self,
        from: StateId,
        characters: I,
        to: StateId,
    ) -> AutomatonResult<()>
    where
        I: IntoIterator<Item = char>,
    {
        for character in characters {
            self.add_transition(from, character, to)?;
        }
        Ok(())
    }

    pub fn step(&self, state: StateId, character: char) -> Option<StateId> {
        self.transitions.get(&(state, character)).copied()
    }

    /// Unknown states are never accepting
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.states
            .get(&state)
            .map(|s| s.is_accepting)
            .unwrap_or(false)
    }

    pub fn start_state(&self) -> AutomatonResult<StateId> {
        self.start.ok_or(AutomatonError::MissingStartState)
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(&id)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// Fresh cursor positioned on the start state
    pub fn cursor(&self) -> AutomatonResult<AutomatonCursor<'_>> {
        let start = self.start_state()?;
        Ok(AutomatonCursor {
            automaton: self,
            start,
            current: Some(start),
        })
    }

    /// Byte offset just past the longest accepted prefix of `input[offset..]`
    ///
    /// Returns `Some(offset)` for an empty match when the start state accepts,
    /// and `None` when no prefix is accepted or there is no start state.
    pub fn longest_match(&self, input: &str, offset: usize) -> Option<usize> {
        let mut cursor = self.cursor().ok()?;
        let rest = input.get(offset..)?;

        let mut last_accept = cursor.is_accepting().then_some(offset);
        for (index, character) in rest.char_indices() {
            if !cursor.consume(character) {
                break;
            }
            if cursor.is_accepting() {
                last_accept = Some(offset + index + character.len_utf8());
            }
        }

        last_accept
    }
}

/// Per-scan position within an [`Automaton`]
///
/// `current` is `None` once the cursor has fallen off the table (dead state).
#[derive(Debug, Clone)]
pub struct AutomatonCursor<'a> {
    automaton: &'a Automaton,
    start: StateId,
    current: Option<StateId>,
}

impl<'a> AutomatonCursor<'a> {
    pub fn reset(&mut self) {
        self.current = Some(self.start);
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn is_dead(&self) -> bool {
        self.current.is_none()
    }

    pub fn can_consume(&self, character: char) -> bool {
        self.current
            .and_then(|state| self.automaton.step(state, character))
            .is_some()
    }

    /// Follow the transition on `character`; returns false and goes dead when there is none
    pub fn consume(&mut self, character: char) -> bool {
        self.current = self
            .current
            .and_then(|state| self.automaton.step(state, character));
        self.current.is_some()
    }

    pub fn is_accepting(&self) -> bool {
        self.current
            .map(|state| self.automaton.is_accepting(state))
            .unwrap_or(false)
    }
}
