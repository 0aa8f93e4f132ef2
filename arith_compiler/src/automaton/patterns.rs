//! Ready-made automata for the arithmetic token set

use super::dfa::{Automaton, StateId};
use super::error::AutomatonResult;

const DIGITS: std::ops::RangeInclusive<char> = '0'..='9';

/// Whitespace characters accepted between tokens
pub const WHITESPACE_CHARS: [char; 4] = [' ', '\n', '\r', '\t'];

/// `[0-9]+(\.[0-9]+)?`
///
/// q0 -digit-> q1 (accept) -digit-> q1, q1 -'.'-> q2 -digit-> q3 (accept) -digit-> q3
pub fn number() -> AutomatonResult<Automaton> {
    let (start, integer, dot, fraction) = (StateId(0), StateId(1), StateId(2), StateId(3));

    let mut dfa = Automaton::new();
    dfa.add_state(start, true, false)?;
    dfa.add_state(integer, false, true)?;
    dfa.add_state(dot, false, false)?;
    dfa.add_state(fraction, false, true)?;

    dfa.add_transitions(start, DIGITS, integer)?;
    dfa.add_transitions(integer, DIGITS, integer)?;
    dfa.add_transition(integer, '.', dot)?;
    dfa.add_transitions(dot, DIGITS, fraction)?;
    dfa.add_transitions(fraction, DIGITS, fraction)?;

    Ok(dfa)
}

/// Two states accepting exactly `character`
pub fn single_char(character: char) -> AutomatonResult<Automaton> {
    let mut dfa = Automaton::new();
    dfa.add_state(StateId(0), true, false)?;
    dfa.add_state(StateId(1), false, true)?;
    dfa.add_transition(StateId(0), character, StateId(1))?;
    Ok(dfa)
}

/// `(' '|\n|\r|\t)*` as one state that is both start and accepting
pub fn whitespace() -> AutomatonResult<Automaton> {
    let mut dfa = Automaton::new();
    dfa.add_state(StateId(0), true, true)?;
    dfa.add_transitions(StateId(0), WHITESPACE_CHARS, StateId(0))?;
    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_pattern() {
        let dfa = number().unwrap();

        assert_eq!(dfa.longest_match("1", 0), Some(1));
        assert_eq!(dfa.longest_match("3.5", 0), Some(3));
        assert_eq!(dfa.longest_match("12.25+1", 0), Some(5));
        // Trailing dot is not part of the number
        assert_eq!(dfa.longest_match("5.", 0), Some(1));
        assert_eq!(dfa.longest_match(".5", 0), None);
        assert_eq!(dfa.longest_match("1.2.3", 0), Some(3));
    }

    #[test]
    fn test_single_char_pattern() {
        let plus = single_char('+').unwrap();
        assert_eq!(plus.longest_match("++", 0), Some(1));
        assert_eq!(plus.longest_match("-", 0), None);
    }

    #[test]
    fn test_whitespace_pattern() {
        let ws = whitespace().unwrap();
        assert_eq!(ws.longest_match(" \t\r\n1", 0), Some(4));
        assert_eq!(ws.longest_match("1", 0), Some(0));
        assert!(ws.is_accepting(ws.start_state().unwrap()));
    }
}
