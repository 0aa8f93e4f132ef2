//! Grammar for arithmetic expressions
//!
//! ```text
//! T   -> F (PLUS|MINUS) T | F
//! F   -> Lit (TIMES|DIV) F | Lit
//! Lit -> NUM | LPAREN T RPAREN
//! ```
//!
//! Both binary productions recurse on the right, so operators of equal
//! precedence group to the right: `5-3-1` is `5-(3-1)`.

pub mod ast;

pub use ast::{BinaryOperator, Expression};

/// Grammar non-terminals, named in parser diagnostics and traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum NonTerminal {
    T,
    F,
    Lit,
}

impl NonTerminal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::T => "T",
            Self::F => "F",
            Self::Lit => "Lit",
        }
    }
}

impl std::fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
