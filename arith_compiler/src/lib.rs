//! Arithmetic expression frontend
//!
//! Source text is split into tokens by an ordered table of deterministic
//! automata (longest match, earliest registration wins ties) and parsed by a
//! recursive-descent parser into an [`Expression`] tree.
//!
//! ```text
//! T   -> F (PLUS|MINUS) T | F
//! F   -> Lit (TIMES|DIV) F | Lit
//! Lit -> NUM | LPAREN T RPAREN
//! ```

// Logging macros must be declared before the modules that use them
#[macro_use]
pub mod logging;

// Internal modules
pub mod automaton;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
pub mod pipeline;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use automaton::{Automaton, AutomatonError, StateId};
pub use grammar::{BinaryOperator, Expression};
pub use lexical::{Lexer, LexerError};
pub use pipeline::{compile_source, Frontend, PipelineError, PipelineResult};
pub use syntax::SyntaxError;
pub use tokens::{Token, TokenKind, TokenStream};

// Re-export pipeline output for tooling consumers
pub use pipeline::output::PipelineOutput;
