//! Token system for arithmetic expressions
//!
//! - **[`TokenKind`]** - NUM, the four operators, parentheses and WHITE_SPACE
//! - **[`Token`]** - kind, matched lexeme and source span
//! - **[`TokenStream`]** - cursor over the significant tokens with a lookahead of one
//!
//! Whitespace tokens survive in [`TokenStream::all_tokens`] so the source can
//! be rebuilt from the lexemes, but the parser never sees them.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenKind};
pub use token_stream::{TokenStream, TokenStreamError};
