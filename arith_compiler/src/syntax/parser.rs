//! Recursive-descent parser with one function per non-terminal
//!
//! ```text
//! T   -> F (PLUS|MINUS) T | F
//! F   -> Lit (TIMES|DIV) F | Lit
//! Lit -> NUM | LPAREN T RPAREN
//! ```
//!
//! Every production entry counts toward the recursion limit, so deeply
//! nested input fails with [`SyntaxError::MaxRecursionDepth`] instead of
//! exhausting the stack. Right recursion means a flat `1+1+...+1` nests one
//! `T` per operator, so the longest accepted chain is `MAX_PARSE_DEPTH - 3`
//! operators.

use crate::config::compile_time::syntax::*;
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::{BinaryOperator, Expression, NonTerminal};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{TokenKind, TokenStream, TokenStreamError};
use crate::utils::Span;

/// Parser over a significant-token stream
pub struct ExpressionParser {
    tokens: TokenStream,
    preferences: SyntaxPreferences,
    context_stack: Vec<NonTerminal>,
    /// Productions entered beyond the context stack capacity
    elided_contexts: usize,
    parse_depth: usize,
    max_depth_reached: usize,
}

impl ExpressionParser {
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_preferences(tokens, SyntaxPreferences::default())
    }

    pub fn with_preferences(tokens: TokenStream, preferences: SyntaxPreferences) -> Self {
        log_debug!("Creating expression parser", "tokens" => tokens.len());

        Self {
            tokens,
            preferences,
            context_stack: Vec::new(),
            elided_contexts: 0,
            parse_depth: 0,
            max_depth_reached: 0,
        }
    }

    /// Parse one complete `T`; any token left over is an error
    pub fn parse_expression(&mut self) -> SyntaxResult<Expression> {
        let result = self.parse_t().and_then(|expression| {
            match self.tokens.current() {
                Some(token) => Err(SyntaxError::trailing_tokens(
                    token,
                    self.tokens.remaining_count(),
                )),
                None => Ok(expression),
            }
        });

        match &result {
            Ok(expression) => {
                log_success!(
                    codes::success::AST_CONSTRUCTION_COMPLETE,
                    "Expression parsing completed",
                    "nodes" => expression.node_count(),
                    "tree_depth" => expression.depth(),
                    "max_parse_depth" => self.max_depth_reached
                );
            }
            Err(error) => self.report(error),
        }

        result
    }

    /// Deepest production nesting seen so far
    pub fn max_depth_reached(&self) -> usize {
        self.max_depth_reached
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn into_tokens(self) -> TokenStream {
        self.tokens
    }

    // === PRODUCTIONS ===

    /// T -> F (PLUS|MINUS) T | F
    fn parse_t(&mut self) -> SyntaxResult<Expression> {
        self.production(NonTerminal::T, |parser| {
            let left = parser.parse_f()?;

            match parser.additive_operator() {
                Some(operator) => {
                    parser.tokens.advance();
                    let right = parser.parse_t()?;
                    Ok(Expression::binary(operator, left, right))
                }
                None => Ok(left),
            }
        })
    }

    /// F -> Lit (TIMES|DIV) F | Lit
    fn parse_f(&mut self) -> SyntaxResult<Expression> {
        self.production(NonTerminal::F, |parser| {
            let left = parser.parse_lit()?;

            match parser.multiplicative_operator() {
                Some(operator) => {
                    parser.tokens.advance();
                    let right = parser.parse_f()?;
                    Ok(Expression::binary(operator, left, right))
                }
                None => Ok(left),
            }
        })
    }

    /// Lit -> NUM | LPAREN T RPAREN
    fn parse_lit(&mut self) -> SyntaxResult<Expression> {
        self.production(NonTerminal::Lit, |parser| {
            let token = match parser.tokens.advance() {
                Some(token) => token.clone(),
                None => {
                    return Err(SyntaxError::unexpected_end_of_input(
                        NonTerminal::Lit,
                        parser.tokens.end_span(),
                    ))
                }
            };

            match token.kind {
                TokenKind::Num => token
                    .lexeme
                    .parse::<f64>()
                    .map(Expression::literal)
                    .map_err(|_| SyntaxError::InvalidNumberLiteral {
                        lexeme: token.lexeme.clone(),
                        span: token.span,
                    }),
                TokenKind::LParen => {
                    let inner = parser.parse_t()?;
                    parser.close_paren(token.span)?;
                    Ok(inner)
                }
                _ => Err(SyntaxError::unexpected_token(NonTerminal::Lit, &token)),
            }
        })
    }

    fn close_paren(&mut self, open: Span) -> SyntaxResult<()> {
        let end = self.tokens.end_span();
        match self.tokens.expect(TokenKind::RParen) {
            Ok(_) => Ok(()),
            Err(TokenStreamError::UnexpectedToken { found, span, .. }) => {
                Err(SyntaxError::UnmatchedParenthesis {
                    open,
                    found: Some(found),
                    span,
                })
            }
            Err(TokenStreamError::UnexpectedEndOfStream { .. }) => {
                Err(SyntaxError::UnmatchedParenthesis {
                    open,
                    found: None,
                    span: end,
                })
            }
        }
    }

    fn additive_operator(&self) -> Option<BinaryOperator> {
        self.tokens
            .current_kind()
            .filter(TokenKind::is_additive)
            .and_then(BinaryOperator::from_token_kind)
    }

    fn multiplicative_operator(&self) -> Option<BinaryOperator> {
        self.tokens
            .current_kind()
            .filter(TokenKind::is_multiplicative)
            .and_then(BinaryOperator::from_token_kind)
    }

    // === DEPTH AND CONTEXT TRACKING ===

    /// Run `body` as production `nonterminal`, enforcing the depth limit
    fn production<F>(&mut self, nonterminal: NonTerminal, body: F) -> SyntaxResult<Expression>
    where
        F: FnOnce(&mut Self) -> SyntaxResult<Expression>,
    {
        if self.parse_depth >= MAX_PARSE_DEPTH {
            return Err(SyntaxError::MaxRecursionDepth {
                depth: MAX_PARSE_DEPTH,
                span: self.current_span(),
            });
        }

        self.parse_depth += 1;
        self.max_depth_reached = self.max_depth_reached.max(self.parse_depth);
        self.push_context(nonterminal);

        if self.preferences.trace_productions {
            log_debug!("Entering production",
                "production" => nonterminal,
                "depth" => self.parse_depth,
                "token" => self.current_token_description()
            );
        }

        let result = body(self);

        self.pop_context();
        self.parse_depth -= 1;
        result
    }

    fn push_context(&mut self, nonterminal: NonTerminal) {
        if self.context_stack.len() < MAX_CONTEXT_STACK_DEPTH {
            self.context_stack.push(nonterminal);
        } else {
            self.elided_contexts += 1;
        }
    }

    fn pop_context(&mut self) {
        if self.elided_contexts > 0 {
            self.elided_contexts -= 1;
        } else {
            self.context_stack.pop();
        }
    }

    /// Active productions from the outermost, e.g. `T > F > Lit`
    pub fn current_context(&self) -> String {
        let path: Vec<&str> = self.context_stack.iter().map(NonTerminal::as_str).collect();
        match (path.is_empty(), self.elided_contexts) {
            (true, _) => "<top>".to_string(),
            (false, 0) => path.join(" > "),
            (false, elided) => format!("{} > ... ({} more)", path.join(" > "), elided),
        }
    }

    fn current_span(&self) -> Span {
        self.tokens
            .current_span()
            .unwrap_or_else(|| self.tokens.end_span())
    }

    fn current_token_description(&self) -> String {
        self.tokens
            .current()
            .map(|token| format!("{}('{}')", token.kind, token.lexeme))
            .unwrap_or_else(|| "<end>".to_string())
    }

    fn report(&self, error: &SyntaxError) {
        let span = error.span().unwrap_or_else(|| self.current_span());

        if self.preferences.include_context_in_errors {
            log_error!(error.error_code(), &error.to_string(),
                span = span,
                "position" => self.tokens.position(),
                "token" => self.current_token_description()
            );
        } else {
            log_error!(error.error_code(), &error.to_string(), span = span);
        }
    }
}

/// Create a parser with default preferences
pub fn create_parser(tokens: TokenStream) -> ExpressionParser {
    ExpressionParser::new(tokens)
}
