//! Expression tree nodes
//!
//! Every grammar production maps onto [`Expression`]: `T` and `F` build the
//! binary variants, `Lit` builds [`Expression::Literal`] or returns the
//! parenthesized subtree unchanged. Children are owned through `Box`, so a tree
//! has no sharing and no cycles.

use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;

// === OPERATORS ===

/// Binary operators (EBNF: `PLUS | MINUS | TIMES | DIV`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Times,
    Div,
}

impl BinaryOperator {
    /// Operator selected by a token kind; `None` for NUM, parentheses and whitespace
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Plus),
            TokenKind::Minus => Some(Self::Minus),
            TokenKind::Times => Some(Self::Times),
            TokenKind::Div => Some(Self::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Div => "/",
        }
    }

    /// `+` and `-` belong to `T`, `*` and `/` to `F`
    pub fn is_additive(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// === EXPRESSIONS ===

/// Arithmetic expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// EBNF: Lit ::= NUM
    Literal(f64),
    /// EBNF: T ::= F PLUS T
    Plus(Box<Expression>, Box<Expression>),
    /// EBNF: T ::= F MINUS T
    Minus(Box<Expression>, Box<Expression>),
    /// EBNF: F ::= Lit TIMES F
    Times(Box<Expression>, Box<Expression>),
    /// EBNF: F ::= Lit DIV F
    Div(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn literal(value: f64) -> Self {
        Self::Literal(value)
    }

    /// Build the node `operator` selects
    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match operator {
            BinaryOperator::Plus => Self::Plus(left, right),
            BinaryOperator::Minus => Self::Minus(left, right),
            BinaryOperator::Times => Self::Times(left, right),
            BinaryOperator::Div => Self::Div(left, right),
        }
    }

    pub fn plus(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Plus, left, right)
    }

    pub fn minus(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Minus, left, right)
    }

    pub fn times(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Times, left, right)
    }

    pub fn div(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Div, left, right)
    }

    /// Operator of a binary node
    pub fn operator(&self) -> Option<BinaryOperator> {
        match self {
            Self::Literal(_) => None,
            Self::Plus(..) => Some(BinaryOperator::Plus),
            Self::Minus(..) => Some(BinaryOperator::Minus),
            Self::Times(..) => Some(BinaryOperator::Times),
            Self::Div(..) => Some(BinaryOperator::Div),
        }
    }

    /// Left and right children of a binary node
    pub fn operands(&self) -> Option<(&Expression, &Expression)> {
        match self {
            Self::Literal(_) => None,
            Self::Plus(l, r) | Self::Minus(l, r) | Self::Times(l, r) | Self::Div(l, r) => {
                Some((l, r))
            }
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Value of the tree under IEEE 754 arithmetic
    pub fn evaluate(&self) -> f64 {
        match self {
            Self::Literal(value) => *value,
            Self::Plus(left, right) => left.evaluate() + right.evaluate(),
            Self::Minus(left, right) => left.evaluate() - right.evaluate(),
            Self::Times(left, right) => left.evaluate() * right.evaluate(),
            Self::Div(left, right) => left.evaluate() / right.evaluate(),
        }
    }

    /// Longest root-to-leaf path, counting nodes; a literal has depth 1
    pub fn depth(&self) -> usize {
        match self.operands() {
            Some((left, right)) => 1 + left.depth().max(right.depth()),
            None => 1,
        }
    }

    pub fn node_count(&self) -> usize {
        match self.operands() {
            Some((left, right)) => 1 + left.node_count() + right.node_count(),
            None => 1,
        }
    }

    /// Literal values in left-to-right source order
    pub fn literals(&self) -> Vec<f64> {
        let mut values = Vec::new();
        self.collect_literals(&mut values);
        values
    }

    fn collect_literals(&self, values: &mut Vec<f64>) {
        match self {
            Self::Literal(value) => values.push(*value),
            Self::Plus(left, right)
            | Self::Minus(left, right)
            | Self::Times(left, right)
            | Self::Div(left, right) => {
                left.collect_literals(values);
                right.collect_literals(values);
            }
        }
    }
}

/// Fully parenthesized infix form, e.g. `(1 + (2 * 3))`
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Plus(left, right) => write!(f, "({} + {})", left, right),
            Self::Minus(left, right) => write!(f, "({} - {})", left, right),
            Self::Times(left, right) => write!(f, "({} * {})", left, right),
            Self::Div(left, right) => write!(f, "({} / {})", left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: f64) -> Expression {
        Expression::literal(value)
    }

    #[test]
    fn test_operator_from_token_kind() {
        assert_eq!(
            BinaryOperator::from_token_kind(TokenKind::Div),
            Some(BinaryOperator::Div)
        );
        assert_eq!(BinaryOperator::from_token_kind(TokenKind::LParen), None);
        assert!(BinaryOperator::Minus.is_additive());
        assert!(!BinaryOperator::Times.is_additive());
    }

    #[test]
    fn test_binary_constructor_selects_variant() {
        let node = Expression::binary(BinaryOperator::Times, lit(2.0), lit(3.0));
        assert_eq!(node, Expression::Times(Box::new(lit(2.0)), Box::new(lit(3.0))));
        assert_eq!(node.operator(), Some(BinaryOperator::Times));
        assert!(!node.is_literal());
    }

    #[test]
    fn test_evaluate() {
        // 5 - (3 - 1)
        let tree = Expression::minus(lit(5.0), Expression::minus(lit(3.0), lit(1.0)));
        assert_eq!(tree.evaluate(), 3.0);

        // 1 + 2 * 3
        let tree = Expression::plus(lit(1.0), Expression::times(lit(2.0), lit(3.0)));
        assert_eq!(tree.evaluate(), 7.0);

        assert!(Expression::div(lit(1.0), lit(0.0)).evaluate().is_infinite());
        assert!(Expression::div(lit(0.0), lit(0.0)).evaluate().is_nan());

        // Each variant applies its own operator
        assert_eq!(Expression::plus(lit(6.0), lit(2.0)).evaluate(), 8.0);
        assert_eq!(Expression::minus(lit(6.0), lit(2.0)).evaluate(), 4.0);
        assert_eq!(Expression::times(lit(6.0), lit(2.0)).evaluate(), 12.0);
        assert_eq!(Expression::div(lit(6.0), lit(2.0)).evaluate(), 3.0);
    }

    #[test]
    fn test_shape_metrics() {
        let tree = Expression::plus(lit(1.0), Expression::times(lit(2.0), lit(3.5)));
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.literals(), vec![1.0, 2.0, 3.5]);
        assert_eq!(lit(4.0).depth(), 1);
    }

    #[test]
    fn test_display() {
        let tree = Expression::times(Expression::plus(lit(1.0), lit(2.0)), lit(3.5));
        assert_eq!(tree.to_string(), "((1 + 2) * 3.5)");

        let tree = Expression::div(lit(8.0), Expression::minus(lit(4.0), lit(0.5)));
        assert_eq!(tree.to_string(), "(8 / (4 - 0.5))");
    }

    #[test]
    fn test_serde_shape() {
        let tree = Expression::plus(lit(1.0), lit(2.5));
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"Plus":[{"Literal":1.0},{"Literal":2.5}]}"#);

        let back: Expression = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
