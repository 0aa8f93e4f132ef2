pub mod nodes;

pub use nodes::{BinaryOperator, Expression};
