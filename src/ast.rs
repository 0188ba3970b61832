//! Statement and expression trees consumed by branch extraction.
//!
//! This module is the contract between the analysis core and a source-parsing
//! front end: the front end lowers a function body into these nodes, and the
//! core never looks at source text itself. The vocabulary is deliberately
//! small — sequential blocks, `if`/`else` conditionals, returns, comparisons,
//! short-circuit boolean connectives, name/path references, and literals.
//!
//! Comparison nodes keep an ordered `(operator, operand)` list after the left
//! operand, so chained comparisons (`a <= b <= c`) are representable; the
//! condition layer rejects them. String literals are likewise representable
//! so that non-numeric bounds can be reported as operand errors instead of
//! being unconstructible.
//!
//! # Examples
//!
//! ```
//! use bsa_rs::ast::{Block, Expr, Stmt};
//!
//! // if x1 <= 10 and x2 >= 5 { return }
//! let func = Block::new(vec![Stmt::if_else(
//!     Expr::and(vec![
//!         Expr::le(Expr::name("x1"), Expr::num(10.0)),
//!         Expr::ge(Expr::name("x2"), Expr::num(5.0)),
//!     ]),
//!     Block::new(vec![Stmt::ret(None)]),
//!     Block::empty(),
//! )]);
//! assert_eq!(func.stmts().len(), 1);
//! ```

use std::fmt;

/// A comparison operator as a front end may emit it.
///
/// Only [`Le`][CmpOp::Le] and [`Ge`][CmpOp::Ge] are modelable as conditions;
/// the rest exist so that unsupported comparators surface as operand errors
/// rather than being unrepresentable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CmpOp {
    Le,
    Ge,
    Lt,
    Gt,
    Eq,
    Ne,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Le => "<=",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        };
        write!(f, "{}", s)
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A variable reference, possibly a dotted path (`"point.x"`).
    Name(String),
    /// A numeric literal.
    Num(f64),
    /// A string literal. Never a valid bound; kept representable on purpose.
    Str(String),
    /// A comparison: left operand followed by one or more `(op, operand)`
    /// pairs, mirroring how chained comparisons parse.
    Cmp {
        left: Box<Expr>,
        rest: Vec<(CmpOp, Expr)>,
    },
    /// Short-circuit conjunction over an ordered operand list.
    And(Vec<Expr>),
    /// Short-circuit disjunction over an ordered operand list.
    Or(Vec<Expr>),
}

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Expr::Name(name.into())
    }

    pub fn num(value: f64) -> Self {
        Expr::Num(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn cmp(left: Expr, rest: Vec<(CmpOp, Expr)>) -> Self {
        Expr::Cmp {
            left: Box::new(left),
            rest,
        }
    }

    pub fn le(lhs: Expr, rhs: Expr) -> Self {
        Self::cmp(lhs, vec![(CmpOp::Le, rhs)])
    }

    pub fn ge(lhs: Expr, rhs: Expr) -> Self {
        Self::cmp(lhs, vec![(CmpOp::Ge, rhs)])
    }

    pub fn lt(lhs: Expr, rhs: Expr) -> Self {
        Self::cmp(lhs, vec![(CmpOp::Lt, rhs)])
    }

    pub fn gt(lhs: Expr, rhs: Expr) -> Self {
        Self::cmp(lhs, vec![(CmpOp::Gt, rhs)])
    }

    pub fn and(operands: Vec<Expr>) -> Self {
        Expr::And(operands)
    }

    pub fn or(operands: Vec<Expr>) -> Self {
        Expr::Or(operands)
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A conditional with a test expression and two branch blocks.
    If {
        test: Expr,
        body: Block,
        orelse: Block,
    },
    /// A return statement. Opaque to extraction, present so function bodies
    /// round-trip through the contract.
    Return(Option<Expr>),
}

impl Stmt {
    pub fn if_else(test: Expr, body: Block, orelse: Block) -> Self {
        Stmt::If { test, body, orelse }
    }

    pub fn ret(value: Option<Expr>) -> Self {
        Stmt::Return(value)
    }
}

/// A sequential block of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block(Vec<Stmt>);

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Block(stmts)
    }

    pub fn empty() -> Self {
        Block(Vec::new())
    }

    pub fn stmts(&self) -> &[Stmt] {
        &self.0
    }
}

impl From<Vec<Stmt>> for Block {
    fn from(stmts: Vec<Stmt>) -> Self {
        Block(stmts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_builder() {
        let e = Expr::le(Expr::name("x"), Expr::num(3.0));
        match e {
            Expr::Cmp { left, rest } => {
                assert_eq!(*left, Expr::Name("x".to_string()));
                assert_eq!(rest, vec![(CmpOp::Le, Expr::Num(3.0))]);
            }
            other => panic!("unexpected expr {:?}", other),
        }
    }

    #[test]
    fn test_op_display() {
        assert_eq!(CmpOp::Le.to_string(), "<=");
        assert_eq!(CmpOp::Ge.to_string(), ">=");
        assert_eq!(CmpOp::Ne.to_string(), "!=");
    }

    #[test]
    fn test_block_accessors() {
        let block = Block::new(vec![Stmt::ret(Some(Expr::name("x")))]);
        assert_eq!(block.stmts().len(), 1);
        assert!(Block::empty().stmts().is_empty());
    }
}
