//! Atomic conditions over program variables.
//!
//! A [`Condition`] is a single comparison between a variable and a bound
//! (another variable or a numeric constant), restricted to `<=` and `>=`.
//! The restriction keeps [`Condition::inverse`] a total, reversible swap:
//! negating `a <= b` yields `a >= b` under the closed-world assumption that
//! strict and equality comparators are never modeled. If that universe is
//! ever extended, inversion must be revisited.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use crate::ast::{CmpOp, Expr};

/// Errors produced while turning an expression into a [`Condition`].
///
/// The two kinds propagate differently during extraction:
/// [`InvalidExpression`][ConditionError::InvalidExpression] is absorbed (the
/// offending conditional is skipped), while
/// [`InvalidOperand`][ConditionError::InvalidOperand] indicates a structural
/// error in the condition itself and propagates to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error("expression cannot be modeled as a condition: {0}")]
    InvalidExpression(String),

    #[error("invalid comparison operand: {0}")]
    InvalidOperand(String),
}

/// The comparator of a condition.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Comparison {
    Lte,
    Gte,
}

impl Comparison {
    /// Swaps `Lte` and `Gte`. Exact, since no other comparators exist.
    pub fn inverse(self) -> Self {
        match self {
            Comparison::Lte => Comparison::Gte,
            Comparison::Gte => Comparison::Lte,
        }
    }

    /// Maps a front-end comparator onto the modelable universe.
    ///
    /// Anything besides `<=` and `>=` is an operand error, not a skippable
    /// expression shape: the comparison is well-formed, its operator just
    /// cannot be modeled.
    pub fn from_op(op: CmpOp) -> Result<Self, ConditionError> {
        match op {
            CmpOp::Le => Ok(Comparison::Lte),
            CmpOp::Ge => Ok(Comparison::Gte),
            other => Err(ConditionError::InvalidOperand(format!(
                "unsupported comparison operator `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Lte => write!(f, "<="),
            Comparison::Gte => write!(f, ">="),
        }
    }
}

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Variable(String),
    Constant(f64),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Variable(name) => write!(f, "{}", name),
            Bound::Constant(value) => write!(f, "{}", value),
        }
    }
}

/// An atomic comparison between a variable and a bound.
///
/// # Invariants
///
/// - `variable` is never empty
/// - a constant bound is always finite
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    variable: String,
    comparison: Comparison,
    bound: Bound,
}

impl Condition {
    /// Creates a new condition.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is empty or a constant bound is not finite.
    pub fn new(variable: impl Into<String>, comparison: Comparison, bound: Bound) -> Self {
        let variable = variable.into();
        assert!(!variable.is_empty(), "Condition variable must be non-empty");
        if let Bound::Constant(value) = bound {
            assert!(value.is_finite(), "Constant bound must be finite");
        }
        Self {
            variable,
            comparison,
            bound,
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn bound(&self) -> &Bound {
        &self.bound
    }

    /// The condition taken on the implicit `else` branch: same operands,
    /// inverted comparator.
    pub fn inverse(&self) -> Self {
        Self {
            variable: self.variable.clone(),
            comparison: self.comparison.inverse(),
            bound: self.bound.clone(),
        }
    }

    /// Evaluates the condition against observed variable bindings.
    ///
    /// A missing binding (for the variable or a variable bound) means the
    /// condition is not satisfied; it is never an error. This is the
    /// deliberate default for partial-binding evaluation.
    pub fn is_true(&self, bindings: &HashMap<String, f64>) -> bool {
        let Some(&left) = bindings.get(&self.variable) else {
            return false;
        };

        let right = match &self.bound {
            Bound::Variable(name) => match bindings.get(name) {
                Some(&value) => value,
                None => return false,
            },
            Bound::Constant(value) => *value,
        };

        match self.comparison {
            Comparison::Lte => left <= right,
            Comparison::Gte => left >= right,
        }
    }

    /// All variable names the condition references (one or two).
    pub fn variables(&self) -> HashSet<String> {
        let mut variables = HashSet::from([self.variable.clone()]);
        if let Bound::Variable(name) = &self.bound {
            variables.insert(name.clone());
        }
        variables
    }

    /// Builds a condition from a comparison expression.
    ///
    /// Accepts `name ⊕ name`, `name ⊕ number`, and `number ⊕ name` where
    /// `⊕` is `<=` or `>=`. A constant-left form is normalized by swapping
    /// operands and inverting the comparator, so the stored form always has
    /// the variable on the left (`5 <= x` becomes `x >= 5`).
    ///
    /// Non-comparison expressions and chained comparisons fail with
    /// [`ConditionError::InvalidExpression`]; unsupported comparators,
    /// non-numeric or non-finite bounds, and comparisons without a variable
    /// operand fail with [`ConditionError::InvalidOperand`].
    pub fn from_expr(expr: &Expr) -> Result<Self, ConditionError> {
        let Expr::Cmp { left, rest } = expr else {
            return Err(ConditionError::InvalidExpression(format!(
                "unsupported expression {:?}",
                expr
            )));
        };

        if rest.len() != 1 {
            return Err(ConditionError::InvalidExpression(format!(
                "chained comparison with {} comparators",
                rest.len()
            )));
        }

        let (op, right) = &rest[0];
        let comparison = Comparison::from_op(*op)?;

        match (left.as_ref(), right) {
            (Expr::Name(variable), Expr::Name(bound)) => Ok(Self::new(
                variable.clone(),
                comparison,
                Bound::Variable(bound.clone()),
            )),
            (Expr::Name(variable), Expr::Num(value)) => {
                if !value.is_finite() {
                    return Err(ConditionError::InvalidOperand(format!(
                        "non-finite bound {}",
                        value
                    )));
                }
                Ok(Self::new(
                    variable.clone(),
                    comparison,
                    Bound::Constant(*value),
                ))
            }
            (Expr::Name(_), other) => Err(ConditionError::InvalidOperand(format!(
                "invalid bound {:?}",
                other
            ))),
            (Expr::Num(value), Expr::Name(variable)) => {
                if !value.is_finite() {
                    return Err(ConditionError::InvalidOperand(format!(
                        "non-finite bound {}",
                        value
                    )));
                }
                // Normalize: put the variable on the left.
                Ok(Self::new(
                    variable.clone(),
                    comparison.inverse(),
                    Bound::Constant(*value),
                ))
            }
            _ => Err(ConditionError::InvalidOperand(
                "comparison must reference at least one variable".to_string(),
            )),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.variable, self.comparison, self.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_comparison_inverse() {
        assert_eq!(Comparison::Lte.inverse(), Comparison::Gte);
        assert_eq!(Comparison::Gte.inverse(), Comparison::Lte);
    }

    #[test]
    fn test_inverse_involution() {
        let c = Condition::new("x", Comparison::Lte, Bound::Constant(10.0));
        assert_eq!(c.inverse().inverse(), c);

        let c = Condition::new("x", Comparison::Gte, Bound::Variable("y".to_string()));
        assert_eq!(c.inverse().inverse(), c);
    }

    #[test]
    fn test_is_true_constant_bound() {
        let c = Condition::new("x", Comparison::Lte, Bound::Constant(10.0));
        assert!(c.is_true(&bindings(&[("x", 5.0)])));
        assert!(!c.is_true(&bindings(&[("x", 15.0)])));
    }

    #[test]
    fn test_is_true_variable_bound() {
        let c = Condition::new("x", Comparison::Gte, Bound::Variable("y".to_string()));
        assert!(c.is_true(&bindings(&[("x", 5.0), ("y", 3.0)])));
        assert!(!c.is_true(&bindings(&[("x", 2.0), ("y", 3.0)])));
    }

    #[test]
    fn test_is_true_missing_binding() {
        let c = Condition::new("x", Comparison::Lte, Bound::Variable("y".to_string()));
        assert!(!c.is_true(&bindings(&[])));
        assert!(!c.is_true(&bindings(&[("x", 1.0)])));
        assert!(!c.is_true(&bindings(&[("y", 1.0)])));
    }

    #[test]
    fn test_condition_and_inverse_are_complementary() {
        let c = Condition::new("x", Comparison::Lte, Bound::Constant(10.0));

        // Distinct values: exactly one holds.
        let v = bindings(&[("x", 3.0)]);
        assert!(c.is_true(&v) != c.inverse().is_true(&v));
        let v = bindings(&[("x", 30.0)]);
        assert!(c.is_true(&v) != c.inverse().is_true(&v));

        // At equality both hold: <= and >= overlap.
        let v = bindings(&[("x", 10.0)]);
        assert!(c.is_true(&v) && c.inverse().is_true(&v));
    }

    #[test]
    fn test_variables() {
        let c = Condition::new("x", Comparison::Lte, Bound::Constant(10.0));
        assert_eq!(c.variables(), HashSet::from(["x".to_string()]));

        let c = Condition::new("x", Comparison::Lte, Bound::Variable("y".to_string()));
        assert_eq!(
            c.variables(),
            HashSet::from(["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_from_expr_variable_constant() {
        let c = Condition::from_expr(&Expr::le(Expr::name("x"), Expr::num(10.0))).unwrap();
        assert_eq!(c, Condition::new("x", Comparison::Lte, Bound::Constant(10.0)));
    }

    #[test]
    fn test_from_expr_variable_variable() {
        let c = Condition::from_expr(&Expr::ge(Expr::name("x"), Expr::name("y"))).unwrap();
        assert_eq!(
            c,
            Condition::new("x", Comparison::Gte, Bound::Variable("y".to_string()))
        );
    }

    #[test]
    fn test_from_expr_normalizes_constant_left() {
        // 5 <= x becomes x >= 5
        let c = Condition::from_expr(&Expr::le(Expr::num(5.0), Expr::name("x"))).unwrap();
        assert_eq!(c, Condition::new("x", Comparison::Gte, Bound::Constant(5.0)));
    }

    #[test]
    fn test_from_expr_rejects_non_comparison() {
        let err = Condition::from_expr(&Expr::name("flag")).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidExpression(_)));
    }

    #[test]
    fn test_from_expr_rejects_chained_comparison() {
        let chained = Expr::cmp(
            Expr::name("a"),
            vec![
                (CmpOp::Le, Expr::name("b")),
                (CmpOp::Le, Expr::name("c")),
            ],
        );
        let err = Condition::from_expr(&chained).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidExpression(_)));
    }

    #[test]
    fn test_from_expr_rejects_strict_comparator() {
        let err = Condition::from_expr(&Expr::lt(Expr::name("x"), Expr::num(1.0))).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidOperand(_)));
    }

    #[test]
    fn test_from_expr_rejects_string_bound() {
        let err =
            Condition::from_expr(&Expr::le(Expr::name("x"), Expr::string("ten"))).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidOperand(_)));
    }

    #[test]
    fn test_from_expr_rejects_constant_constant() {
        let err = Condition::from_expr(&Expr::le(Expr::num(1.0), Expr::num(2.0))).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidOperand(_)));
    }

    #[test]
    fn test_from_expr_rejects_non_finite_bound() {
        let err =
            Condition::from_expr(&Expr::le(Expr::name("x"), Expr::num(f64::NAN))).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidOperand(_)));
    }

    #[test]
    #[should_panic(expected = "Condition variable must be non-empty")]
    fn test_empty_variable_panics() {
        Condition::new("", Comparison::Lte, Bound::Constant(1.0));
    }

    #[test]
    fn test_display() {
        let c = Condition::new("x1", Comparison::Lte, Bound::Constant(10.0));
        assert_eq!(c.to_string(), "x1 <= 10");
        let c = Condition::new("x", Comparison::Gte, Bound::Variable("y".to_string()));
        assert_eq!(c.to_string(), "x >= y");
    }
}
