//! Branch-tree extraction from conditional statements.
//!
//! A [`BranchTree`] records the atomic condition guarding a branch together
//! with the trees extracted from the `true` and `false` sub-blocks. A block
//! yields a forest: one tree per modelable top-level conditional chain.
//!
//! Boolean tests are expanded with short-circuit semantics: a conjunction
//! chains its operands through the true side (failing any earlier conjunct
//! takes the false path immediately), and a disjunction contributes one
//! independent tree per operand. A conditional whose test cannot be modeled
//! at all is skipped silently and contributes nothing to the forest — a
//! deliberate tradeoff of variable coverage for robustness to unsupported
//! syntax — while a structurally broken condition (bad operand or bound)
//! aborts extraction with an error.

use std::collections::HashSet;

use log::debug;

use crate::ast::{Block, Expr, Stmt};
use crate::condition::{Condition, ConditionError};
use crate::kripke::Kripke;

/// A node of the extracted branch structure.
///
/// Children lists may be empty (a leaf) but never contain gaps; trees are
/// built bottom-up by extraction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchTree {
    condition: Condition,
    true_children: Vec<BranchTree>,
    false_children: Vec<BranchTree>,
}

impl BranchTree {
    pub fn new(
        condition: Condition,
        true_children: Vec<BranchTree>,
        false_children: Vec<BranchTree>,
    ) -> Self {
        Self {
            condition,
            true_children,
            false_children,
        }
    }

    /// A node with no children on either branch.
    pub fn leaf(condition: Condition) -> Self {
        Self::new(condition, Vec::new(), Vec::new())
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn true_children(&self) -> &[BranchTree] {
        &self.true_children
    }

    pub fn false_children(&self) -> &[BranchTree] {
        &self.false_children
    }

    /// All variable names referenced by this node's condition and every
    /// descendant condition on both branches.
    pub fn variables(&self) -> HashSet<String> {
        let mut variables = self.condition.variables();
        for child in self.true_children.iter().chain(&self.false_children) {
            variables.extend(child.variables());
        }
        variables
    }

    /// Extracts the branch forest of a sequential block.
    ///
    /// Conditionals directly in the block are analyzed in source order;
    /// other statements are ignored. A conditional whose test raises
    /// [`ConditionError::InvalidExpression`] is skipped (its sub-blocks'
    /// trees are absent from the result too); an
    /// [`InvalidOperand`][ConditionError::InvalidOperand] error propagates.
    pub fn from_block(block: &Block) -> Result<Vec<BranchTree>, ConditionError> {
        let mut forest = Vec::new();

        for stmt in block.stmts() {
            let Stmt::If { test, body, orelse } = stmt else {
                continue;
            };

            let true_children = Self::from_block(body)?;
            let false_children = Self::from_block(orelse)?;

            match expr_trees(test, true_children, false_children) {
                Ok(trees) => forest.extend(trees),
                Err(ConditionError::InvalidExpression(reason)) => {
                    debug!("skipping unmodelable conditional: {}", reason);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(forest)
    }

    /// Converts the tree into Kripke structures over [`Condition`] labels.
    ///
    /// The true-branch models are the child structures labeled with this
    /// node's condition (or a fresh singleton if the branch is a leaf); the
    /// false-branch models symmetrically use the inverted condition. The two
    /// lists are joined pairwise by position; if they differ in length, the
    /// longer side's excess structures are dropped.
    pub fn as_kripke(&self) -> Vec<Kripke<Condition>> {
        let condition = self.condition.clone();
        let true_kripkes = branch_kripkes(&self.true_children, condition);

        let inverse = self.condition.inverse();
        let false_kripkes = branch_kripkes(&self.false_children, inverse);

        true_kripkes
            .into_iter()
            .zip(false_kripkes)
            .map(|(tk, fk)| tk.join(&fk))
            .collect()
    }
}

/// The models of one branch: a singleton for a leaf, otherwise every child
/// structure with the branch's condition appended.
fn branch_kripkes(children: &[BranchTree], condition: Condition) -> Vec<Kripke<Condition>> {
    if children.is_empty() {
        return vec![Kripke::singleton(vec![condition])];
    }

    children
        .iter()
        .flat_map(|child| child.as_kripke())
        .map(|kripke| kripke.add_labels(std::slice::from_ref(&condition)))
        .collect()
}

/// Expands a test expression into branch trees over the given true/false
/// children, with short-circuit boolean semantics.
fn expr_trees(
    expr: &Expr,
    true_children: Vec<BranchTree>,
    false_children: Vec<BranchTree>,
) -> Result<Vec<BranchTree>, ConditionError> {
    match expr {
        Expr::And(operands) => {
            let Some((last, init)) = operands.split_last() else {
                return Err(ConditionError::InvalidExpression(
                    "empty conjunction".to_string(),
                ));
            };

            // Right-to-left: each conjunct guards the trees of the ones
            // after it, and failing any conjunct takes the false path.
            let mut trees = expr_trees(last, true_children, false_children.clone())?;
            for operand in init.iter().rev() {
                trees = expr_trees(operand, trees, false_children.clone())?;
            }
            Ok(trees)
        }
        Expr::Or(operands) => {
            if operands.is_empty() {
                return Err(ConditionError::InvalidExpression(
                    "empty disjunction".to_string(),
                ));
            }

            // Each disjunct is an independent way into the true branch.
            let mut trees = Vec::new();
            for operand in operands {
                trees.extend(expr_trees(
                    operand,
                    true_children.clone(),
                    false_children.clone(),
                )?);
            }
            Ok(trees)
        }
        atomic => {
            let condition = Condition::from_expr(atomic)?;
            Ok(vec![BranchTree::new(
                condition,
                true_children,
                false_children,
            )])
        }
    }
}
