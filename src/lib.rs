//! # bsa-rs: Branch-Structure Analysis in Rust
//!
//! **`bsa-rs`** analyzes the conditional-branch structure of a function and
//! compiles it into a Kripke structure suitable for exhaustive path
//! reasoning, symbolic analysis, or model-checking-driven test generation.
//!
//! ## How it works
//!
//! Given a function body lowered into the [`ast`] statement tree by a
//! front end, the library:
//!
//! 1. extracts a forest of [`BranchTree`][crate::branches::BranchTree]s — one
//!    per top-level conditional chain — describing every reachable branch
//!    combination, with short-circuit `and`/`or` semantics and
//!    De Morgan-consistent inversion for implicit `else` branches;
//! 2. folds each tree into [`Kripke`][crate::kripke::Kripke] structures whose
//!    states correspond to branch outcomes and whose labels are the
//!    [`Condition`][crate::condition::Condition]s that must hold to reach
//!    them.
//!
//! The library produces the model, not the verification result: loops,
//! exceptions, numeric constraint solving, and CTL evaluation are out of
//! scope, as is parsing source text (the [`ast`] module is the front-end
//! contract) and the instrumentation that observes live variable values
//! (conditions only consume a caller-supplied binding map).
//!
//! ## Quick Start
//!
//! ```rust
//! use bsa_rs::ast::{Block, Expr, Stmt};
//! use bsa_rs::branches::BranchTree;
//!
//! // if x1 <= 10 { if x2 >= 5 {} else {} } else { if x2 <= 20 {} else {} }
//! let func = Block::new(vec![Stmt::if_else(
//!     Expr::le(Expr::name("x1"), Expr::num(10.0)),
//!     Block::new(vec![Stmt::if_else(
//!         Expr::ge(Expr::name("x2"), Expr::num(5.0)),
//!         Block::empty(),
//!         Block::empty(),
//!     )]),
//!     Block::new(vec![Stmt::if_else(
//!         Expr::le(Expr::name("x2"), Expr::num(20.0)),
//!         Block::empty(),
//!         Block::empty(),
//!     )]),
//! )]);
//!
//! let trees = BranchTree::from_block(&func).unwrap();
//! assert_eq!(trees.len(), 1);
//!
//! let kripkes = trees[0].as_kripke();
//! assert_eq!(kripkes.len(), 1);
//! assert_eq!(kripkes[0].states().len(), 4);
//! assert_eq!(kripkes[0].initial_states().len(), 4);
//! assert_eq!(kripkes[0].edges().len(), 12);
//! ```
//!
//! ## Core Components
//!
//! - **[`ast`]**: the statement/expression tree a front end must produce.
//! - **[`condition`]**: atomic `<=`/`>=` comparisons with closed-world
//!   inversion and partial-binding evaluation.
//! - **[`branches`]**: branch-tree extraction and conversion to Kripke
//!   structures.
//! - **[`kripke`]**: the immutable labeled-transition-system algebra
//!   (singletons, labeling, edges, bipartite join composition).
//! - **[`dot`]**: Graphviz visualization of Kripke structures.

pub mod ast;
pub mod branches;
pub mod condition;
pub mod dot;
pub mod kripke;

pub use branches::BranchTree;
pub use condition::{Bound, Comparison, Condition, ConditionError};
pub use kripke::{Edge, Kripke, KripkeError, State};
