//! Rulegate Engine - configuration-driven condition loading
//!
//! Turns decoded configuration nodes into executable [`Condition`] trees:
//! - an expression sublanguage for two-operand relational comparisons with
//!   constant folding and placeholder variables
//! - a provider registry mapping configuration keys to condition
//!   constructors, with `/` namespacing and per-provider context extension
//! - a recursive tree loader handling `all`/`any` composition and `^`
//!   negation prefixes
//!
//! The engine consumes already-decoded `serde_yaml` nodes; it has no file
//! format of its own.

pub mod conditions;
pub mod defaults;
pub mod expression;
pub mod provider;
pub mod template;

pub use expression::{Expression, ExpressionParser, Operand, Operator, Variable};
pub use provider::{ConditionProvider, GenericConditionProvider, NodeKind, ProviderEntry};
pub use template::{ContextTemplater, Templater};

// The building blocks consumers need alongside the engine.
pub use rulegate_conditional::{Condition, Relation};
pub use rulegate_core::{Context, EvalError, ParseError, Value};
