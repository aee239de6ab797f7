//! Rulegate Conditional - composable boolean predicates over a context
//!
//! A [`Condition`] is a tree of predicates built once at configuration-load
//! time and evaluated repeatedly against per-event [`Context`] instances.
//! Trees compose with [`Condition::and`]/[`Condition::or`], negate with
//! [`Condition::negate`], and render themselves as short aliases or
//! human-readable labels.
//!
//! [`Context`]: rulegate_core::Context

pub mod condition;
pub mod relation;

pub use condition::{Condition, Extender, Predicate};
pub use relation::Relation;
