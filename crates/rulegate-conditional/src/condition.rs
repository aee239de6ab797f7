//! Condition tree nodes and their evaluation semantics

use rulegate_core::error::EvalResult;
use rulegate_core::Context;
use std::fmt;
use std::sync::Arc;

use crate::relation::Relation;

/// Stored predicate of a leaf condition. Predicates may write derived values
/// into the context for downstream predicates of the same tree.
pub type Predicate = Arc<dyn Fn(&mut Context) -> EvalResult<bool> + Send + Sync>;

/// Context extension function invoked by a wrapper before its inner
/// condition is matched.
pub type Extender = Arc<dyn Fn(&Context) -> EvalResult<Context> + Send + Sync>;

mod aliases {
    pub const DEFAULT_VARIABLE: &str = "X";
    pub const DEFAULT_CONSTANT: &str = "C";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
}

/// A composable boolean predicate over a [`Context`].
///
/// Built once from configuration or code, then evaluated repeatedly through
/// [`Condition::matches`]. Negation is a property of the node and never
/// mutates children.
#[derive(Clone)]
pub struct Condition {
    kind: Kind,
    alias: Option<String>,
    pretty: Option<String>,
    negate: bool,
}

#[derive(Clone)]
enum Kind {
    Leaf(Predicate),
    Composed {
        relation: Relation,
        children: Vec<Condition>,
    },
    Wrapper {
        inner: Box<Condition>,
        extender: Extender,
    },
}

impl Condition {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            alias: None,
            pretty: None,
            negate: false,
        }
    }

    /// Create a leaf condition from a predicate function.
    pub fn of<F>(predicate: F) -> Self
    where
        F: Fn(&mut Context) -> EvalResult<bool> + Send + Sync + 'static,
    {
        Self::new(Kind::Leaf(Arc::new(predicate)))
    }

    /// Create an aliased leaf condition from a predicate function.
    pub fn of_aliased<F>(predicate: F, alias: impl Into<String>) -> Self
    where
        F: Fn(&mut Context) -> EvalResult<bool> + Send + Sync + 'static,
    {
        Self::of(predicate).with_alias(alias)
    }

    /// A condition that always matches.
    pub fn truthy() -> Self {
        Self::constant_aliased(true, aliases::TRUE)
    }

    /// A condition that never matches.
    pub fn falsy() -> Self {
        Self::constant_aliased(false, aliases::FALSE)
    }

    pub fn constant(value: bool) -> Self {
        Self::constant_aliased(value, aliases::DEFAULT_CONSTANT)
    }

    pub fn constant_aliased(value: bool, alias: impl Into<String>) -> Self {
        Self::of_aliased(move |_ctx| Ok(value), alias)
    }

    /// Compose conditions under an AND relation.
    pub fn all_of(conditions: Vec<Condition>) -> Self {
        Self::composed(Relation::And, conditions)
    }

    /// Compose conditions under an OR relation.
    pub fn any_of(conditions: Vec<Condition>) -> Self {
        Self::composed(Relation::Or, conditions)
    }

    fn composed(relation: Relation, children: Vec<Condition>) -> Self {
        Self::new(Kind::Composed { relation, children })
    }

    /// Wrap a condition so `extender` runs on the inbound context before the
    /// inner condition is matched. The extension result is merged with the
    /// original context; the original's keys win on conflict.
    pub fn wrap<F>(inner: Condition, extender: F) -> Self
    where
        F: Fn(&Context) -> EvalResult<Context> + Send + Sync + 'static,
    {
        Self::wrap_shared(inner, Arc::new(extender))
    }

    /// [`Condition::wrap`] for an already-shared extender.
    pub fn wrap_shared(inner: Condition, extender: Extender) -> Self {
        Self::new(Kind::Wrapper {
            inner: Box::new(inner),
            extender,
        })
    }

    /// Evaluate this condition against a context. The negation flag is
    /// applied to the inner match result, outside any folded logic.
    pub fn matches(&self, ctx: &mut Context) -> EvalResult<bool> {
        Ok(self.negate ^ self.eval(ctx)?)
    }

    fn eval(&self, ctx: &mut Context) -> EvalResult<bool> {
        match &self.kind {
            Kind::Leaf(predicate) => predicate(ctx),
            Kind::Composed { relation, children } => match relation {
                Relation::And => {
                    for child in children {
                        if !child.matches(ctx)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }
                Relation::Or => {
                    for child in children {
                        if child.matches(ctx)? {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                }
            },
            Kind::Wrapper { inner, extender } => {
                let mut context = Self::extended(ctx, extender);
                inner.matches(&mut context)
            }
        }
    }

    // An extender failure degrades to the unmodified original context
    // instead of failing the whole match.
    fn extended(original: &Context, extender: &Extender) -> Context {
        match extender(original) {
            Ok(extension) => Context::merge([extension, original.clone()]),
            Err(err) => {
                tracing::error!("Failed to run extender for condition: {err}");
                original.clone()
            }
        }
    }

    /// Combine with another condition under AND. When `self` is already an
    /// AND composition, `condition` is appended to it instead of nesting a
    /// new binary node.
    pub fn and(self, condition: Condition) -> Condition {
        self.compose(Relation::And, condition)
    }

    /// Combine with another condition under OR. Appends into an existing OR
    /// composition like [`Condition::and`] does.
    pub fn or(self, condition: Condition) -> Condition {
        self.compose(Relation::Or, condition)
    }

    fn compose(mut self, relation: Relation, condition: Condition) -> Condition {
        if let Kind::Composed {
            relation: existing,
            children,
        } = &mut self.kind
        {
            if *existing == relation {
                children.push(condition);
                return self;
            }
        }
        Condition::composed(relation, vec![self, condition])
    }

    /// Toggle the negation flag.
    pub fn negate(mut self) -> Condition {
        self.negate = !self.negate;
        self
    }

    /// Explicitly set alias.
    pub fn explicit_alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Explicitly set pretty label.
    pub fn explicit_pretty(&self) -> Option<&str> {
        self.pretty.as_deref()
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_pretty(mut self, pretty: impl Into<String>) -> Self {
        self.pretty = Some(pretty.into());
        self
    }

    /// Short machine-readable label. Derived from the current structure
    /// when no explicit alias is set.
    pub fn alias(&self) -> String {
        match &self.kind {
            Kind::Leaf(_) => {
                let alias = self.alias.as_deref().unwrap_or(aliases::DEFAULT_VARIABLE);
                if self.negate {
                    format!("!{alias}")
                } else {
                    alias.to_string()
                }
            }
            Kind::Composed { relation, children } => match &self.alias {
                Some(alias) => alias.clone(),
                None => derived_alias(*relation, children),
            },
            Kind::Wrapper { inner, .. } => inner.alias(),
        }
    }

    /// Human-readable label. Falls back to [`Condition::alias`] for leaves
    /// without an explicit pretty label.
    pub fn pretty(&self) -> String {
        match &self.kind {
            Kind::Leaf(_) => {
                let pretty = self.pretty.clone().unwrap_or_else(|| self.alias());
                if self.negate {
                    format!("not {pretty}")
                } else {
                    pretty
                }
            }
            Kind::Composed { relation, children } => match &self.pretty {
                Some(pretty) => pretty.clone(),
                None => derived_pretty(*relation, children),
            },
            Kind::Wrapper { inner, .. } => inner.pretty(),
        }
    }
}

// Children's aliases joined by the relation keyword, parenthesized only
// for two or more children.
fn derived_alias(relation: Relation, children: &[Condition]) -> String {
    let joined = children
        .iter()
        .map(Condition::alias)
        .collect::<Vec<_>>()
        .join(&format!(" {relation} "));
    if children.len() < 2 {
        joined
    } else {
        format!("({joined})")
    }
}

fn derived_pretty(relation: Relation, children: &[Condition]) -> String {
    children
        .iter()
        .map(Condition::pretty)
        .collect::<Vec<_>>()
        .join(&format!(" {relation} "))
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Condition{{alias={}, pretty={}}}",
            self.alias(),
            self.pretty()
        )
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorbs_same_relation() {
        let chained = Condition::truthy()
            .and(Condition::truthy())
            .and(Condition::truthy());
        assert_eq!(chained.alias(), "(true and true and true)");
    }

    #[test]
    fn test_allocates_on_relation_switch() {
        let mixed = Condition::truthy()
            .and(Condition::truthy())
            .or(Condition::falsy());
        assert_eq!(mixed.alias(), "((true and true) or false)");
    }

    #[test]
    fn test_single_child_composition_is_unparenthesized() {
        let single = Condition::all_of(vec![Condition::truthy()]);
        assert_eq!(single.alias(), "true");
    }

    #[test]
    fn test_negated_leaf_alias() {
        let negated = Condition::of_aliased(|_ctx| Ok(true), "above").negate();
        assert_eq!(negated.alias(), "!above");
    }

    #[test]
    fn test_pretty_falls_back_to_alias() {
        let condition = Condition::of_aliased(|_ctx| Ok(true), "above");
        assert_eq!(condition.pretty(), "above");

        let labeled = Condition::of_aliased(|_ctx| Ok(true), "above").with_pretty("value above 2");
        assert_eq!(labeled.pretty(), "value above 2");
        assert_eq!(labeled.negate().pretty(), "not value above 2");
    }
}
