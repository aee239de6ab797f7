//! Condition providers: named constructors from configuration nodes
//!
//! A provider turns a raw configuration node into a [`Condition`]. Providers
//! register under string keys in a [`GenericConditionProvider`], which also
//! supports `/`-namespaced dispatch into nested providers and an optional
//! context extender applied to every condition it loads.

use rulegate_conditional::{Condition, Extender, Relation};
use rulegate_core::error::{EvalResult, ParseResult};
use rulegate_core::{Context, ParseError};
use serde_yaml::Value as YamlValue;
use std::collections::HashMap;
use std::sync::Arc;

use crate::conditions;

/// Turns a configuration node into a condition.
///
/// `key` is the remaining (namespace-stripped) configuration key, `None`
/// when the node arrived as a bare value. Implemented by closures of the
/// matching shape, so providers register directly as functions.
pub trait ConditionProvider: Send + Sync {
    fn load(&self, key: Option<&str>, node: &YamlValue) -> ParseResult<Condition>;
}

impl<F> ConditionProvider for F
where
    F: Fn(Option<&str>, &YamlValue) -> ParseResult<Condition> + Send + Sync,
{
    fn load(&self, key: Option<&str>, node: &YamlValue) -> ParseResult<Condition> {
        self(key, node)
    }
}

/// Scalar shape of a configuration node, used to validate provider inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
}

impl NodeKind {
    pub fn of(node: &YamlValue) -> NodeKind {
        match node {
            YamlValue::Null => NodeKind::Null,
            YamlValue::Bool(_) => NodeKind::Bool,
            YamlValue::Number(_) => NodeKind::Number,
            YamlValue::String(_) => NodeKind::String,
            YamlValue::Sequence(_) => NodeKind::Sequence,
            YamlValue::Mapping(_) => NodeKind::Mapping,
            YamlValue::Tagged(tagged) => NodeKind::of(&tagged.value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "bool",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Sequence => "sequence",
            NodeKind::Mapping => "mapping",
        }
    }
}

/// A registered provider plus the node kinds it accepts.
#[derive(Clone)]
pub struct ProviderEntry {
    provider: Arc<dyn ConditionProvider>,
    kinds: Vec<NodeKind>,
}

impl ProviderEntry {
    pub fn of(provider: impl ConditionProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
            kinds: Vec::new(),
        }
    }

    /// Restrict the node kinds this entry accepts. An empty list (the
    /// default) accepts everything.
    pub fn expecting(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    fn check(&self, key: &str, node: &YamlValue) -> ParseResult<()> {
        if self.kinds.is_empty() {
            return Ok(());
        }
        let kind = NodeKind::of(node);
        if self.kinds.contains(&kind) {
            return Ok(());
        }
        Err(ParseError::new(format!(
            "Condition '{key}' cannot be loaded from a {} node ({}).",
            kind.name(),
            conditions::render_node(node),
        )))
    }
}

/// Keyed collection of named condition providers.
///
/// Dispatches `a/b` keys into nested providers; with no key, structured
/// nodes load through the tree loader under an AND relation. When an
/// extender is set, every loaded condition is wrapped so the extension runs
/// before the condition is matched.
#[derive(Clone, Default)]
pub struct GenericConditionProvider {
    providers: HashMap<String, ProviderEntry>,
    extender: Option<Extender>,
}

impl GenericConditionProvider {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a provider under a key.
    pub fn add_provider(
        self,
        key: impl Into<String>,
        provider: impl ConditionProvider + 'static,
    ) -> Self {
        self.add_entry(key, ProviderEntry::of(provider))
    }

    /// Register a provider entry under a key.
    pub fn add_entry(mut self, key: impl Into<String>, entry: ProviderEntry) -> Self {
        self.providers.insert(key.into(), entry);
        self
    }

    /// Set the context extender applied before any condition built by this
    /// provider is matched.
    pub fn extender<F>(mut self, extend: F) -> Self
    where
        F: Fn(&Context) -> EvalResult<Context> + Send + Sync + 'static,
    {
        self.extender = Some(Arc::new(extend));
        self
    }

    fn apply_extender(&self, condition: Condition) -> Condition {
        match &self.extender {
            Some(extender) => Condition::wrap_shared(condition, Arc::clone(extender)),
            None => condition,
        }
    }
}

impl ConditionProvider for GenericConditionProvider {
    fn load(&self, key: Option<&str>, node: &YamlValue) -> ParseResult<Condition> {
        let Some(key) = key else {
            // A bare value carries no key to dispatch on; structured nodes
            // still load as a nested tree.
            if matches!(node, YamlValue::Sequence(_) | YamlValue::Mapping(_)) {
                let condition = conditions::from_node_multiple(node, Relation::And, self)?;
                return Ok(self.apply_extender(condition));
            }
            return Err(ParseError::soft(format!(
                "Cannot load a condition from a single value ({}).",
                conditions::render_node(node),
            )));
        };

        let (head, rest) = match key.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (key, None),
        };

        let entry = self
            .providers
            .get(head)
            .ok_or_else(|| ParseError::new(format!("Unknown condition '{head}'.")))?;
        entry.check(head, node)?;

        let mut condition = entry.provider.load(rest, node)?;
        // Conditions without an explicit alias render as their registry key.
        if condition.explicit_alias().is_none() {
            condition = condition.with_alias(head);
        }
        Ok(self.apply_extender(condition))
    }
}
