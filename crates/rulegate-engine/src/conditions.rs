//! Tree loader: builds condition trees from decoded configuration nodes
//!
//! A node can be a sequence, a mapping or a bare scalar. Mapping keys
//! dispatch to registered providers; the reserved `all`/`any` keys open a
//! nested composition scope, and a `^` prefix negates the loaded condition.

use rulegate_conditional::{Condition, Relation};
use rulegate_core::error::{EvalResult, ParseResult};
use rulegate_core::{Context, ParseError};
use serde_yaml::{Mapping, Value as YamlValue};

use crate::provider::ConditionProvider;

/// Key prefix that negates the condition loaded for the entry.
const NEGATION_MARKER: char = '^';

/// Load a condition from any node shape. A bare scalar delegates straight
/// to the provider with no key.
///
/// `relation` applies only to conditions gathered at this level; nested
/// `all`/`any` sections introduce their own relation scope.
pub fn from_node(
    node: &YamlValue,
    relation: Relation,
    provider: &dyn ConditionProvider,
) -> ParseResult<Condition> {
    match node {
        YamlValue::Sequence(nodes) => from_list(nodes, relation, provider),
        YamlValue::Mapping(map) => from_map(map, relation, provider),
        _ => provider.load(None, node),
    }
}

/// Load a condition from a sequence or mapping node; bare scalars are
/// rejected with a hard parse error.
pub fn from_node_multiple(
    node: &YamlValue,
    relation: Relation,
    provider: &dyn ConditionProvider,
) -> ParseResult<Condition> {
    match node {
        YamlValue::Sequence(nodes) => from_list(nodes, relation, provider),
        YamlValue::Mapping(map) => from_map(map, relation, provider),
        _ => Err(ParseError::new(format!(
            "Node cannot be loaded from a single value ({}).",
            render_node(node),
        ))),
    }
}

/// Load a composed condition from a sequence of nodes. Mapping elements
/// recurse with an AND relation of their own; scalar elements delegate to
/// the provider with no key.
pub fn from_list(
    nodes: &[YamlValue],
    relation: Relation,
    provider: &dyn ConditionProvider,
) -> ParseResult<Condition> {
    let mut conditions = Vec::with_capacity(nodes.len());

    for node in nodes {
        let condition = match node {
            YamlValue::Mapping(map) => from_map(map, Relation::And, provider)?,
            _ => provider.load(None, node)?,
        };
        conditions.push(condition);
    }

    Ok(compose(relation, conditions))
}

/// Load a composed condition from a mapping node, entry by entry in
/// document order.
pub fn from_map(
    map: &Mapping,
    relation: Relation,
    provider: &dyn ConditionProvider,
) -> ParseResult<Condition> {
    let mut conditions = Vec::with_capacity(map.len());

    for (key_node, value) in map {
        let key = key_node.as_str().ok_or_else(|| {
            ParseError::new(format!(
                "Condition keys must be strings ({}).",
                render_node(key_node),
            ))
        })?;

        let (key, negate) = match key.strip_prefix(NEGATION_MARKER) {
            Some(stripped) => (stripped, true),
            None => (key, false),
        };

        let condition = if key.eq_ignore_ascii_case("all") || key.eq_ignore_ascii_case("any") {
            let nodes = value.as_sequence().ok_or_else(|| {
                ParseError::new(format!(
                    "Invalid entry for {} section ({}).",
                    key.to_ascii_lowercase(),
                    render_node(value),
                ))
            })?;
            let nested = if key.eq_ignore_ascii_case("any") {
                Relation::Or
            } else {
                Relation::And
            };
            from_list(nodes, nested, provider)?
        } else {
            provider.load(Some(key), value)?
        };

        conditions.push(if negate { condition.negate() } else { condition });
    }

    Ok(compose(relation, conditions))
}

fn compose(relation: Relation, conditions: Vec<Condition>) -> Condition {
    match relation {
        Relation::Or => Condition::any_of(conditions),
        Relation::And => Condition::all_of(conditions),
    }
}

/// Merge contexts by copying entries in argument order; later contexts take
/// preference on key conflict.
pub fn merge(contexts: impl IntoIterator<Item = Context>) -> Context {
    Context::merge(contexts)
}

/// Wrap a condition so `extender` runs before each match.
pub fn wrap<F>(condition: Condition, extender: F) -> Condition
where
    F: Fn(&Context) -> EvalResult<Context> + Send + Sync + 'static,
{
    Condition::wrap(condition, extender)
}

/// Compact single-line rendering of a node for error messages.
pub(crate) fn render_node(node: &YamlValue) -> String {
    match serde_yaml::to_string(node) {
        Ok(rendered) => rendered.trim_end().replace('\n', " "),
        Err(_) => format!("{node:?}"),
    }
}
