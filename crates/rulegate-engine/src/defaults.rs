//! Built-in condition providers

use rand::Rng;
use rulegate_conditional::Condition;
use rulegate_core::error::ParseResult;
use rulegate_core::{Context, ParseError};
use serde_yaml::Value as YamlValue;

use crate::conditions::render_node;
use crate::expression::Expression;
use crate::provider::{NodeKind, ProviderEntry};

/// `placeholder` — a relational expression over placeholder variables.
///
/// Either side can be a constant; variable types are figured out when the
/// expression is evaluated. Examples:
/// `"%player_y% > 20"`, `"30 > %player_y%"`, `"%biome% == DESERT"`.
pub fn placeholder() -> (&'static str, ProviderEntry) {
    (
        "placeholder",
        ProviderEntry::of(|_key: Option<&str>, node: &YamlValue| -> ParseResult<Condition> {
            let input = node.as_str().ok_or_else(|| {
                ParseError::new(format!(
                    "Placeholder condition requires an expression string ({}).",
                    render_node(node),
                ))
            })?;

            let expression = Expression::from(input)?;
            tracing::debug!("Loaded placeholder expression {expression:?}");

            let alias = expression.pretty();
            Ok(
                Condition::of(move |ctx: &mut Context| expression.evaluate(ctx))
                    .with_alias(alias),
            )
        })
        .expecting([NodeKind::String]),
    )
}

/// `chance` — a uniform percentage roll against the shared random source.
pub fn chance() -> (&'static str, ProviderEntry) {
    (
        "chance",
        ProviderEntry::of(|_key: Option<&str>, node: &YamlValue| -> ParseResult<Condition> {
            let percent = parse_percent(node)?;
            let alias = format!("chance ({percent}%)");
            Ok(
                Condition::of(move |_ctx: &mut Context| {
                    Ok(rand::thread_rng().gen::<f64>() < percent / 100.0)
                })
                .with_alias(alias),
            )
        })
        .expecting([NodeKind::Number, NodeKind::String]),
    )
}

fn parse_percent(node: &YamlValue) -> ParseResult<f64> {
    let percent = match node {
        YamlValue::Number(number) => number.as_f64(),
        YamlValue::String(text) => text.trim().trim_end_matches('%').parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| {
        ParseError::new(format!(
            "Chance must be a number ({}).",
            render_node(node),
        ))
    })?;

    if !(0.0..=100.0).contains(&percent) {
        return Err(ParseError::new(format!(
            "Chance must be between 0 and 100, got {percent}."
        )));
    }
    Ok(percent)
}

/// All built-in providers, ready for registration.
pub fn all() -> Vec<(&'static str, ProviderEntry)> {
    vec![placeholder(), chance()]
}
