//! Load a gating condition tree from YAML and evaluate it against a few
//! event contexts.

use rulegate_engine::conditions;
use rulegate_engine::{
    defaults, Condition, Context, GenericConditionProvider, ParseError, Relation,
};
use serde_yaml::Value as YamlValue;

const CONFIG: &str = r#"
conditions:
  - above: 20
  - any:
      - placeholder: "%biome% == DESERT"
      - ^below: 60
"#;

fn main() -> anyhow::Result<()> {
    let mut registry = GenericConditionProvider::empty()
        .add_provider(
            "above",
            |_key: Option<&str>, node: &YamlValue| -> Result<Condition, ParseError> {
                let bound = node
                    .as_i64()
                    .ok_or_else(|| ParseError::new("above requires a number"))?;
                Ok(Condition::of_aliased(
                    move |ctx: &mut Context| Ok(ctx.must_int("player_y")? > bound),
                    format!("y > {bound}"),
                ))
            },
        )
        .add_provider(
            "below",
            |_key: Option<&str>, node: &YamlValue| -> Result<Condition, ParseError> {
                let bound = node
                    .as_i64()
                    .ok_or_else(|| ParseError::new("below requires a number"))?;
                Ok(Condition::of_aliased(
                    move |ctx: &mut Context| Ok(ctx.must_int("player_y")? < bound),
                    format!("y < {bound}"),
                ))
            },
        );
    for (key, entry) in defaults::all() {
        registry = registry.add_entry(key, entry);
    }

    let config: YamlValue = serde_yaml::from_str(CONFIG)?;
    let tree = conditions::from_node(
        config.get("conditions").expect("conditions key"),
        Relation::And,
        &registry,
    )?;

    println!("loaded: {}", tree.alias());

    let events = [
        ("desert miner", Context::of("player_y", 42).with("biome", "DESERT")),
        ("taiga miner", Context::of("player_y", 42).with("biome", "TAIGA")),
        ("high taiga miner", Context::of("player_y", 80).with("biome", "TAIGA")),
        ("cave dweller", Context::of("player_y", 5).with("biome", "DESERT")),
    ];

    for (label, mut ctx) in events {
        println!("{label}: {}", tree.matches(&mut ctx)?);
    }

    Ok(())
}
