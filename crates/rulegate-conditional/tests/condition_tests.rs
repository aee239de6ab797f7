//! Behavioral tests for condition trees: evaluation, composition,
//! short-circuiting, negation and alias rendering.

use rulegate_conditional::Condition;
use rulegate_core::{Context, EvalError};

#[test]
fn evaluates_single_value_conditions() {
    let mut ctx = Context::empty();

    assert!(Condition::truthy().matches(&mut ctx).unwrap());
    assert!(!Condition::falsy().matches(&mut ctx).unwrap());
    assert!(!Condition::constant(false).matches(&mut ctx).unwrap());
}

#[test]
fn evaluates_single_layer_stacked_conditions() {
    let mut ctx = Context::empty();

    // true and (false or false)
    let c1 = Condition::truthy().and(Condition::falsy().or(Condition::falsy()));
    assert!(!c1.matches(&mut ctx).unwrap());

    // true or (false and false)
    let c2 = Condition::truthy().or(Condition::falsy().and(Condition::falsy()));
    assert!(c2.matches(&mut ctx).unwrap());
}

#[test]
fn evaluates_based_on_context_values() {
    let mut ctx = Context::of("value", 10);
    let condition = Condition::of(|ctx: &mut Context| Ok(ctx.must_int("value")? > 5));
    assert!(condition.matches(&mut ctx).unwrap());
}

#[test]
fn preserves_context_writes() {
    let condition = Condition::of(|ctx: &mut Context| {
        ctx.set("from_condition", true);
        Ok(true)
    });

    let mut ctx = Context::of("hello", "world");

    assert!(condition.matches(&mut ctx).unwrap());
    assert_eq!(ctx.get_bool("from_condition"), Some(true));
}

#[test]
fn and_short_circuits_on_first_false() {
    let first = Condition::of(|_ctx: &mut Context| Ok(false));
    let second = Condition::of(|ctx: &mut Context| {
        ctx.set("second_called", true);
        Ok(true)
    });

    let mut ctx = Context::empty();
    assert!(!first.and(second).matches(&mut ctx).unwrap());
    assert!(!ctx.contains("second_called"));
}

#[test]
fn or_short_circuits_on_first_true() {
    let first = Condition::of(|_ctx: &mut Context| Ok(true));
    let second = Condition::of(|ctx: &mut Context| {
        ctx.set("second_called", true);
        Ok(false)
    });

    let mut ctx = Context::empty();
    assert!(first.or(second).matches(&mut ctx).unwrap());
    assert!(!ctx.contains("second_called"));
}

#[test]
fn empty_compositions_are_vacuous() {
    let mut ctx = Context::empty();

    assert!(Condition::all_of(Vec::new()).matches(&mut ctx).unwrap());
    assert!(!Condition::any_of(Vec::new()).matches(&mut ctx).unwrap());
}

#[test]
fn double_negation_restores_the_original_result() {
    let mut ctx = Context::of("value", 10);

    let condition = Condition::of(|ctx: &mut Context| Ok(ctx.must_int("value")? > 5));
    let original = condition.clone().matches(&mut ctx).unwrap();
    let toggled_twice = condition.negate().negate().matches(&mut ctx).unwrap();

    assert_eq!(original, toggled_twice);
}

#[test]
fn negation_applies_to_composed_results() {
    let mut ctx = Context::empty();

    let condition = Condition::truthy().and(Condition::falsy()).negate();
    assert!(condition.matches(&mut ctx).unwrap());
}

#[test]
fn predicate_errors_propagate() {
    let condition = Condition::of(|ctx: &mut Context| Ok(ctx.must_int("value")? > 5));

    let mut ctx = Context::empty();
    assert!(matches!(
        condition.matches(&mut ctx),
        Err(EvalError::MissingKey(key)) if key == "value"
    ));
}

#[test]
fn generates_correct_aliases() {
    let c = Condition::truthy().and(Condition::truthy());
    assert_eq!(c.alias(), "(true and true)");

    let aliased = Condition::constant_aliased(true, "AlwaysTrue").and(Condition::truthy());
    assert_eq!(aliased.alias(), "(AlwaysTrue and true)");

    let stacked = Condition::truthy()
        .and(Condition::constant_aliased(true, "InnerTruth").or(Condition::falsy()));
    assert_eq!(stacked.alias(), "(true and (InnerTruth or false))");
}

#[test]
fn chained_composition_stays_flat() {
    let chained = Condition::truthy()
        .and(Condition::truthy())
        .and(Condition::truthy());
    assert_eq!(chained.alias(), "(true and true and true)");
}

#[test]
fn wrapper_extends_the_context_before_matching() {
    let condition = Condition::wrap(
        Condition::of_aliased(|ctx: &mut Context| Ok(ctx.must_float("sqrt")? > 2.0), "sqrt > 2"),
        |ctx: &Context| {
            let value = ctx.must_int("value")?;
            Ok(Context::of("sqrt", (value as f64).sqrt()))
        },
    );

    assert_eq!(condition.alias(), "sqrt > 2");
    assert!(condition.matches(&mut Context::of("value", 9)).unwrap());
    assert!(!condition.matches(&mut Context::of("value", 4)).unwrap());
}

#[test]
fn wrapper_failure_degrades_to_the_original_context() {
    let condition = Condition::wrap(
        Condition::of(|ctx: &mut Context| Ok(ctx.must_int("value")? > 5)),
        |_ctx: &Context| Err(EvalError::Evaluation("boom".to_string())),
    );

    // The extender failed, the original context still drives the match.
    assert!(condition.matches(&mut Context::of("value", 10)).unwrap());
    assert!(!condition.matches(&mut Context::of("value", 1)).unwrap());
}

#[test]
fn wrapper_merge_prefers_the_original_context() {
    let condition = Condition::wrap(
        Condition::of(|ctx: &mut Context| Ok(ctx.must_int("value")? == 1)),
        |_ctx: &Context| Ok(Context::of("value", 999)),
    );

    // "value" exists in both; the original entry wins the merge.
    assert!(condition.matches(&mut Context::of("value", 1)).unwrap());
}
