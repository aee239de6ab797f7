//! Integration tests for the relational expression sublanguage.

use rulegate_engine::{Context, EvalError, Expression, Operand, ParseError, Value};

#[test]
fn constant_expressions_evaluate_without_context() {
    let expression = Expression::from("10 > 5").unwrap();

    assert!(expression.is_constant());
    assert!(expression.evaluate(&Context::empty()).unwrap());
    assert!(expression
        .evaluate(&Context::of("unrelated", "noise"))
        .unwrap());
}

#[test]
fn all_operators_parse_and_evaluate() {
    let cases = [
        ("1 < 2", true),
        ("2 <= 2", true),
        ("3 > 4", false),
        ("4 >= 4", true),
        ("5 == 5.0", true),
        ("5 != 5", false),
    ];

    for (input, expected) in cases {
        let expression = Expression::from(input).unwrap();
        assert_eq!(
            expression.evaluate(&Context::empty()).unwrap(),
            expected,
            "{input}"
        );
    }
}

#[test]
fn variables_resolve_on_each_evaluation() {
    let expression = Expression::from("%player_y% > 20").unwrap();

    assert!(expression.evaluate(&Context::of("player_y", 30)).unwrap());
    assert!(!expression.evaluate(&Context::of("player_y", 10)).unwrap());

    // Constant on the left works just as well.
    let flipped = Expression::from("30 > %player_y%").unwrap();
    assert!(flipped.evaluate(&Context::of("player_y", 10)).unwrap());
}

#[test]
fn string_equality_works_through_variables() {
    let expression = Expression::from("%biome% == DESERT").unwrap();

    assert!(expression.evaluate(&Context::of("biome", "DESERT")).unwrap());
    assert!(!expression.evaluate(&Context::of("biome", "TAIGA")).unwrap());
}

#[test]
fn time_of_day_constants_order_chronologically() {
    let expression = Expression::from("08:30:00 < 17:00:00").unwrap();
    assert!(expression.is_constant());
    assert!(expression.evaluate(&Context::empty()).unwrap());
}

#[test]
fn mixed_type_ordering_is_an_error_not_false() {
    let expression = Expression::from("%name% > 5").unwrap();

    let result = expression.evaluate(&Context::of("name", "abc"));
    assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
}

#[test]
fn malformed_expressions_fail_to_parse() {
    assert!(Expression::from("").is_err());
    assert!(Expression::from("10").is_err());
    assert!(Expression::from("10 !! 5").is_err());
}

#[test]
fn custom_operands_must_resolve_at_least_one_side() {
    let resolver = |token: &str| -> Result<Operand, ParseError> {
        match token.strip_prefix('@') {
            Some(key) => {
                let key = key.to_string();
                Ok(Operand::resolver(move |ctx: &Context| {
                    Ok(Value::Int(ctx.must_int(&key)?))
                }))
            }
            None => Err(ParseError::new(format!("'{token}' is not a reference"))),
        }
    };

    let expression = Expression::with_custom_operands(resolver, "@fortune >= 2").unwrap();
    assert!(expression.evaluate(&Context::of("fortune", 3)).unwrap());

    let err = Expression::with_custom_operands(resolver, "1 >= 2").unwrap_err();
    assert!(err.to_string().contains("1 >= 2"));
}
