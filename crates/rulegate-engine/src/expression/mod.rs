//! Two-operand relational expression sublanguage
//!
//! Grammar: `<left> <op> <right>` with `<op>` one of `>=`, `<=`, `==`, `!=`,
//! `<`, `>`. Operands are constants (int, float, time-of-day, string),
//! placeholder variables, or caller-supplied resolvers. Expressions whose
//! operands are both constant fold to a cached boolean at construction and
//! never touch the context again.

pub mod operand;
pub mod operator;

pub use operand::{Operand, OperandFn, Variable};
pub use operator::Operator;

use rulegate_core::error::{EvalResult, ParseResult};
use rulegate_core::{Context, ParseError, Value};
use std::fmt;
use std::sync::Arc;

use crate::template::{contains_placeholder, ContextTemplater, Templater};

/// A parsed two-operand relational comparison.
#[derive(Clone)]
pub struct Expression {
    left: Operand,
    right: Operand,
    operator: Operator,
    static_result: Option<bool>,
}

impl Expression {
    /// Build an expression, folding it immediately when both operands are
    /// constant. A fold failure is a construction-time error.
    pub fn of(left: Operand, right: Operand, operator: Operator) -> ParseResult<Expression> {
        let mut expression = Expression {
            left,
            right,
            operator,
            static_result: None,
        };

        if expression.is_constant() {
            let result = expression
                .compute(&Context::empty())
                .map_err(|err| ParseError::new(format!("Failed to evaluate '{expression}': {err}")))?;
            tracing::debug!("Expression {expression} evaluated statically to {result}");
            expression.static_result = Some(result);
        }

        Ok(expression)
    }

    /// Parse an expression with the default operand parser.
    pub fn from(input: &str) -> ParseResult<Expression> {
        ExpressionParser::default().parse(input)
    }

    /// Parse an expression, trying a caller-supplied operand resolver on
    /// each side before falling back to constant parsing.
    pub fn with_custom_operands<F>(resolver: F, input: &str) -> ParseResult<Expression>
    where
        F: Fn(&str) -> ParseResult<Operand>,
    {
        ExpressionParser::default().parse_with_operands(resolver, input)
    }

    /// True iff both operands are constants.
    pub fn is_constant(&self) -> bool {
        self.left.is_constant() && self.right.is_constant()
    }

    /// Evaluate the expression against a context. Folded expressions return
    /// their cached result without touching the operands or the context.
    pub fn evaluate(&self, ctx: &Context) -> EvalResult<bool> {
        if let Some(result) = self.static_result {
            return Ok(result);
        }
        self.compute(ctx)
    }

    fn compute(&self, ctx: &Context) -> EvalResult<bool> {
        let left = self.left.value(ctx)?;
        let right = self.right.value(ctx)?;
        tracing::debug!("Evaluate {self}: {left} {} {right}", self.operator);
        self.operator.evaluate(&left, &right)
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Render the expression roughly as it was written.
    pub fn pretty(&self) -> String {
        format!("{} {} {}", self.left, self.operator.symbol(), self.right)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expression{{left={:?}, operator={}, right={:?}}}",
            self.left, self.operator, self.right
        )
    }
}

/// Parses expression strings into [`Expression`]s.
///
/// Carries the placeholder delimiters and the templater handed to variable
/// operands; the default substitutes `%key%` tokens from the context.
#[derive(Clone)]
pub struct ExpressionParser {
    templater: Arc<dyn Templater>,
    open: char,
    close: char,
}

impl Default for ExpressionParser {
    fn default() -> Self {
        Self::new(Arc::new(ContextTemplater::default()))
    }
}

impl ExpressionParser {
    pub fn new(templater: Arc<dyn Templater>) -> Self {
        Self {
            templater,
            open: '%',
            close: '%',
        }
    }

    /// Override the placeholder delimiter pair.
    pub fn with_delimiters(mut self, open: char, close: char) -> Self {
        self.open = open;
        self.close = close;
        self
    }

    /// Parse `<left> <op> <right>` into an expression.
    pub fn parse(&self, input: &str) -> ParseResult<Expression> {
        let (left, operator, right) = self.split(input)?;
        let expression = Expression::of(
            self.parse_operand(left)?,
            self.parse_operand(right)?,
            operator,
        )?;
        tracing::debug!("Parsed expression: {expression:?}");
        Ok(expression)
    }

    /// Parse with a custom operand resolver tried first on each side. A side
    /// the resolver rejects falls back to constant parsing of its raw text;
    /// when both sides are rejected the whole parse fails.
    pub fn parse_with_operands<F>(&self, resolver: F, input: &str) -> ParseResult<Expression>
    where
        F: Fn(&str) -> ParseResult<Operand>,
    {
        let (left, operator, right) = self.split(input)?;

        let left_attempt = resolver(left);
        let right_attempt = resolver(right);

        if let (Err(left_err), Err(right_err)) = (&left_attempt, &right_attempt) {
            return Err(ParseError::new(format!(
                "No custom operand in expression '{input}'. Left: {left_err} Right: {right_err}"
            )));
        }

        let left = left_attempt.unwrap_or_else(|_| Operand::Constant(Value::parse_scalar(left)));
        let right = right_attempt.unwrap_or_else(|_| Operand::Constant(Value::parse_scalar(right)));

        Expression::of(left, right, operator)
    }

    /// Parse a single operand token: a variable when it contains a
    /// placeholder, a constant through the scalar ladder otherwise.
    pub fn parse_operand(&self, token: &str) -> ParseResult<Operand> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ParseError::new("Operand input cannot be empty."));
        }

        if contains_placeholder(trimmed, self.open, self.close) {
            Ok(Operand::Variable(Variable::new(
                trimmed,
                Arc::clone(&self.templater),
            )))
        } else {
            Ok(Operand::Constant(Value::parse_scalar(trimmed)))
        }
    }

    // Two-phase scan: walk the input left to right and try the operator
    // symbols at every position, longest symbols first.
    fn split<'a>(&self, input: &'a str) -> ParseResult<(&'a str, Operator, &'a str)> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::new("Expression input cannot be empty."));
        }

        for (index, _) in trimmed.char_indices() {
            for (symbol, operator) in Operator::SYMBOLS {
                if trimmed[index..].starts_with(symbol) {
                    let left = trimmed[..index].trim();
                    let right = trimmed[index + symbol.len()..].trim();

                    if left.is_empty() || right.is_empty() {
                        return Err(ParseError::new(format!("Invalid expression '{input}'")));
                    }
                    return Ok((left, operator, right));
                }
            }
        }

        Err(ParseError::new(format!("Invalid expression '{input}'")))
    }
}
