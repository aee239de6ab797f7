//! Operands: the leaf value sources of an expression

use rulegate_core::error::EvalResult;
use rulegate_core::{Context, Value};
use std::fmt;
use std::sync::Arc;

use crate::template::Templater;

/// Caller-supplied operand resolver, e.g. "level of enchantment X".
pub type OperandFn = Arc<dyn Fn(&Context) -> EvalResult<Value> + Send + Sync>;

/// A value source in an expression.
#[derive(Clone)]
pub enum Operand {
    /// Fixed value resolved once at parse time.
    Constant(Value),
    /// Placeholder text resolved against the context on every evaluation.
    Variable(Variable),
    /// Domain-specific resolver plugged in through custom operand parsing.
    Resolver(OperandFn),
}

impl Operand {
    pub fn constant(value: impl Into<Value>) -> Self {
        Operand::Constant(value.into())
    }

    pub fn resolver<F>(resolve: F) -> Self
    where
        F: Fn(&Context) -> EvalResult<Value> + Send + Sync + 'static,
    {
        Operand::Resolver(Arc::new(resolve))
    }

    /// Whether this operand resolves independently of any context.
    pub fn is_constant(&self) -> bool {
        matches!(self, Operand::Constant(_))
    }

    /// Resolve the operand against a context.
    pub fn value(&self, ctx: &Context) -> EvalResult<Value> {
        match self {
            Operand::Constant(value) => Ok(value.clone()),
            Operand::Variable(variable) => variable.resolve(ctx),
            Operand::Resolver(resolve) => resolve(ctx),
        }
    }
}

/// Raw placeholder text plus the templater that resolves it. The resolved
/// text is re-typed through the scalar parse ladder on every evaluation.
#[derive(Clone)]
pub struct Variable {
    content: String,
    templater: Arc<dyn Templater>,
}

impl Variable {
    pub fn new(content: impl Into<String>, templater: Arc<dyn Templater>) -> Self {
        Self {
            content: content.into(),
            templater,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn resolve(&self, ctx: &Context) -> EvalResult<Value> {
        let resolved = self.templater.apply(&self.content, ctx);
        Ok(Value::parse_scalar(&resolved))
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant(value) => write!(f, "Constant{{value={value}}}"),
            Operand::Variable(variable) => {
                write!(f, "Variable{{content='{}'}}", variable.content)
            }
            Operand::Resolver(_) => write!(f, "Resolver"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Constant(value) => write!(f, "{value}"),
            Operand::Variable(variable) => f.write_str(&variable.content),
            Operand::Resolver(_) => f.write_str("?"),
        }
    }
}
