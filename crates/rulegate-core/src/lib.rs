//! Rulegate Core - shared types for the rulegate condition engine
//!
//! This crate provides the fundamental types used across the rulegate crates:
//! - `Value` for runtime data carried through evaluations
//! - `Context`, the per-evaluation key/value scratchpad
//! - Error types shared by parsing and evaluation

pub mod context;
pub mod error;
pub mod value;

// Re-export commonly used types
pub use context::Context;
pub use error::{EvalError, ParseError};
pub use value::Value;
