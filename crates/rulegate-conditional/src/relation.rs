//! Composition relations for condition trees

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relation applied over an ordered sequence of child conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// Every child has to match (vacuously true when empty)
    And,
    /// At least one child has to match (vacuously false when empty)
    Or,
}

impl Relation {
    /// The keyword used when joining child aliases.
    pub fn keyword(&self) -> &'static str {
        match self {
            Relation::And => "and",
            Relation::Or => "or",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
