//! Placeholder substitution for variable operands
//!
//! Variable operands hold raw text with `%key%` tokens. The engine itself
//! only knows how to substitute tokens from the current context; richer
//! templating (external placeholder services and the like) plugs in through
//! the [`Templater`] trait.

use rulegate_core::Context;

/// Text-templating collaborator used to resolve variable operands.
pub trait Templater: Send + Sync {
    /// Substitute placeholder tokens in `text` against the given context.
    /// Tokens that cannot be resolved are left untouched.
    fn apply(&self, text: &str, ctx: &Context) -> String;
}

/// Default templater: replaces every `%key%` token whose key is present in
/// the context with the value's display form.
#[derive(Debug, Clone)]
pub struct ContextTemplater {
    open: char,
    close: char,
}

impl ContextTemplater {
    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

impl Default for ContextTemplater {
    fn default() -> Self {
        Self::new('%', '%')
    }
}

impl Templater for ContextTemplater {
    fn apply(&self, text: &str, ctx: &Context) -> String {
        let mut out = String::with_capacity(text.len());
        let mut remainder = text;

        while let Some(start) = remainder.find(self.open) {
            out.push_str(&remainder[..start]);
            let after = &remainder[start + self.open.len_utf8()..];

            let Some(end) = after.find(self.close) else {
                // Unterminated token, keep the rest as-is.
                out.push_str(&remainder[start..]);
                return out;
            };

            let key = &after[..end];
            if !key.is_empty() && !key.contains(char::is_whitespace) {
                if let Some(value) = ctx.get(key) {
                    out.push_str(&value.to_string());
                    remainder = &after[end + self.close.len_utf8()..];
                    continue;
                }
            }

            // Not a resolvable token; emit the opening delimiter and rescan
            // from right after it, the closing char may open another token.
            out.push(self.open);
            remainder = after;
        }

        out.push_str(remainder);
        out
    }
}

/// Check whether `text` contains at least one well-formed placeholder token.
pub(crate) fn contains_placeholder(text: &str, open: char, close: char) -> bool {
    let mut remainder = text;
    while let Some(start) = remainder.find(open) {
        let after = &remainder[start + open.len_utf8()..];
        match after.find(close) {
            None => return false,
            Some(end) => {
                let key = &after[..end];
                if !key.is_empty() && !key.contains(char::is_whitespace) {
                    return true;
                }
                remainder = after;
            }
        }
    }
    false
}
