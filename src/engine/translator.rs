//! Message translation seam.

use std::collections::HashMap;

/// Localizes violation message templates.
///
/// The core never calls a translator directly; the
/// [`ExecutionContext`](crate::engine::ExecutionContext) runs every message
/// template through it when a violation is recorded. Plug in a real
/// localization layer here, or use [`IdentityTranslator`] to keep templates
/// as-is.
pub trait Translator: Send + Sync {
    /// Produce the final message for `template`, substituting `params`.
    ///
    /// Keys in `params` are the literal placeholders as they appear in the
    /// template (e.g. `"{{ limit }}"`).
    fn translate(&self, template: &str, params: &HashMap<String, String>) -> String;
}

/// A translator that performs placeholder substitution but no localization.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, template: &str, params: &HashMap<String, String>) -> String {
        let mut message = template.to_string();
        for (placeholder, value) in params {
            message = message.replace(placeholder, value);
        }
        message
    }
}
