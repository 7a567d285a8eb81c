//! Completion configuration.

use smol_str::SmolStr;

use crate::base::constants::{PLACEHOLDER_LABEL, SYNTHETIC_MEMBER_PREFIX};
use crate::parser::{IGNORED_TOKENS, SyntaxKind, TokenSet};

/// Knobs for a [`CompletionEngine`](super::CompletionEngine).
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    /// Rule kinds whose identifiers are free text rather than resolvable names.
    pub minor_identifier_rules: Vec<SyntaxKind>,
    /// Tokens that start a member access.
    pub trigger_kinds: Vec<SyntaxKind>,
    /// Label of the generic identifier item.
    pub placeholder_label: SmolStr,
    /// Member names starting with this character are never offered.
    pub synthetic_prefix: char,
    /// Offer `name` for `getName()` and `valid` for `isValid()`.
    pub synthesize_properties: bool,
    /// Token kinds never rendered as keyword suggestions.
    pub ignored_tokens: TokenSet,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            minor_identifier_rules: vec![SyntaxKind::ANNOTATION_NAME],
            trigger_kinds: vec![SyntaxKind::DOT],
            placeholder_label: SmolStr::new_static(PLACEHOLDER_LABEL),
            synthetic_prefix: SYNTHETIC_MEMBER_PREFIX,
            synthesize_properties: true,
            ignored_tokens: IGNORED_TOKENS,
        }
    }
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minor_identifier_rules(mut self, rules: impl IntoIterator<Item = SyntaxKind>) -> Self {
        self.minor_identifier_rules = rules.into_iter().collect();
        self
    }

    pub fn with_trigger_kinds(mut self, kinds: impl IntoIterator<Item = SyntaxKind>) -> Self {
        self.trigger_kinds = kinds.into_iter().collect();
        self
    }

    pub fn with_placeholder_label(mut self, label: impl Into<SmolStr>) -> Self {
        self.placeholder_label = label.into();
        self
    }

    pub fn with_synthetic_prefix(mut self, prefix: char) -> Self {
        self.synthetic_prefix = prefix;
        self
    }

    pub fn with_property_synthesis(mut self, enabled: bool) -> Self {
        self.synthesize_properties = enabled;
        self
    }

    pub fn with_ignored_tokens(mut self, ignored: TokenSet) -> Self {
        self.ignored_tokens = ignored;
        self
    }

    pub(crate) fn is_trigger(&self, kind: SyntaxKind) -> bool {
        self.trigger_kinds.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CompletionOptions::default();
        assert_eq!(options.minor_identifier_rules, vec![SyntaxKind::ANNOTATION_NAME]);
        assert!(options.is_trigger(SyntaxKind::DOT));
        assert!(!options.is_trigger(SyntaxKind::COLON_COLON));
        assert_eq!(options.placeholder_label, "IDENTIFIER");
        assert_eq!(options.synthetic_prefix, '$');
        assert!(options.synthesize_properties);
    }

    #[test]
    fn builder_overrides() {
        let options = CompletionOptions::new()
            .with_trigger_kinds([SyntaxKind::DOT, SyntaxKind::COLON_COLON])
            .with_placeholder_label("name")
            .with_property_synthesis(false);
        assert!(options.is_trigger(SyntaxKind::COLON_COLON));
        assert_eq!(options.placeholder_label, "name");
        assert!(!options.synthesize_properties);
    }
}
