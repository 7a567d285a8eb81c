//! Candidate classification.

use crate::parser::{CandidateSet, SyntaxKind};

/// What kind of completion a candidate set calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateContext {
    /// Offer the candidate tokens as keywords.
    Keyword,
    /// A resolvable name is expected; member completion may apply.
    MajorIdentifier,
    /// A free-text name is expected; only the placeholder is offered.
    MinorIdentifier,
}

/// Classify by the identifier rule's context stack.
///
/// Without an identifier rule path (or with an empty one) the tokens are
/// keyword suggestions. Otherwise the innermost open rule decides: one of
/// `minor_rules` makes the name free text.
pub fn classify(candidates: &CandidateSet, minor_rules: &[SyntaxKind]) -> CandidateContext {
    match candidates.identifier_path().and_then(<[SyntaxKind]>::last) {
        None => CandidateContext::Keyword,
        Some(innermost) if minor_rules.contains(innermost) => CandidateContext::MinorIdentifier,
        Some(_) => CandidateContext::MajorIdentifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_path(path: &[SyntaxKind]) -> CandidateSet {
        let mut candidates = CandidateSet::default();
        candidates.tokens.insert(SyntaxKind::THIS_KW);
        candidates.rules.insert(SyntaxKind::IDENTIFIER, path.to_vec());
        candidates
    }

    #[test]
    fn no_identifier_rule_is_keyword() {
        let mut candidates = CandidateSet::default();
        candidates.tokens.insert(SyntaxKind::CLASS_KW);
        assert_eq!(classify(&candidates, &[]), CandidateContext::Keyword);
        assert_eq!(classify(&CandidateSet::default(), &[]), CandidateContext::Keyword);
    }

    #[test]
    fn empty_path_is_keyword() {
        assert_eq!(classify(&with_path(&[]), &[]), CandidateContext::Keyword);
    }

    #[test]
    fn innermost_rule_decides() {
        let minor = [SyntaxKind::ANNOTATION_NAME];
        let annotation = with_path(&[SyntaxKind::SOURCE_FILE, SyntaxKind::ANNOTATION, SyntaxKind::ANNOTATION_NAME]);
        assert_eq!(classify(&annotation, &minor), CandidateContext::MinorIdentifier);

        let member = with_path(&[SyntaxKind::SOURCE_FILE, SyntaxKind::ANNOTATION_NAME, SyntaxKind::FIELD_ACCESS]);
        assert_eq!(classify(&member, &minor), CandidateContext::MajorIdentifier);
        assert_eq!(classify(&annotation, &[]), CandidateContext::MajorIdentifier);
    }
}
