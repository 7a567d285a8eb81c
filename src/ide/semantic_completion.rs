//! Member completion after a trigger token.
//!
//! `scope.|` resolves the type of `scope` and lists what can follow the dot:
//! accessible fields, accessible method names and bean-style properties
//! synthesized from getters. Anything that goes wrong on the way degrades to
//! the placeholder item instead of failing the request.

use indexmap::{IndexMap, IndexSet};
use rowan::NodeOrToken;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::completion::{CompletionItem, CompletionKind};
use super::locate::locate;
use super::options::CompletionOptions;
use crate::base::constants::{ARRAY_LENGTH_FIELD, BOOLEAN_GETTER_PREFIX, GETTER_PREFIX};
use crate::parser::{Parse, SyntaxElement, TokenStream};
use crate::semantic::{ResolveError, ResolveResult, ResolvedType, TypeName, TypeResolver, translate};

/// Member items for the caret at token index `caret`, or the placeholder.
///
/// Never empty and never contains two items with the same insert text.
pub fn semantic_completions(
    options: &CompletionOptions,
    resolver: &dyn TypeResolver,
    parse: &Parse,
    caret: usize,
    cancel: &CancellationToken,
) -> Vec<CompletionItem> {
    let mut items = Vec::new();
    match member_items(options, resolver, parse, caret, cancel, &mut items) {
        Ok(()) => {}
        Err(ResolveError::Cancelled) => debug!("member completion cancelled"),
        Err(error) => warn!(%error, partial = items.len(), "member completion failed"),
    }
    finish(items, options)
}

fn member_items(
    options: &CompletionOptions,
    resolver: &dyn TypeResolver,
    parse: &Parse,
    caret: usize,
    cancel: &CancellationToken,
    items: &mut Vec<CompletionItem>,
) -> ResolveResult<()> {
    let tokens = parse.tokens();
    let Some(previous) = caret.checked_sub(1).and_then(|index| tokens.get(index)) else {
        return Ok(());
    };
    debug!(previous = ?previous.kind, "token before caret");
    if caret < 2 || !options.is_trigger(previous.kind) {
        return Ok(());
    }

    let root = NodeOrToken::Node(parse.syntax());
    let Some(scope) = locate(&root, tokens, caret - 2) else {
        debug!(index = caret - 2, "no element at scope token");
        return Ok(());
    };
    debug!(kind = ?scope.kind(), range = ?scope.text_range(), "member access scope");

    if cancel.is_cancelled() {
        return Err(ResolveError::Cancelled);
    }

    let translation = translate(&parse.syntax(), tokens);
    let Some(expr) = scope_token(&scope, tokens).and_then(|index| translation.expr_at_token(index)) else {
        debug!("scope is not an expression");
        return Ok(());
    };

    let ty = resolver.resolve_type(&translation, expr, cancel)?;
    debug!(ty = %ty.describe(), "resolved member access scope");
    member_items_of(&ty, options, items)
}

/// Stream index of the last significant token of `element`.
///
/// A trivia token stands for the significant token before it.
fn scope_token(element: &SyntaxElement, tokens: &TokenStream) -> Option<usize> {
    let (first, last) = match element {
        NodeOrToken::Token(token) => (0, tokens.index_of(token)?),
        NodeOrToken::Node(node) => (
            tokens.index_of(&node.first_token()?)?,
            tokens.index_of(&node.last_token()?)?,
        ),
    };
    tokens.tokens()[first..=last]
        .iter()
        .rev()
        .find(|token| !token.is_trivia())
        .map(|token| token.index)
}

fn member_items_of(
    ty: &ResolvedType,
    options: &CompletionOptions,
    items: &mut Vec<CompletionItem>,
) -> ResolveResult<()> {
    let reference = match ty {
        ResolvedType::Primitive(_) => return Ok(()),
        ResolvedType::Array(_) => {
            items.push(CompletionItem::new(ARRAY_LENGTH_FIELD, CompletionKind::Field).with_detail("int"));
            return Ok(());
        }
        ResolvedType::Reference(reference) => reference,
    };

    for field in reference.fields_visible_to_inheritors()? {
        if field.visibility.is_accessible() {
            items.push(CompletionItem::new(field.name.as_str(), CompletionKind::Field).with_detail(field.ty.to_string()));
        }
    }

    // Overloads collapse to one item carrying the first return type seen.
    let mut methods: IndexMap<SmolStr, TypeName> = IndexMap::new();
    for method in reference.all_methods()? {
        if method.visibility.is_accessible() && !method.name.starts_with(options.synthetic_prefix) {
            methods.entry(method.name).or_insert(method.return_type);
        }
    }
    for (name, return_type) in &methods {
        items.push(CompletionItem::new(name.as_str(), CompletionKind::Method).with_detail(return_type.to_string()));
    }

    if options.synthesize_properties {
        let properties: IndexSet<String> = methods.keys().filter_map(|name| property_name(name)).collect();
        items.extend(
            properties
                .into_iter()
                .map(|name| CompletionItem::new(name, CompletionKind::Field)),
        );
    }
    Ok(())
}

/// `getName` → `name`, `isValid` → `valid`.
pub fn property_name(method: &str) -> Option<String> {
    let rest = match method.strip_prefix(GETTER_PREFIX) {
        Some(rest) if method.len() > GETTER_PREFIX.len() => rest,
        _ => method
            .strip_prefix(BOOLEAN_GETTER_PREFIX)
            .filter(|_| method.len() > BOOLEAN_GETTER_PREFIX.len())?,
    };
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

/// Drop repeated insert texts (first wins); an empty list becomes the placeholder.
fn finish(items: Vec<CompletionItem>, options: &CompletionOptions) -> Vec<CompletionItem> {
    let mut seen = IndexSet::new();
    let mut items: Vec<_> = items
        .into_iter()
        .filter(|item| seen.insert(item.insert_text.clone()))
        .collect();
    if items.is_empty() {
        items.push(CompletionItem::placeholder(options));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ide::completion_item_strings;
    use crate::parser::parse;
    use crate::semantic::SymbolTableResolver;

    fn complete_with(text: &str, options: &CompletionOptions, cancel: &CancellationToken) -> Vec<CompletionItem> {
        let parsed = parse(text);
        let caret = parsed.tokens().eof_index();
        semantic_completions(options, &SymbolTableResolver::default(), &parsed, caret, cancel)
    }

    fn complete(text: &str) -> Vec<String> {
        let items = complete_with(text, &CompletionOptions::default(), &CancellationToken::new());
        completion_item_strings(&items).into_iter().map(str::to_string).collect()
    }

    fn assert_unique(labels: &[String]) {
        let unique: IndexSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len(), "duplicates in {labels:?}");
    }

    #[test]
    fn static_members_of_a_type_name() {
        let labels = complete("rule R { do { System.");
        for expected in ["out", "in", "err", "gc", "currentTimeMillis", "arraycopy"] {
            assert!(labels.iter().any(|l| l == expected), "missing {expected} in {labels:?}");
        }
        assert!(!labels.iter().any(|l| l == "registerNatives"));
        assert!(!labels.iter().any(|l| l == "IDENTIFIER"));
        assert_unique(&labels);
    }

    #[test]
    fn private_fields_are_hidden_and_getters_become_properties() {
        let labels = complete("rule R { do { String s = \"\"; s.");
        assert!(labels.iter().any(|l| l == "length"));
        assert!(labels.iter().any(|l| l == "isEmpty"));
        assert!(labels.iter().any(|l| l == "empty"));
        assert!(labels.iter().any(|l| l == "bytes"));
        assert!(!labels.iter().any(|l| l == "value"));
        assert!(!labels.iter().any(|l| l == "hash"));
        assert_unique(&labels);
    }

    #[test]
    fn property_synthesis_can_be_disabled() {
        let options = CompletionOptions::default().with_property_synthesis(false);
        let items = complete_with("rule R { do { String s = \"\"; s.", &options, &CancellationToken::new());
        let labels = completion_item_strings(&items);
        assert!(labels.contains(&"isEmpty"));
        assert!(!labels.contains(&"empty"));
    }

    #[test]
    fn synthesized_property_does_not_repeat_a_field() {
        let text = "class Person { public String name; public String getName() { return name; } } \
                    rule R { Person p : /persons, do { p.";
        let labels = complete(text);
        assert_eq!(labels.iter().filter(|l| *l == "name").count(), 1);
        assert!(labels.iter().any(|l| l == "getName"));
        assert_unique(&labels);
    }

    #[test]
    fn field_items_carry_their_type() {
        let items = complete_with(
            "rule R { do { System.",
            &CompletionOptions::default(),
            &CancellationToken::new(),
        );
        let out = items.iter().find(|item| &*item.label == "out").expect("out");
        assert_eq!(out.kind, CompletionKind::Field);
        assert_eq!(out.detail.as_deref(), Some("java.io.PrintStream"));
        let gc = items.iter().find(|item| &*item.label == "gc").expect("gc");
        assert_eq!(gc.kind, CompletionKind::Method);
    }

    #[test]
    fn arrays_offer_length_only() {
        assert_eq!(complete("rule R { do { int[] xs = null; xs."), vec!["length"]);
    }

    #[test]
    fn primitives_offer_nothing() {
        assert_eq!(complete("rule R { do { int n = 1; n."), vec!["IDENTIFIER"]);
    }

    #[test]
    fn unresolvable_scope_is_the_placeholder() {
        assert_eq!(complete("rule R { do { foo."), vec!["IDENTIFIER"]);
    }

    #[test]
    fn without_a_trigger_only_the_placeholder() {
        assert_eq!(complete("rule R { do { System"), vec!["IDENTIFIER"]);
        assert_eq!(complete("rule R { do { System. "), vec!["IDENTIFIER"]);
        assert_eq!(complete("."), vec!["IDENTIFIER"]);
        assert_eq!(complete(""), vec!["IDENTIFIER"]);
    }

    #[test]
    fn keyword_scope_is_the_placeholder() {
        assert_eq!(complete("rule R { do { if."), vec!["IDENTIFIER"]);
    }

    #[test]
    fn cancelled_request_is_the_placeholder() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let items = complete_with("rule R { do { System.", &CompletionOptions::default(), &cancel);
        assert_eq!(completion_item_strings(&items), vec!["IDENTIFIER"]);
        assert_eq!(items[0].kind, CompletionKind::Text);
    }

    #[test]
    fn property_names() {
        assert_eq!(property_name("getName").as_deref(), Some("name"));
        assert_eq!(property_name("isValid").as_deref(), Some("valid"));
        assert_eq!(property_name("getURL").as_deref(), Some("uRL"));
        assert_eq!(property_name("get"), None);
        assert_eq!(property_name("is"), None);
        assert_eq!(property_name("size"), None);
    }
}
