//! Extension method discovery and scoping.

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_registry_indexes_extensions_by_namespace() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let registry = resolver.extensions();
        assert_eq!(registry.len(), 1);

        let melt = &registry.in_namespace("BeefBurger")[0];
        assert_eq!(melt.name, "Melt");
        assert_eq!(melt.extended_type, "Steak");
        assert_eq!(melt.namespace, "BeefBurger");
        assert_eq!(resolver.tree().symbol(melt.symbol).full_name, "BeefBurger.Cheese");

        assert!(registry.in_namespace("ChickenBurger").is_empty());
    });
}

#[test]
fn test_extension_visible_through_namespace_import() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let found = resolver
            .extensions()
            .find_extension(resolver.imports(), "Melt", USAGE)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(
            resolver.tree().symbol(found[0].symbol).full_name,
            "BeefBurger.Cheese"
        );
    });
}

#[test]
fn test_extension_hidden_without_import() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let found = resolver
            .extensions()
            .find_extension(resolver.imports(), "Melt", SEMI_NAMESPACED)
            .unwrap();
        assert!(found.is_empty());
    });
}

#[test]
fn test_extension_call_resolves_declaring_type() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let tree = resolver.tree();
        let consumer = symbol_id(tree, "Usage.Consumer");
        let invocations = resolver.get_invocations_for_symbol(consumer).unwrap();
        assert!(invocations.contains(symbol_id(tree, "BeefBurger.Cheese")));
    });
}
