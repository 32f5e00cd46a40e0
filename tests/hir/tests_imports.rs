//! Import directives across files and subprojects.

use std::sync::Arc;

use monosplit::AnalysisError;
use monosplit::hir::{ImportKind, ImportTarget};
use rstest::rstest;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;

// ============================================================================
// RESOLVED DIRECTIVES
// ============================================================================

#[test]
fn test_program_directives_resolve_in_order() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let tree = resolver.tree();
        let resolved = resolver
            .imports()
            .resolve_directives(PROGRAM)
            .expect("program is analyzed");

        assert!(resolved.external.is_empty());
        let targets: Vec<String> = resolved
            .internal
            .iter()
            .map(|entry| match entry.target {
                ImportTarget::Namespace(ns) => format!("ns:{}", tree.full_name(ns)),
                ImportTarget::Symbol(id) => format!("sym:{}", tree.symbol(id).full_name),
            })
            .collect();
        assert_eq!(
            targets,
            vec![
                "ns:MyNamespace",
                "ns:HalfNamespace",
                "sym:OuterNamespace.OuterClass.OuterInnerClass",
                "ns:OuterNamespace.InnerNamespace",
                "ns:BeefBurger",
                "ns:Tests",
                "ns:",
            ]
        );

        let kinds: Vec<ImportKind> = resolved.internal.iter().map(|e| e.kind).collect();
        assert_eq!(kinds[..5], [ImportKind::Local; 5]);
        assert_eq!(kinds[5..], [ImportKind::Current; 2]);
    });
}

#[test]
fn test_unknown_namespace_directive_is_external() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let resolved = resolver
            .imports()
            .resolve_directives(USAGE)
            .expect("usage is analyzed");
        let external: Vec<&str> = resolved.external.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(external, vec!["Newtonsoft.Json"]);

        let alias = resolved
            .internal
            .iter()
            .find(|e| e.kind == ImportKind::Alias)
            .expect("alias directive should resolve");
        assert_eq!(alias.alias.as_deref(), Some("Valve"));
    });
}

#[test]
fn test_resolved_directives_are_memoized() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let first = resolver.imports().resolve_directives(PROGRAM).unwrap();
        let second = resolver.imports().resolve_directives(PROGRAM).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    });
}

#[test]
fn test_unknown_file_is_an_error() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let err = resolver
            .imports()
            .resolve_directives("Missing.cs")
            .expect_err("file is not part of the run");
        assert!(matches!(err, AnalysisError::UnknownFile(_)));
    });
}

// ============================================================================
// LOOKUP THROUGH IMPORTS
// ============================================================================

#[rstest]
#[case(PROGRAM, "Bun", "BeefBurger.Bun")]
#[case(PROGRAM, "ChickenBurger.Bun", "ChickenBurger.Bun")]
#[case(PROGRAM, "OuterInnerClass", "OuterNamespace.OuterClass.OuterInnerClass")]
#[case(PROGRAM, "InnerClass", "OuterNamespace.InnerNamespace.InnerClass")]
#[case(PROGRAM, "Freeman", "Freeman")]
#[case(USAGE, "Valve.Gordon", "HalfNamespace.Gordon")]
#[case(USAGE, "Steak", "BeefBurger.Steak")]
fn test_find_symbol_in_imports(#[case] file: &str, #[case] name: &str, #[case] expected: &str) {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let imports = resolver.imports();
        let resolved = imports.resolve_directives(file).unwrap();
        let found = imports
            .find_symbol_in_imports(&resolved, name)
            .map(|id| resolver.tree().symbol(id).full_name.clone());
        assert_eq!(found.as_deref(), Some(expected));
    });
}

#[test]
fn test_aliased_namespace_only_reachable_through_alias() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let imports = resolver.imports();
        let resolved = imports.resolve_directives(USAGE).unwrap();
        assert!(imports.find_symbol_in_imports(&resolved, "Gordon").is_none());
    });
}

#[test]
fn test_namespace_directive_matches_exactly() {
    let sources = console_app();
    with_resolver(&sources, |resolver| {
        let imports = resolver.imports();
        let resolved = imports.resolve_directives(PROGRAM).unwrap();
        // `OrderStatus` lives in `MyApp.Models`, which Program does not import
        assert!(imports.find_symbol_in_imports(&resolved, "OrderStatus").is_none());
        assert_eq!(
            resolve_full_name(resolver, "OrderStatus", PROGRAM).as_deref(),
            Some("MyApp.Models.OrderStatus")
        );
    });
}

// ============================================================================
// GLOBAL DIRECTIVES
// ============================================================================

#[test]
fn test_global_usings_are_scoped_to_their_subproject() {
    let sources = two_subprojects();
    with_resolver(&sources, |resolver| {
        let imports = resolver.imports();

        let app = imports.global_directives("App/AppConsumer.cs").unwrap();
        assert_eq!(app.len(), 1);
        assert_eq!(app[0].name, "MyApp.Models");
        assert!(app[0].is_global);
        assert!(imports.global_directives("Lib/LibConsumer.cs").unwrap().is_empty());

        assert_eq!(
            resolve_full_name(resolver, "User", "App/AppConsumer.cs").as_deref(),
            Some("MyApp.Models.User")
        );
        assert_eq!(
            resolve_full_name(resolver, "User", "Lib/LibConsumer.cs").as_deref(),
            Some("Legacy.User")
        );
    });
}
