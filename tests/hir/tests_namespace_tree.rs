//! Namespace tree construction and lookup.

use monosplit::hir::{NamespaceId, NamespaceTree, SymbolKind, codes};
use monosplit::project::SourceSet;
use monosplit::syntax::{CompilationUnit, NamespaceDecl, TypeDecl};
use rstest::rstest;

use crate::helpers::hir_helpers::*;
use crate::helpers::source_fixtures::*;

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_tree_records_every_declared_namespace() {
    let sources = console_app();
    let tree = NamespaceTree::build(&sources);

    for dotted in [
        "MyApp",
        "MyApp.Models",
        "MyNamespace",
        "HalfNamespace",
        "OuterNamespace",
        "OuterNamespace.InnerNamespace",
        "BeefBurger",
        "ChickenBurger",
        "Tests",
        "Usage",
    ] {
        assert!(
            tree.find_namespace(dotted).is_some(),
            "Expected namespace '{}' to exist",
            dotted
        );
    }
    assert!(tree.find_namespace("Models").is_none());
}

#[test]
fn test_global_namespace_holds_unnamespaced_types() {
    let sources = console_app();
    let tree = NamespaceTree::build(&sources);

    let freeman = tree.symbol(symbol_id(&tree, "Freeman"));
    assert_eq!(freeman.namespace, "");
    assert_eq!(freeman.namespace_id, NamespaceId::ROOT);
    assert_eq!(freeman.filepath.as_ref(), SEMI_NAMESPACED);
}

#[test]
fn test_one_file_two_namespaces() {
    let sources = console_app();
    let tree = NamespaceTree::build(&sources);

    let declared: Vec<String> = tree
        .file_namespaces(BURGERS)
        .expect("burgers file should be indexed")
        .iter()
        .map(|&ns| tree.full_name(ns))
        .collect();
    assert_eq!(declared, vec!["BeefBurger", "ChickenBurger"]);

    let exported: Vec<&str> = tree
        .exports_for_file(BURGERS)
        .unwrap_or_default()
        .iter()
        .map(|&id| tree.symbol(id).full_name.as_str())
        .collect();
    assert_eq!(
        exported,
        vec![
            "BeefBurger.Steak",
            "BeefBurger.Cheese",
            "BeefBurger.Bun",
            "ChickenBurger.Chicken",
            "ChickenBurger.Salad",
            "ChickenBurger.Bun",
        ]
    );
}

#[test]
fn test_nested_types_are_symbols_with_parent() {
    let sources = console_app();
    let tree = NamespaceTree::build(&sources);

    let inner = symbol_id(&tree, "OuterNamespace.OuterClass.OuterInnerClass");
    let outer = symbol_id(&tree, "OuterNamespace.OuterClass");
    assert_eq!(tree.symbol(inner).parent, Some(outer));
    assert_eq!(tree.outermost(inner), outer);
    assert_eq!(tree.outermost(outer), outer);

    // nested types are not top-level exports of the file
    let exported = tree.exports_for_file(NESTED).unwrap_or_default();
    assert!(!exported.contains(&inner));
}

#[test]
fn test_symbol_kinds() {
    let sources = console_app();
    let tree = NamespaceTree::build(&sources);
    assert_eq!(
        tree.symbol(symbol_id(&tree, "MyApp.Models.OrderStatus")).kind,
        SymbolKind::Enum
    );
    assert_eq!(
        tree.symbol(symbol_id(&tree, "MyApp.Models.User")).kind,
        SymbolKind::Class
    );
}

#[test]
fn test_malformed_namespace_is_reported_and_skipped() {
    let broken = NamespaceDecl {
        name: None,
        ..NamespaceDecl::new("Ignored").member(TypeDecl::class("Lost"))
    };
    let mut sources = SourceSet::new();
    sources.add_file("Broken.cs", CompilationUnit::new().member(broken));
    sources.add_file(
        "Fine.cs",
        CompilationUnit::new().member(NamespaceDecl::new("Fine").member(TypeDecl::class("Kept"))),
    );

    let tree = NamespaceTree::build(&sources);
    assert!(tree.find_in_tree("Lost").is_none());
    assert!(tree.find_in_tree("Fine.Kept").is_some());

    let diagnostics = tree.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file.as_ref(), "Broken.cs");
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::MALFORMED_NAMESPACE));
}

#[test]
fn test_parse_failure_leaves_file_out() {
    let mut sources = SourceSet::new();
    assert!(sources.add_file(MODELS, models()));
    assert!(!sources.add_parsed::<&str>("Broken.cs", Err("unexpected token '}'")));

    let tree = NamespaceTree::build(&sources);
    assert_eq!(sources.skipped(), ["Broken.cs".to_string()]);
    assert!(!tree.contains_file("Broken.cs"));
    assert!(tree.find_in_tree("User").is_some());
}

#[test]
fn test_excluded_directories_are_dropped() {
    let mut sources = SourceSet::new();
    assert!(!sources.add_file("bin/Debug/Generated.cs", models()));
    assert!(!sources.add_file("src/obj/Temp.cs", models()));
    assert!(sources.add_file("src/Models.cs", models()));
    assert_eq!(sources.len(), 1);
}

// ============================================================================
// LOOKUP
// ============================================================================

fn ambiguous_x() -> SourceSet {
    let mut sources = SourceSet::new();
    sources.add_file(
        "X.cs",
        CompilationUnit::new()
            .member(NamespaceDecl::new("A").member(TypeDecl::class("X")))
            .member(NamespaceDecl::new("A.B").member(TypeDecl::class("X")))
            .member(NamespaceDecl::new("A.B.C").member(TypeDecl::class("X"))),
    );
    sources
}

#[rstest]
#[case("A.X", "A.X")]
#[case("A.B.X", "A.B.X")]
#[case("A.B.C.X", "A.B.C.X")]
#[case("B.X", "A.B.X")]
#[case("C.X", "A.B.C.X")]
#[case("X", "A.X")]
fn test_find_in_tree_matches_qualifier_suffix(#[case] query: &str, #[case] expected: &str) {
    let sources = ambiguous_x();
    let tree = NamespaceTree::build(&sources);
    let found = tree
        .find_in_tree(query)
        .map(|id| tree.symbol(id).full_name.clone());
    assert_eq!(found.as_deref(), Some(expected));
}

#[rstest]
#[case("D.X")]
#[case("Y")]
#[case("A.C.X")]
fn test_find_in_tree_misses(#[case] query: &str) {
    let sources = ambiguous_x();
    let tree = NamespaceTree::build(&sources);
    assert!(tree.find_in_tree(query).is_none());
}

#[test]
fn test_find_in_namespace_is_exact() {
    let sources = ambiguous_x();
    let tree = NamespaceTree::build(&sources);
    let a = tree.find_namespace("A").expect("A");

    let direct = tree.find_in_namespace(a, "X").expect("A.X");
    assert_eq!(tree.symbol(direct).full_name, "A.X");

    let relative = tree.find_in_namespace(a, "B.X").expect("A.B.X");
    assert_eq!(tree.symbol(relative).full_name, "A.B.X");

    assert!(tree.find_in_namespace(a, "C.X").is_none());
}

#[test]
fn test_find_qualified_nested_type() {
    let sources = console_app();
    let tree = NamespaceTree::build(&sources);
    let found = tree
        .find_in_tree("OuterClass.OuterInnerClass")
        .map(|id| tree.symbol(id).full_name.clone());
    assert_eq!(
        found.as_deref(),
        Some("OuterNamespace.OuterClass.OuterInnerClass")
    );
}
