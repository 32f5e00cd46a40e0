//! Resolver setup and symbol lookups for HIR tests.

use monosplit::hir::{
    ExtensionRegistry, ImportResolver, InvocationResolver, Invocations, NamespaceTree, SymbolId,
};
use monosplit::project::{BuildRoots, SourceSet};

/// Build the full resolver stack for `sources` and hand it to `f`.
pub fn with_resolver<R>(sources: &SourceSet, f: impl FnOnce(&InvocationResolver<'_>) -> R) -> R {
    let tree = NamespaceTree::build(sources);
    let roots = BuildRoots::new(sources);
    let imports = ImportResolver::new(&tree, &roots);
    let extensions = ExtensionRegistry::new(&tree);
    let resolver = InvocationResolver::new(&tree, &imports, &extensions);
    f(&resolver)
}

/// Look up a symbol by full name, failing the test when it is missing.
pub fn symbol_id(tree: &NamespaceTree<'_>, full_name: &str) -> SymbolId {
    tree.find_in_tree(full_name)
        .unwrap_or_else(|| panic!("Expected symbol '{}' to exist", full_name))
}

/// Full names of the resolved symbols, in discovery order.
pub fn resolved_names(tree: &NamespaceTree<'_>, invocations: &Invocations) -> Vec<String> {
    invocations
        .resolved
        .iter()
        .map(|&id| tree.symbol(id).full_name.clone())
        .collect()
}

pub fn unresolved_names(invocations: &Invocations) -> Vec<&str> {
    invocations.unresolved.iter().map(String::as_str).collect()
}

/// Resolve `name` as seen from `file` and return the full name it lands on.
pub fn resolve_full_name(
    resolver: &InvocationResolver<'_>,
    name: &str,
    file: &str,
) -> Option<String> {
    resolver
        .resolve_symbol(name, file)
        .expect("file should be part of the run")
        .map(|id| resolver.tree().symbol(id).full_name.clone())
}
