//! Extension methods indexed by declaring namespace.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::debug;

use super::ids::SymbolId;
use super::imports::{ImportKind, ImportResolver, ImportTarget};
use super::namespaces::NamespaceTree;
use crate::base::names::strip_generics;
use crate::error::Result;

/// A method whose first parameter carries `this`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMethod {
    /// Method name without generic arguments.
    pub name: SmolStr,
    /// Declaring type.
    pub symbol: SymbolId,
    pub return_type: String,
    /// Declared type of the receiver parameter.
    pub extended_type: String,
    pub type_params: Vec<String>,
    /// Full name of the declaring namespace.
    pub namespace: String,
}

/// All extension methods of a run, keyed by namespace full name.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    by_namespace: IndexMap<String, Vec<ExtensionMethod>>,
}

impl ExtensionRegistry {
    /// Scan every symbol of the tree, nested types included.
    pub fn new(tree: &NamespaceTree<'_>) -> Self {
        let mut by_namespace: IndexMap<String, Vec<ExtensionMethod>> = IndexMap::new();
        for (id, symbol) in tree.symbols() {
            for method in symbol.decl.methods() {
                let Some(receiver) = method.extension_receiver() else {
                    continue;
                };
                by_namespace
                    .entry(symbol.namespace.clone())
                    .or_default()
                    .push(ExtensionMethod {
                        name: SmolStr::new(strip_generics(&method.name)),
                        symbol: id,
                        return_type: method
                            .return_type
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "void".to_string()),
                        extended_type: receiver
                            .ty
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                        type_params: method.type_params.clone(),
                        namespace: symbol.namespace.clone(),
                    });
            }
        }
        debug!(
            "[EXTENSIONS] {} extension methods in {} namespaces",
            by_namespace.values().map(Vec::len).sum::<usize>(),
            by_namespace.len()
        );
        Self { by_namespace }
    }

    pub fn extensions(&self) -> &IndexMap<String, Vec<ExtensionMethod>> {
        &self.by_namespace
    }

    /// Extensions declared in one namespace.
    pub fn in_namespace(&self, namespace: &str) -> &[ExtensionMethod] {
        self.by_namespace
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.by_namespace.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_namespace.is_empty()
    }

    /// Extensions named `name` that are in scope at `filepath`.
    ///
    /// A namespace is in scope when the file imports it (directly, through a
    /// subproject global, or by declaring it). `using static T` brings the
    /// extensions declared on `T` into scope. Argument types are not checked.
    pub fn find_extension(
        &self,
        imports: &ImportResolver<'_>,
        name: &str,
        filepath: &str,
    ) -> Result<Vec<&ExtensionMethod>> {
        let name = strip_generics(name);
        let resolved = imports.resolve_directives(filepath)?;
        let tree = imports.tree();

        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        for entry in resolved.internal.iter().filter(|e| e.alias.is_none()) {
            match entry.target {
                ImportTarget::Namespace(ns) => {
                    let full = tree.full_name(ns);
                    if !seen.insert(full.clone()) {
                        continue;
                    }
                    found.extend(
                        self.in_namespace(&full)
                            .iter()
                            .filter(|m| m.name.as_str() == name.as_str()),
                    );
                }
                ImportTarget::Symbol(id) if entry.kind == ImportKind::Static => {
                    let namespace = &tree.symbol(id).namespace;
                    found.extend(
                        self.in_namespace(namespace)
                            .iter()
                            .filter(|m| m.symbol == id && m.name.as_str() == name.as_str()),
                    );
                }
                ImportTarget::Symbol(_) => {}
            }
        }
        let mut unique = FxHashSet::default();
        found.retain(|m| unique.insert((m.symbol, m.name.clone())));
        Ok(found)
    }
}
