//! Manifest assembly: invocations grouped into file and symbol records.

use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, trace, warn};

use super::types::{
    DependencyEntry, DependencyManifest, DependentEntry, FileManifest, Metrics, SymbolManifest,
};
use crate::error::{AnalysisError, Result};
use crate::hir::{
    Diagnostic, ExtensionRegistry, ImportKind, ImportResolver, ImportTarget, InvocationResolver,
    NamespaceTree, SymbolId, analyze_file, analyze_type,
};
use crate::project::{BuildRoots, SourceSet};

/// Result of [`generate`].
#[derive(Debug, Clone, Default)]
pub struct ManifestOutput {
    pub manifest: DependencyManifest,
    /// Malformed declarations, invalid and unused directives.
    pub diagnostics: Vec<Diagnostic>,
}

/// Build every resolver for `sources` and assemble the manifest.
///
/// A file whose record fails to assemble is logged and left out; its
/// siblings are unaffected.
pub fn generate(sources: &SourceSet) -> ManifestOutput {
    let tree = NamespaceTree::build(sources);
    let roots = BuildRoots::new(sources);
    let imports = ImportResolver::new(&tree, &roots);
    let extensions = ExtensionRegistry::new(&tree);
    let resolver = InvocationResolver::new(&tree, &imports, &extensions);
    ManifestAssembler::new(&resolver).assemble()
}

/// Turns invocation results into manifest records.
pub struct ManifestAssembler<'r, 'a> {
    resolver: &'r InvocationResolver<'a>,
    tree: &'a NamespaceTree<'a>,
    imports: &'a ImportResolver<'a>,
}

impl<'r, 'a> ManifestAssembler<'r, 'a> {
    pub fn new(resolver: &'r InvocationResolver<'a>) -> Self {
        Self {
            resolver,
            tree: resolver.tree(),
            imports: resolver.imports(),
        }
    }

    /// Records for every file, then the reverse dependents pass.
    pub fn assemble(&self) -> ManifestOutput {
        let mut manifest = DependencyManifest::new();
        let mut diagnostics = Vec::new();
        diagnostics.extend_from_slice(self.tree.diagnostics());
        diagnostics.extend_from_slice(self.imports.diagnostics());
        let report_unused = self.tree.options().report_unused_imports;

        for path in self.tree.files() {
            match self.format_file(path) {
                Ok(file) => manifest.insert(file),
                Err(e) => {
                    warn!("[MANIFEST] Failed to assemble {}, skipping: {}", path, e);
                    continue;
                }
            }
            if report_unused {
                match self.resolver.unused_directives(path) {
                    Ok(unused) => diagnostics.extend(unused),
                    Err(e) => warn!("[MANIFEST] Unused-import check failed for {}: {}", path, e),
                }
            }
        }

        populate_dependents(&mut manifest);
        info!(
            "[MANIFEST] Assembled {} files, {} diagnostics",
            manifest.len(),
            diagnostics.len()
        );
        ManifestOutput {
            manifest,
            diagnostics,
        }
    }

    /// Per-symbol records for the given top-level symbols, keyed by full name.
    pub fn format_symbols(&self, symbols: &[SymbolId]) -> Result<IndexMap<String, SymbolManifest>> {
        let mut out = IndexMap::new();
        for &id in symbols {
            let symbol = self.tree.symbol(id);
            let unit = self
                .tree
                .file_unit(&symbol.filepath)
                .ok_or_else(|| AnalysisError::unknown_file(symbol.filepath.to_string()))?;
            let invocations = self.resolver.get_invocations_for_symbol(id)?;

            let mut dependencies: IndexMap<String, DependencyEntry> = IndexMap::new();
            for &target in &invocations.resolved {
                let node = self.tree.symbol(target);
                dependencies
                    .entry(node.filepath.to_string())
                    .or_insert_with(|| DependencyEntry::internal(node.filepath.to_string()))
                    .add_symbol(node.full_name.as_str());
            }
            for name in &invocations.unresolved {
                dependencies
                    .entry(name.clone())
                    .or_insert_with(|| DependencyEntry::external(name.as_str()));
            }

            let metrics = Metrics::new(analyze_type(unit, symbol.decl), dependencies.len());
            out.insert(
                symbol.full_name.clone(),
                SymbolManifest {
                    id: symbol.full_name.clone(),
                    kind: symbol.kind,
                    line_count: symbol.span.line_count(),
                    character_count: symbol.span.character_count(),
                    metrics,
                    dependencies,
                    dependents: IndexMap::new(),
                },
            );
        }
        Ok(out)
    }

    /// The record of one file, dependents left empty.
    ///
    /// Symbols declared in the file itself are not file-level dependencies.
    pub fn format_file(&self, path: &str) -> Result<FileManifest> {
        let key: &Arc<str> = self
            .tree
            .file_key(path)
            .ok_or_else(|| AnalysisError::unknown_file(path))?;
        let unit = self
            .tree
            .file_unit(key)
            .ok_or_else(|| AnalysisError::unknown_file(path))?;
        let invocations = self.resolver.get_invocations_from_file(key)?;
        let imports = self.imports.resolve_directives(key)?;

        let mut dependencies: IndexMap<String, DependencyEntry> = IndexMap::new();

        // the file's own directives that name a namespace or symbol
        for entry in &imports.internal {
            let Some(directive) = &entry.directive else {
                continue;
            };
            if entry.kind == ImportKind::Current || directive.filepath != *key {
                continue;
            }
            match entry.target {
                ImportTarget::Namespace(ns) => {
                    let full = self.tree.full_name(ns);
                    dependencies
                        .entry(full.clone())
                        .or_insert_with(|| DependencyEntry::namespace(full));
                }
                ImportTarget::Symbol(id) => {
                    let full = &self.tree.symbol(self.tree.outermost(id)).full_name;
                    dependencies
                        .entry(full.clone())
                        .or_insert_with(|| DependencyEntry::internal(full.as_str()))
                        .add_symbol(full.as_str());
                }
            }
        }

        for &id in &invocations.resolved {
            let symbol = self.tree.symbol(id);
            if symbol.filepath == *key {
                continue;
            }
            let full = &symbol.full_name;
            dependencies
                .entry(full.clone())
                .or_insert_with(|| DependencyEntry::internal(full.as_str()))
                .add_symbol(full.as_str());
        }

        for name in &invocations.unresolved {
            dependencies
                .entry(name.clone())
                .or_insert_with(|| DependencyEntry::external(name.as_str()));
        }

        // directives kept only for extension methods or operators
        for external in &imports.external {
            dependencies
                .entry(external.name.clone())
                .or_insert_with(|| DependencyEntry::external(external.name.as_str()));
        }

        collapse_namespaces(&mut dependencies);
        let metrics = Metrics::new(analyze_file(unit), dependencies.len());

        let symbols = self.format_symbols(self.tree.exports_for_file(key).unwrap_or_default())?;
        debug!(
            "[MANIFEST] {}: {} dependencies, {} symbols",
            key,
            dependencies.len(),
            symbols.len()
        );
        Ok(FileManifest {
            id: key.to_string(),
            filepath: key.to_string(),
            line_count: unit.span.line_count(),
            character_count: unit.span.character_count(),
            metrics,
            dependencies,
            symbols,
        })
    }
}

/// Fold `N.Sym` entries into a tracked namespace entry `N`.
///
/// The longest namespace prefix wins. The namespace entry records `Sym`
/// relative to itself and the separate `N.Sym` entry is removed.
pub fn collapse_namespaces(dependencies: &mut IndexMap<String, DependencyEntry>) {
    let namespaces: Vec<String> = dependencies
        .values()
        .filter(|e| e.is_namespace && !e.is_external)
        .map(|e| e.id.clone())
        .collect();
    if namespaces.is_empty() {
        return;
    }

    let mut moves = Vec::new();
    for (key, entry) in dependencies.iter() {
        if entry.is_namespace || entry.is_external {
            continue;
        }
        let owner = namespaces
            .iter()
            .filter(|ns| {
                key.len() > ns.len() + 1
                    && key.starts_with(ns.as_str())
                    && key.as_bytes()[ns.len()] == b'.'
            })
            .max_by_key(|ns| ns.len());
        if let Some(ns) = owner {
            moves.push((key.clone(), ns.clone()));
        }
    }

    for (key, ns) in moves {
        let relative = key[ns.len() + 1..].to_string();
        if let Some(target) = dependencies.get_mut(&ns) {
            trace!("[MANIFEST] Collapsing '{}' into '{}'", key, ns);
            target.add_symbol(relative);
        }
        dependencies.shift_remove(&key);
    }
}

/// Fill every symbol's `dependents` from the dependencies of all files.
///
/// Symbol-level entries contribute the referencing symbol's id; file-level
/// entries only mark the referencing file. Repeated contributions from one
/// file grow its `symbol_ids` instead of replacing them.
///
/// Each new dependent file bumps the symbol's `dependent_count`. A file's
/// `dependent_count` is the number of other files depending on its symbols.
pub fn populate_dependents(manifest: &mut DependencyManifest) {
    struct Contribution {
        target_file: String,
        target_symbol: String,
        source_file: String,
        source_symbol: Option<String>,
    }

    let index: IndexMap<String, String> = manifest
        .symbol_files()
        .into_iter()
        .map(|(id, file)| (id.to_string(), file.to_string()))
        .collect();

    let mut contributions = Vec::new();
    for (path, file) in manifest.iter() {
        for (symbol_id, symbol) in &file.symbols {
            for (target_file, entry) in &symbol.dependencies {
                if entry.is_external {
                    continue;
                }
                for target_symbol in entry.symbols.keys() {
                    contributions.push(Contribution {
                        target_file: target_file.clone(),
                        target_symbol: target_symbol.clone(),
                        source_file: path.to_string(),
                        source_symbol: Some(symbol_id.clone()),
                    });
                }
            }
        }

        for entry in file.dependencies.values() {
            if entry.is_external {
                continue;
            }
            for name in entry.symbols.keys() {
                let full = if entry.is_namespace {
                    format!("{}.{}", entry.id, name)
                } else {
                    name.clone()
                };
                let Some(target_file) = index.get(&full) else {
                    trace!("[MANIFEST] No declaring file for '{}'", full);
                    continue;
                };
                contributions.push(Contribution {
                    target_file: target_file.clone(),
                    target_symbol: full,
                    source_file: path.to_string(),
                    source_symbol: None,
                });
            }
        }
    }

    let mut file_dependents: IndexSet<(String, String)> = IndexSet::new();
    for c in contributions {
        let Some(symbol) = manifest
            .get_mut(&c.target_file)
            .and_then(|f| f.symbols.get_mut(&c.target_symbol))
        else {
            trace!(
                "[MANIFEST] Dependent target '{}' missing in {}",
                c.target_symbol,
                c.target_file
            );
            continue;
        };
        let dependent = match symbol.dependents.entry(c.source_file.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                symbol.metrics.dependent_count += 1;
                entry.insert(DependentEntry {
                    id: c.source_file.clone(),
                    filepath: c.source_file.clone(),
                    symbol_ids: Default::default(),
                })
            }
        };
        if let Some(source) = c.source_symbol {
            dependent.symbol_ids.insert(source);
        }
        if c.source_file != c.target_file {
            file_dependents.insert((c.target_file, c.source_file));
        }
    }

    for (target_file, _) in file_dependents {
        if let Some(file) = manifest.get_mut(&target_file) {
            file.metrics.dependent_count += 1;
        }
    }
}
