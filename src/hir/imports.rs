//! Import resolution: `using` directives to namespaces, symbols or external names.
//!
//! Every file sees three groups of imports, in this priority order:
//!
//! 1. its own directives (local, static, alias, and its own global ones)
//! 2. the global directives of its subproject, gathered from every file
//! 3. the namespaces it declares plus the root namespace (`Current` entries)
//!
//! Directives that name nothing in the tree are kept as external names.

use std::cell::RefCell;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::ids::{NamespaceId, SymbolId};
use super::invocations::Invocations;
use super::namespaces::NamespaceTree;
use crate::base::names::{join, segments, strip_alias_qualifier};
use crate::base::Span;
use crate::error::{AnalysisError, Result};
use crate::project::{BuildRoots, SubprojectId};
use crate::syntax::{Member, UsingDirective};

// ============================================================================
// DIRECTIVES
// ============================================================================

/// How a directive brings names into scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `using X;`
    Local,
    /// `global using X;`
    Global,
    /// `using static X;`
    Static,
    /// `using A = X;`
    Alias,
    /// Implicit import of a namespace the file declares, or of the root.
    Current,
}

/// A parsed `using` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDirective {
    pub kind: ImportKind,
    /// Imported dotted name, alias qualifier removed.
    pub name: String,
    pub alias: Option<String>,
    /// Applies to the whole subproject.
    pub is_global: bool,
    pub filepath: Arc<str>,
    pub span: Span,
}

impl ImportDirective {
    /// Classify a syntax node. Returns `None` when the directive names nothing.
    pub fn from_syntax(using: &UsingDirective, filepath: &Arc<str>) -> Option<Self> {
        let name = strip_alias_qualifier(using.name.trim()).trim();
        if segments(name).is_empty() {
            return None;
        }
        let kind = if using.alias.is_some() {
            ImportKind::Alias
        } else if using.is_static {
            ImportKind::Static
        } else if using.is_global {
            ImportKind::Global
        } else {
            ImportKind::Local
        };
        Some(Self {
            kind,
            name: name.to_string(),
            alias: using.alias.clone(),
            is_global: using.is_global,
            filepath: filepath.clone(),
            span: using.span,
        })
    }

    fn key(&self) -> DirectiveKey {
        (self.kind, self.name.clone(), self.alias.clone())
    }
}

type DirectiveKey = (ImportKind, String, Option<String>);

/// What a resolved directive points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportTarget {
    Namespace(NamespaceId),
    Symbol(SymbolId),
}

/// A directive that names something in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalImport {
    pub kind: ImportKind,
    pub alias: Option<String>,
    pub target: ImportTarget,
    /// `None` for `Current` entries.
    pub directive: Option<ImportDirective>,
}

/// A directive naming something outside the analyzed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalImport {
    pub kind: ImportKind,
    pub name: String,
    pub directive: ImportDirective,
}

/// Imports visible in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedImports {
    pub internal: Vec<InternalImport>,
    pub external: Vec<ExternalImport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GlobalScope {
    Subproject(SubprojectId),
    /// Files outside every subproject only see their own global directives.
    File(Arc<str>),
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves import directives against the namespace tree.
///
/// Resolved imports are memoized per file for the lifetime of the resolver.
pub struct ImportResolver<'a> {
    tree: &'a NamespaceTree<'a>,
    roots: &'a BuildRoots,
    globals: FxHashMap<GlobalScope, IndexMap<DirectiveKey, ImportDirective>>,
    diagnostics: Vec<Diagnostic>,
    cache: RefCell<FxHashMap<Arc<str>, Arc<ResolvedImports>>>,
}

impl<'a> ImportResolver<'a> {
    /// Create a resolver, collecting global directives from every file.
    pub fn new(tree: &'a NamespaceTree<'a>, roots: &'a BuildRoots) -> Self {
        let mut resolver = Self {
            tree,
            roots,
            globals: FxHashMap::default(),
            diagnostics: Vec::new(),
            cache: RefCell::new(FxHashMap::default()),
        };
        let mut collector = DiagnosticCollector::new();
        for path in tree.files() {
            let Some(unit) = tree.file_unit(path) else {
                continue;
            };
            let mut usings = unit.usings.iter().collect::<Vec<_>>();
            collect_namespace_usings(&unit.members, &mut usings);
            for using in usings {
                match ImportDirective::from_syntax(using, path) {
                    Some(directive) if directive.is_global => {
                        let scope = resolver.scope_for(path);
                        resolver.add_global(scope, directive);
                    }
                    Some(_) => {}
                    None => collector.invalid_import(path, using.span),
                }
            }
        }
        resolver.diagnostics = collector.take();
        resolver
    }

    fn scope_for(&self, path: &Arc<str>) -> GlobalScope {
        match self.roots.subproject_for_file(path) {
            Some(id) => GlobalScope::Subproject(id),
            None => GlobalScope::File(path.clone()),
        }
    }

    /// Add a global directive to its scope. Adding the same directive twice is a no-op.
    fn add_global(&mut self, scope: GlobalScope, directive: ImportDirective) {
        let set = self.globals.entry(scope).or_default();
        if !set.contains_key(&directive.key()) {
            trace!(
                "[IMPORTS] Global '{}' from {}",
                directive.name,
                directive.filepath
            );
            set.insert(directive.key(), directive);
        }
    }

    pub fn tree(&self) -> &'a NamespaceTree<'a> {
        self.tree
    }

    /// Directives that are invalid (no name).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Global directives visible in a file, in discovery order.
    pub fn global_directives(&self, path: &str) -> Result<Vec<ImportDirective>> {
        let key = self.file_key(path)?;
        Ok(self
            .globals
            .get(&self.scope_for(key))
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default())
    }

    fn file_key(&self, path: &str) -> Result<&'a Arc<str>> {
        self.tree
            .file_key(path)
            .ok_or_else(|| AnalysisError::unknown_file(path))
    }

    /// Directives written in a file, file-level first, then namespace-level.
    pub fn parse_directives(&self, path: &str) -> Result<Vec<ImportDirective>> {
        let key = self.file_key(path)?;
        let unit = self
            .tree
            .file_unit(key)
            .ok_or_else(|| AnalysisError::unknown_file(path))?;
        let mut usings = unit.usings.iter().collect::<Vec<_>>();
        collect_namespace_usings(&unit.members, &mut usings);
        Ok(usings
            .into_iter()
            .filter_map(|u| ImportDirective::from_syntax(u, key))
            .collect())
    }

    /// Resolve one directive: a symbol first, then a namespace.
    pub fn resolve_directive(&self, directive: &ImportDirective) -> Option<ImportTarget> {
        self.tree
            .find_in_tree(&directive.name)
            .map(ImportTarget::Symbol)
            .or_else(|| {
                self.tree
                    .find_namespace(&directive.name)
                    .map(ImportTarget::Namespace)
            })
    }

    /// All imports visible in a file. Memoized per file.
    pub fn resolve_directives(&self, path: &str) -> Result<Arc<ResolvedImports>> {
        let key = self.file_key(path)?;
        if let Some(hit) = self.cache.borrow().get(key) {
            return Ok(hit.clone());
        }

        let mut directives = self.parse_directives(key)?;
        for global in self.global_directives(key)? {
            if !directives.iter().any(|d| d.key() == global.key()) {
                directives.push(global);
            }
        }

        let mut resolved = ResolvedImports::default();
        for directive in directives {
            match self.resolve_directive(&directive) {
                Some(target) => resolved.internal.push(InternalImport {
                    kind: directive.kind,
                    alias: directive.alias.clone(),
                    target,
                    directive: Some(directive),
                }),
                None => resolved.external.push(ExternalImport {
                    kind: directive.kind,
                    name: directive.name.clone(),
                    directive,
                }),
            }
        }

        let declared = self.tree.file_namespaces(key).unwrap_or_default();
        for &ns in declared.iter().chain(std::iter::once(&NamespaceId::ROOT)) {
            resolved.internal.push(InternalImport {
                kind: ImportKind::Current,
                alias: None,
                target: ImportTarget::Namespace(ns),
                directive: None,
            });
        }

        debug!(
            "[IMPORTS] {}: {} internal, {} external",
            key,
            resolved.internal.len(),
            resolved.external.len()
        );
        let resolved = Arc::new(resolved);
        self.cache.borrow_mut().insert(key.clone(), resolved.clone());
        Ok(resolved)
    }

    /// Find a symbol through a file's imports.
    ///
    /// An alias on the leading segment is substituted first. Then the name is
    /// matched against directly imported symbols, and finally looked up inside
    /// every imported namespace in order. Aliased namespaces are only reachable
    /// through their alias.
    pub fn find_symbol_in_imports(
        &self,
        imports: &ResolvedImports,
        name: &str,
    ) -> Option<SymbolId> {
        let parts = segments(name);
        let (first, rest) = parts.split_first()?;

        if let Some(entry) = imports
            .internal
            .iter()
            .find(|e| e.alias.as_deref() == Some(*first))
        {
            let found = match (entry.target, rest.is_empty()) {
                (ImportTarget::Symbol(id), true) => Some(id),
                (ImportTarget::Symbol(id), false) => self
                    .tree
                    .find_in_tree(&join(&self.tree.symbol(id).full_name, &rest.join("."))),
                (ImportTarget::Namespace(ns), false) => {
                    self.tree.find_in_namespace(ns, &rest.join("."))
                }
                (ImportTarget::Namespace(_), true) => None,
            };
            if found.is_some() {
                return found;
            }
        }

        if rest.is_empty() {
            let direct = imports.internal.iter().find_map(|e| match e.target {
                ImportTarget::Symbol(id)
                    if e.alias.is_none() && self.tree.symbol(id).name == *first =>
                {
                    Some(id)
                }
                _ => None,
            });
            if direct.is_some() {
                return direct;
            }
        }

        let dotted = parts.join(".");
        imports.internal.iter().find_map(|e| match e.target {
            ImportTarget::Namespace(ns) if e.alias.is_none() => {
                self.tree.find_in_namespace(ns, &dotted)
            }
            _ => None,
        })
    }

    /// Whether anything in `invocations` needs `directive`.
    ///
    /// External directives are always kept. An internal namespace directive
    /// is useful when a resolved symbol lives in that namespace; an internal
    /// symbol directive when the symbol (or its outermost type) was resolved.
    pub fn is_directive_useful(
        &self,
        invocations: &Invocations,
        directive: &ImportDirective,
    ) -> bool {
        match self.resolve_directive(directive) {
            None => true,
            Some(ImportTarget::Namespace(ns)) => {
                let full = self.tree.full_name(ns);
                invocations
                    .resolved
                    .iter()
                    .any(|&id| self.tree.symbol(id).namespace == full)
            }
            Some(ImportTarget::Symbol(target)) => {
                let outer = self.tree.outermost(target);
                let target_node = self.tree.symbol(target);
                invocations.resolved.iter().any(|&id| {
                    let node = self.tree.symbol(id);
                    id == target
                        || id == outer
                        || (node.name == target_node.name
                            && node.namespace == target_node.namespace)
                })
            }
        }
    }
}

fn collect_namespace_usings<'u>(members: &'u [Member], out: &mut Vec<&'u UsingDirective>) {
    for member in members {
        if let Member::Namespace(ns) = member {
            out.extend(ns.usings.iter());
            collect_namespace_usings(ns.members(), out);
        }
    }
}
