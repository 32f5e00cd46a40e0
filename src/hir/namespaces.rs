//! Namespace tree: per-file namespace declarations merged into one tree.
//!
//! Namespace declarations are open: every file that declares `A.B` adds its
//! types to the same node. The tree is built once per run and then only read.
//!
//! ## Storage
//!
//! Nodes and symbols live in two arenas addressed by [`NamespaceId`] and
//! [`SymbolId`]. A node points at its parent by id; ownership runs strictly
//! from the tree to its arenas. Nested types are stored in the namespace of
//! their outermost type with `parent` set, so qualified lookup can walk
//! `Namespace.Outer.Inner` while unqualified lookup only sees top-level types.
//!
//! ## Lookup
//!
//! - [`NamespaceTree::find_in_tree`]: qualified names match by reversed
//!   suffix of the candidate's namespace path; unqualified names fall back to
//!   a depth-first search of the whole tree in declaration order.
//! - [`NamespaceTree::find_in_namespace`]: lookup relative to one node, used
//!   for names imported through a namespace directive.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, trace};

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::ids::{NamespaceId, SymbolId};
use crate::base::names::{join, segments};
use crate::base::{Span, normalize_path};
use crate::project::{AnalysisOptions, SourceSet};
use crate::syntax::{CompilationUnit, Member, TypeDecl, TypeKind};

// ============================================================================
// NODES
// ============================================================================

/// Kind of an exported symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SymbolKind {
    Class,
    Struct,
    Enum,
    Interface,
    Record,
    Delegate,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Struct => "struct",
            SymbolKind::Enum => "enum",
            SymbolKind::Interface => "interface",
            SymbolKind::Record => "record",
            SymbolKind::Delegate => "delegate",
        }
    }
}

impl From<TypeKind> for SymbolKind {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Class => SymbolKind::Class,
            TypeKind::Struct => SymbolKind::Struct,
            TypeKind::Enum => SymbolKind::Enum,
            TypeKind::Interface => SymbolKind::Interface,
            TypeKind::Record => SymbolKind::Record,
            TypeKind::Delegate => SymbolKind::Delegate,
        }
    }
}

/// One segment of the namespace tree. The root has an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceNode {
    pub name: SmolStr,
    exports: Vec<SymbolId>,
    children: Vec<NamespaceId>,
    parent: Option<NamespaceId>,
}

impl NamespaceNode {
    fn new(name: &str, parent: Option<NamespaceId>) -> Self {
        Self {
            name: SmolStr::new(name),
            exports: Vec::new(),
            children: Vec::new(),
            parent,
        }
    }

    /// Symbols declared directly in this namespace, nested types included.
    pub fn exports(&self) -> &[SymbolId] {
        &self.exports
    }

    /// Child namespaces in declaration order.
    pub fn children(&self) -> &[NamespaceId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NamespaceId> {
        self.parent
    }
}

/// An exported type-like declaration.
#[derive(Debug, Clone)]
pub struct SymbolNode<'a> {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Full dotted path of the containing namespace, `""` for the root.
    pub namespace: String,
    pub namespace_id: NamespaceId,
    /// Namespace path, enclosing type names and own name, dot-joined.
    pub full_name: String,
    pub filepath: Arc<str>,
    pub span: Span,
    /// Enclosing type for nested declarations.
    pub parent: Option<SymbolId>,
    pub decl: &'a TypeDecl,
}

#[derive(Debug, Clone)]
struct FileEntry<'a> {
    unit: &'a CompilationUnit,
    /// Explicitly declared namespaces, deduplicated, in declaration order.
    namespaces: Vec<NamespaceId>,
    /// Top-level symbols.
    exports: Vec<SymbolId>,
}

// ============================================================================
// TREE
// ============================================================================

/// The merged namespace tree of one run.
#[derive(Debug)]
pub struct NamespaceTree<'a> {
    sources: &'a SourceSet,
    namespaces: Vec<NamespaceNode>,
    symbols: Vec<SymbolNode<'a>>,
    files: IndexMap<Arc<str>, FileEntry<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> NamespaceTree<'a> {
    /// Build the tree from every file of the source set.
    pub fn build(sources: &'a SourceSet) -> Self {
        let mut tree = Self {
            sources,
            namespaces: vec![NamespaceNode::new("", None)],
            symbols: Vec::new(),
            files: IndexMap::new(),
            diagnostics: Vec::new(),
        };
        let mut collector = DiagnosticCollector::new();

        for (path, unit) in sources.files() {
            let mut entry = FileEntry {
                unit,
                namespaces: Vec::new(),
                exports: Vec::new(),
            };
            tree.add_members(path, &unit.members, NamespaceId::ROOT, &mut entry, &mut collector);
            tree.files.insert(path.clone(), entry);
        }

        tree.assign_namespaces();
        tree.diagnostics = collector.take();
        debug!(
            "[NAMESPACES] Built tree: {} namespaces, {} symbols, {} files",
            tree.namespaces.len(),
            tree.symbols.len(),
            tree.files.len()
        );
        tree
    }

    fn add_members(
        &mut self,
        path: &Arc<str>,
        members: &'a [Member],
        namespace: NamespaceId,
        entry: &mut FileEntry<'a>,
        collector: &mut DiagnosticCollector,
    ) {
        for member in members {
            match member {
                Member::Type(decl) => {
                    let id = self.add_symbol(path, decl, namespace, None);
                    entry.exports.push(id);
                }
                Member::Namespace(decl) => {
                    let Some(name) = decl.name.as_deref().filter(|n| !segments(n).is_empty())
                    else {
                        collector.malformed_namespace(path, decl.span, "missing name");
                        continue;
                    };
                    let Some(body) = decl.body.as_deref() else {
                        collector.malformed_namespace(path, decl.span, "missing body");
                        continue;
                    };
                    let child = self.add_namespace(namespace, name);
                    if !entry.namespaces.contains(&child) {
                        entry.namespaces.push(child);
                    }
                    self.add_members(path, body, child, entry, collector);
                }
                Member::Statement(_) => {}
            }
        }
    }

    fn add_symbol(
        &mut self,
        path: &Arc<str>,
        decl: &'a TypeDecl,
        namespace: NamespaceId,
        parent: Option<SymbolId>,
    ) -> SymbolId {
        let id = SymbolId::new(self.symbols.len());
        self.symbols.push(SymbolNode {
            name: SmolStr::new(&decl.name),
            kind: decl.kind.into(),
            namespace: String::new(),
            namespace_id: namespace,
            full_name: String::new(),
            filepath: path.clone(),
            span: decl.span,
            parent,
            decl,
        });
        self.namespaces[namespace.index()].exports.push(id);
        for nested in decl.nested_types() {
            self.add_symbol(path, nested, namespace, Some(id));
        }
        id
    }

    /// Walk or create one node per segment of `dotted` below `parent`.
    fn add_namespace(&mut self, parent: NamespaceId, dotted: &str) -> NamespaceId {
        let mut current = parent;
        for segment in segments(dotted) {
            current = match self.find_child(current, segment) {
                Some(existing) => existing,
                None => {
                    let id = NamespaceId::new(self.namespaces.len());
                    self.namespaces.push(NamespaceNode::new(segment, Some(current)));
                    self.namespaces[current.index()].children.push(id);
                    trace!("[NAMESPACES] Created '{}'", segment);
                    id
                }
            };
        }
        current
    }

    /// Give every symbol the full path of its containing node.
    fn assign_namespaces(&mut self) {
        let names: Vec<String> = (0..self.namespaces.len())
            .map(|i| self.full_name(NamespaceId::new(i)))
            .collect();
        for (node, full) in self.namespaces.iter().zip(&names) {
            for &sym in &node.exports {
                self.symbols[sym.index()].namespace = full.clone();
            }
        }
        let full_names: Vec<String> = (0..self.symbols.len())
            .map(|i| {
                let id = SymbolId::new(i);
                let qualifier = self.qualifier_segments(id).join(".");
                join(&qualifier, &self.symbols[i].name)
            })
            .collect();
        for (symbol, full) in self.symbols.iter_mut().zip(full_names) {
            symbol.full_name = full;
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn sources(&self) -> &'a SourceSet {
        self.sources
    }

    pub fn options(&self) -> &'a AnalysisOptions {
        self.sources.options()
    }

    pub fn root(&self) -> &NamespaceNode {
        &self.namespaces[NamespaceId::ROOT.index()]
    }

    pub fn namespace(&self, id: NamespaceId) -> &NamespaceNode {
        &self.namespaces[id.index()]
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    pub fn symbol(&self, id: SymbolId) -> &SymbolNode<'a> {
        &self.symbols[id.index()]
    }

    pub fn get_symbol(&self, id: SymbolId) -> Option<&SymbolNode<'a>> {
        self.symbols.get(id.index())
    }

    /// All symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &SymbolNode<'a>)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId::new(i), s))
    }

    /// Analyzed file paths in input order.
    pub fn files(&self) -> impl Iterator<Item = &Arc<str>> {
        self.files.keys()
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.files.contains_key(normalize_path(path).as_str())
    }

    /// Interned path of an analyzed file.
    pub fn file_key(&self, path: &str) -> Option<&Arc<str>> {
        self.files
            .get_key_value(normalize_path(path).as_str())
            .map(|(k, _)| k)
    }

    pub fn file_unit(&self, path: &str) -> Option<&'a CompilationUnit> {
        self.files.get(normalize_path(path).as_str()).map(|e| e.unit)
    }

    /// Top-level symbols declared in a file.
    pub fn exports_for_file(&self, path: &str) -> Option<&[SymbolId]> {
        self.files
            .get(normalize_path(path).as_str())
            .map(|e| e.exports.as_slice())
    }

    /// Namespaces a file declares explicitly.
    pub fn file_namespaces(&self, path: &str) -> Option<&[NamespaceId]> {
        self.files
            .get(normalize_path(path).as_str())
            .map(|e| e.namespaces.as_slice())
    }

    /// Malformed declarations met while building.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // ========================================================================
    // NAMES
    // ========================================================================

    /// Dotted name of a namespace: non-empty segments from the root down.
    pub fn full_name(&self, id: NamespaceId) -> String {
        self.namespace_segments(id).join(".")
    }

    fn namespace_segments(&self, id: NamespaceId) -> Vec<&str> {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(ns) = current {
            let node = &self.namespaces[ns.index()];
            if !node.name.is_empty() {
                parts.push(node.name.as_str());
            }
            current = node.parent;
        }
        parts.reverse();
        parts
    }

    /// Namespace segments followed by enclosing type names, outermost first.
    fn qualifier_segments(&self, id: SymbolId) -> Vec<&str> {
        let symbol = &self.symbols[id.index()];
        let mut ancestors = Vec::new();
        let mut current = symbol.parent;
        while let Some(parent) = current {
            let node = &self.symbols[parent.index()];
            ancestors.push(node.name.as_str());
            current = node.parent;
        }
        ancestors.reverse();
        let mut parts = self.namespace_segments(symbol.namespace_id);
        parts.extend(ancestors);
        parts
    }

    /// The outermost enclosing type of a symbol (itself when top-level).
    pub fn outermost(&self, id: SymbolId) -> SymbolId {
        let mut current = id;
        while let Some(parent) = self.symbols[current.index()].parent {
            current = parent;
        }
        current
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    fn find_child(&self, parent: NamespaceId, segment: &str) -> Option<NamespaceId> {
        self.namespaces[parent.index()]
            .children
            .iter()
            .copied()
            .find(|c| self.namespaces[c.index()].name == segment)
    }

    /// Walk `dotted` segment by segment from the root.
    pub fn find_namespace(&self, dotted: &str) -> Option<NamespaceId> {
        segments(dotted)
            .into_iter()
            .try_fold(NamespaceId::ROOT, |ns, segment| self.find_child(ns, segment))
    }

    /// Pre-order depth-first walk from `start`, children in declaration order.
    fn dfs_order(&self, start: NamespaceId) -> Vec<NamespaceId> {
        let mut order = Vec::new();
        let mut visited = FxHashSet::default();
        let mut stack = vec![start];
        while let Some(ns) = stack.pop() {
            if !visited.insert(ns) {
                continue;
            }
            order.push(ns);
            stack.extend(self.namespaces[ns.index()].children.iter().rev());
        }
        order
    }

    fn top_level_export(&self, ns: NamespaceId, name: &str) -> Option<SymbolId> {
        self.namespaces[ns.index()]
            .exports
            .iter()
            .copied()
            .find(|&id| {
                let symbol = &self.symbols[id.index()];
                symbol.parent.is_none() && symbol.name == name
            })
    }

    /// Every symbol named `name`, in tree order.
    fn candidates<'t>(&'t self, name: &'t str) -> impl Iterator<Item = SymbolId> + 't {
        self.dfs_order(NamespaceId::ROOT)
            .into_iter()
            .flat_map(move |ns| self.namespaces[ns.index()].exports.iter().copied())
            .filter(move |&id| self.symbols[id.index()].name == name)
    }

    /// Resolve a possibly-qualified name against the whole tree.
    ///
    /// `A.B.X` yields the first `X` whose namespace path ends with `A.B`.
    /// An unqualified name is searched from the root: the root's own exports
    /// first, then every child namespace depth-first in declaration order.
    /// A name matching nothing yields `None`.
    pub fn find_in_tree(&self, dotted: &str) -> Option<SymbolId> {
        let parts = segments(dotted);
        let (simple, qualifier) = parts.split_last()?;
        if qualifier.is_empty() {
            return self.find_unqualified(NamespaceId::ROOT, simple);
        }
        let wanted: Vec<&str> = qualifier.iter().rev().copied().collect();
        let found = self.candidates(simple).find(|&id| {
            let path = self.qualifier_segments(id);
            path.len() >= wanted.len() && path.iter().rev().zip(&wanted).all(|(a, b)| a == b)
        });
        trace!("[NAMESPACES] find_in_tree '{}' -> {:?}", dotted, found);
        found
    }

    /// Unqualified lookup starting at `start`: its exports, then its
    /// descendants depth-first.
    pub fn find_unqualified(&self, start: NamespaceId, name: &str) -> Option<SymbolId> {
        self.dfs_order(start)
            .into_iter()
            .find_map(|ns| self.top_level_export(ns, name))
    }

    /// Resolve a name relative to one namespace.
    ///
    /// A simple name must be a top-level export of `ns`; a dotted name must
    /// match exactly the path `ns.<qualifier>` (nested namespaces or
    /// enclosing types).
    pub fn find_in_namespace(&self, ns: NamespaceId, dotted: &str) -> Option<SymbolId> {
        let parts = segments(dotted);
        let (simple, qualifier) = parts.split_last()?;
        if qualifier.is_empty() {
            return self.top_level_export(ns, simple);
        }
        let mut target = self.namespace_segments(ns);
        target.extend(qualifier.iter().copied());
        self.candidates(simple)
            .find(|&id| self.qualifier_segments(id) == target)
    }
}
