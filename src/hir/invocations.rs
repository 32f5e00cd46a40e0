//! Invocation resolution: every reference in a file or symbol body.
//!
//! A region is scanned by four independent passes, each collecting its own
//! deduplicated names before resolution:
//!
//! 1. **types**: every position that names a type
//! 2. **chains**: outermost member-access chains, minus the accessed member
//! 3. **extensions**: `receiver.Method(...)` calls, through the extension registry
//! 4. **attributes**: attribute names, retried with the attribute suffix
//!
//! A name resolves through the file's imports first and the whole tree second.
//! Resolved nested symbols are reported through their outermost type.

use std::cell::RefCell;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use super::diagnostics::{Diagnostic, DiagnosticCollector};
use super::extensions::ExtensionRegistry;
use super::ids::SymbolId;
use super::imports::{ImportResolver, ResolvedImports};
use super::namespaces::NamespaceTree;
use crate::base::constants::is_predefined_type;
use crate::base::names::{strip_alias_qualifier, strip_generics};
use crate::error::{AnalysisError, Result};
use crate::syntax::visit::{
    Visitor, walk_attribute, walk_expr, walk_method, walk_parameter, walk_type_decl,
    walk_type_ref,
};
use crate::syntax::{
    Attribute, CompilationUnit, Expr, MethodDecl, Parameter, TypeDecl, TypeMember, TypeRef,
};

/// References found in one region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocations {
    /// Resolved symbols, outermost types only, in discovery order.
    pub resolved: IndexSet<SymbolId>,
    /// Names that resolved to nothing in the tree.
    pub unresolved: IndexSet<String>,
}

impl Invocations {
    pub fn contains(&self, id: SymbolId) -> bool {
        self.resolved.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty() && self.unresolved.is_empty()
    }
}

// ============================================================================
// REGIONS
// ============================================================================

#[derive(Clone, Copy)]
enum Region<'ast> {
    File(&'ast CompilationUnit),
    Symbol(&'ast TypeDecl),
}

impl<'ast> Region<'ast> {
    fn accept<V: Visitor<'ast>>(self, visitor: &mut V) {
        match self {
            Region::File(unit) => visitor.visit_compilation_unit(unit),
            Region::Symbol(decl) => visitor.visit_type_decl(decl),
        }
    }
}

/// Names declared inside a region that shadow type names.
#[derive(Default)]
struct ScopeNames<'ast> {
    /// Locals, parameters, fields and properties.
    variables: FxHashSet<&'ast str>,
    /// Generic type parameters.
    generics: FxHashSet<&'ast str>,
}

impl<'ast> Visitor<'ast> for ScopeNames<'ast> {
    fn visit_type_decl(&mut self, decl: &'ast TypeDecl) {
        self.generics.extend(decl.type_params.iter().map(String::as_str));
        for member in &decl.members {
            match member {
                TypeMember::Field(field) => {
                    self.variables.insert(&field.name);
                }
                TypeMember::Property(prop) => {
                    self.variables.insert(&prop.name);
                }
                _ => {}
            }
        }
        walk_type_decl(self, decl);
    }

    fn visit_method(&mut self, method: &'ast MethodDecl) {
        self.generics.extend(method.type_params.iter().map(String::as_str));
        walk_method(self, method);
    }

    fn visit_parameter(&mut self, parameter: &'ast Parameter) {
        self.variables.insert(&parameter.name);
        walk_parameter(self, parameter);
    }

    fn visit_local_name(&mut self, name: &'ast str) {
        self.variables.insert(name);
    }
}

// ============================================================================
// PASSES
// ============================================================================

/// Pass 1: named types.
#[derive(Default)]
struct TypeNames<'ast> {
    names: IndexSet<&'ast str>,
}

impl<'ast> Visitor<'ast> for TypeNames<'ast> {
    fn visit_type_ref(&mut self, ty: &'ast TypeRef) {
        if let TypeRef::Named { name, .. } = ty {
            self.names.insert(name);
        }
        walk_type_ref(self, ty);
    }
}

/// Pass 2: member-access chains.
struct ChainNames<'s, 'ast> {
    scope: &'s ScopeNames<'ast>,
    names: IndexSet<String>,
}

impl<'ast> ChainNames<'_, 'ast> {
    /// Walk the spine of one outermost chain.
    ///
    /// Segments accessed after the first call belong to a returned value, so
    /// the dotted prefix runs from the base name up to the innermost call.
    /// Call arguments and non-name bases are scanned as new roots.
    fn chain(&mut self, expr: &'ast Expr) {
        let mut rev: Vec<&'ast str> = Vec::new();
        let mut current = expr;
        let named_base = loop {
            match current {
                Expr::MemberAccess { target, name, .. } => {
                    rev.push(name);
                    current = target.as_ref();
                }
                Expr::Invocation { callee, args } => {
                    for arg in args {
                        self.visit_expr(arg);
                    }
                    rev.clear();
                    current = callee.as_ref();
                }
                Expr::Identifier(name) | Expr::GenericName { name, .. } => {
                    rev.push(name);
                    break true;
                }
                other => {
                    walk_expr(self, other);
                    break false;
                }
            }
        };
        if !named_base || rev.len() < 2 {
            return;
        }
        rev.reverse();
        let leading = rev[0];
        if self.scope.variables.contains(leading) || self.scope.generics.contains(leading) {
            trace!("[INVOCATIONS] Skipping chain on variable '{}'", leading);
            return;
        }
        self.names.insert(rev[..rev.len() - 1].join("."));
    }
}

impl<'ast> Visitor<'ast> for ChainNames<'_, 'ast> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::MemberAccess { .. } | Expr::Invocation { .. } => self.chain(expr),
            _ => walk_expr(self, expr),
        }
    }
}

/// Pass 3: method names called on a receiver.
#[derive(Default)]
struct CalledMethods<'ast> {
    names: IndexSet<&'ast str>,
}

impl<'ast> Visitor<'ast> for CalledMethods<'ast> {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        if let Expr::Invocation { callee, .. } = expr {
            if let Expr::MemberAccess { name, .. } = callee.as_ref() {
                self.names.insert(name);
            }
        }
        walk_expr(self, expr);
    }
}

/// Pass 4: attribute names.
#[derive(Default)]
struct AttributeNames<'ast> {
    names: IndexSet<&'ast str>,
}

impl<'ast> Visitor<'ast> for AttributeNames<'ast> {
    fn visit_attribute(&mut self, attribute: &'ast Attribute) {
        self.names.insert(&attribute.name);
        walk_attribute(self, attribute);
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves the references of files and symbols.
///
/// File results are cached for the lifetime of the resolver; symbol results
/// are recomputed on every call.
pub struct InvocationResolver<'a> {
    tree: &'a NamespaceTree<'a>,
    imports: &'a ImportResolver<'a>,
    extensions: &'a ExtensionRegistry,
    file_cache: RefCell<FxHashMap<Arc<str>, Arc<Invocations>>>,
}

impl<'a> InvocationResolver<'a> {
    pub fn new(
        tree: &'a NamespaceTree<'a>,
        imports: &'a ImportResolver<'a>,
        extensions: &'a ExtensionRegistry,
    ) -> Self {
        Self {
            tree,
            imports,
            extensions,
            file_cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn tree(&self) -> &'a NamespaceTree<'a> {
        self.tree
    }

    pub fn imports(&self) -> &'a ImportResolver<'a> {
        self.imports
    }

    pub fn extensions(&self) -> &'a ExtensionRegistry {
        self.extensions
    }

    /// Resolve one name as seen from `filepath`: imports first, then the tree.
    pub fn resolve_symbol(&self, name: &str, filepath: &str) -> Result<Option<SymbolId>> {
        let imports = self.imports.resolve_directives(filepath)?;
        Ok(self.resolve_with(&imports, name))
    }

    fn resolve_with(&self, imports: &ResolvedImports, name: &str) -> Option<SymbolId> {
        let name = strip_generics(strip_alias_qualifier(name));
        self.imports
            .find_symbol_in_imports(imports, &name)
            .or_else(|| self.tree.find_in_tree(&name))
    }

    /// References of a whole file. Memoized per file.
    pub fn get_invocations_from_file(&self, filepath: &str) -> Result<Arc<Invocations>> {
        let key = self
            .tree
            .file_key(filepath)
            .ok_or_else(|| AnalysisError::unknown_file(filepath))?;
        if let Some(hit) = self.file_cache.borrow().get(key) {
            trace!("[INVOCATIONS] Cache hit for {}", key);
            return Ok(hit.clone());
        }
        let unit = self
            .tree
            .file_unit(key)
            .ok_or_else(|| AnalysisError::unknown_file(filepath))?;
        let invocations = Arc::new(self.collect(Region::File(unit), key, None, Vec::new())?);
        debug!(
            "[INVOCATIONS] {}: {} resolved, {} unresolved",
            key,
            invocations.resolved.len(),
            invocations.unresolved.len()
        );
        self.file_cache
            .borrow_mut()
            .insert(key.clone(), invocations.clone());
        Ok(invocations)
    }

    /// References of one symbol's declaration, excluding the symbol itself
    /// and its nested types.
    pub fn get_invocations_for_symbol(&self, id: SymbolId) -> Result<Invocations> {
        let symbol = self
            .tree
            .get_symbol(id)
            .ok_or_else(|| AnalysisError::UnknownSymbol(format!("{:?}", id)))?;
        let mut generics = Vec::new();
        let mut ancestor = symbol.parent;
        while let Some(parent) = ancestor {
            let node = self.tree.symbol(parent);
            generics.extend(node.decl.type_params.iter().map(String::as_str));
            ancestor = node.parent;
        }
        self.collect(
            Region::Symbol(symbol.decl),
            &symbol.filepath,
            Some(id),
            generics,
        )
    }

    fn collect(
        &self,
        region: Region<'a>,
        filepath: &str,
        exclude: Option<SymbolId>,
        outer_generics: Vec<&'a str>,
    ) -> Result<Invocations> {
        let imports = self.imports.resolve_directives(filepath)?;
        let options = self.tree.options();

        let mut scope = ScopeNames::default();
        scope.generics.extend(outer_generics);
        region.accept(&mut scope);

        let mut types = TypeNames::default();
        region.accept(&mut types);
        let mut chains = ChainNames {
            scope: &scope,
            names: IndexSet::new(),
        };
        region.accept(&mut chains);
        let mut calls = CalledMethods::default();
        region.accept(&mut calls);
        let mut attributes = AttributeNames::default();
        region.accept(&mut attributes);

        let mut out = Invocations::default();
        let mut record = |id: SymbolId| {
            if exclude.is_some_and(|ex| self.is_within(id, ex)) {
                return;
            }
            out.resolved.insert(self.tree.outermost(id));
        };
        let mut unresolved = IndexSet::new();

        for name in types.names {
            if scope.generics.contains(name)
                || options.is_implicit_type(name)
                || is_predefined_type(name)
            {
                continue;
            }
            match self.resolve_with(&imports, name) {
                Some(id) => record(id),
                None => {
                    unresolved.insert(strip_generics(name));
                }
            }
        }

        for name in chains.names {
            match self.resolve_with(&imports, &name) {
                Some(id) => record(id),
                None => {
                    unresolved.insert(name);
                }
            }
        }

        for name in calls.names {
            for extension in self.extensions.find_extension(self.imports, name, filepath)? {
                record(extension.symbol);
            }
        }

        let suffix = options.attribute_suffix.as_str();
        for name in attributes.names {
            let found = self.resolve_with(&imports, name).or_else(|| {
                (!suffix.is_empty() && !name.ends_with(suffix))
                    .then(|| self.resolve_with(&imports, &format!("{}{}", name, suffix)))
                    .flatten()
            });
            match found {
                Some(id) => record(id),
                None => {
                    unresolved.insert(name.to_string());
                }
            }
        }

        out.unresolved = unresolved;
        Ok(out)
    }

    /// Whether `id` is `ancestor` or declared inside it.
    fn is_within(&self, id: SymbolId, ancestor: SymbolId) -> bool {
        let mut current = Some(id);
        while let Some(symbol) = current {
            if symbol == ancestor {
                return true;
            }
            current = self.tree.symbol(symbol).parent;
        }
        false
    }

    /// Top-level symbols, per file, whose declarations reference `symbol`.
    pub fn dependents_of(&self, symbol: SymbolId) -> Result<IndexMap<Arc<str>, Vec<SymbolId>>> {
        let target = self.tree.outermost(symbol);
        let mut dependents: IndexMap<Arc<str>, Vec<SymbolId>> = IndexMap::new();
        for path in self.tree.files() {
            for &source in self.tree.exports_for_file(path).unwrap_or_default() {
                if self.get_invocations_for_symbol(source)?.contains(target) {
                    dependents.entry(path.clone()).or_default().push(source);
                }
            }
        }
        Ok(dependents)
    }

    /// `W0001` warnings for the file's own directives that nothing uses.
    ///
    /// Global directives apply to the whole subproject and are not checked.
    pub fn unused_directives(&self, filepath: &str) -> Result<Vec<Diagnostic>> {
        let invocations = self.get_invocations_from_file(filepath)?;
        let mut collector = DiagnosticCollector::new();
        for directive in self.imports.parse_directives(filepath)? {
            if directive.is_global || self.imports.is_directive_useful(&invocations, &directive) {
                continue;
            }
            collector.unused_import(&directive.filepath, directive.span, &directive.name);
        }
        Ok(collector.take())
    }
}
