//! # monosplit-base
//!
//! Cross-file symbol resolution for namespace-based C# projects, producing the
//! dependency manifest that audit and extraction tooling consume.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! audit, extract → Queries over a finished manifest
//!   ↓
//! manifest       → File/symbol dependency records, namespace collapsing, dependents
//!   ↓
//! hir            → Namespace tree, imports, extension methods, invocations, metrics
//!   ↓
//! project        → Source set, build roots, analysis options
//!   ↓
//! syntax         → Typed C# syntax tree and visitor
//!   ↓
//! base           → Primitives (Span/Position, TextRange, names, paths)
//! ```
//!
//! ## Example
//!
//! ```
//! use monosplit::manifest::generate;
//! use monosplit::project::SourceSet;
//! use monosplit::syntax::{CompilationUnit, NamespaceDecl, TypeDecl, TypeRef, UsingDirective};
//!
//! let mut sources = SourceSet::new();
//! sources.add_file(
//!     "Models.cs",
//!     CompilationUnit::new().member(NamespaceDecl::new("Shop").member(TypeDecl::class("Order"))),
//! );
//! sources.add_file(
//!     "Billing.cs",
//!     CompilationUnit::new()
//!         .using(UsingDirective::new("Shop"))
//!         .member(TypeDecl::class("Invoice").field("order", TypeRef::named("Order"))),
//! );
//!
//! let output = generate(&sources);
//! let billing = output.manifest.get("Billing.cs").unwrap();
//! assert!(billing.dependencies["Shop"].symbols.contains_key("Order"));
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → project → hir → manifest)
// ============================================================================

/// Foundation types: Span/Position, TextRange, name and path helpers
pub mod base;

/// Syntax: typed C# syntax tree and visitor
pub mod syntax;

/// Project: source set, build roots, analysis options
pub mod project;

/// High-level IR: namespace tree and resolvers
pub mod hir;

/// Dependency manifest assembly
pub mod manifest;

/// Circular dependencies, unused files, dependency counts
pub mod audit;

/// Transitive symbol closure for extraction
pub mod extract;

/// Error types
pub mod error;

// Re-export the entry points
pub use error::{AnalysisError, Result};
pub use manifest::{DependencyManifest, ManifestOutput, generate};
pub use project::{AnalysisOptions, SourceSet};

// Re-export foundation types
pub use base::{Position, Span, TextRange, TextSize};
