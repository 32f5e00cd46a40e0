//! High-level IR (HIR): the symbol model and cross-file resolution.
//!
//! Everything here is built once per run from an immutable [`SourceSet`] and
//! then only read. Per-file results are memoized inside the resolver that
//! computes them, so two runs never share state.
//!
//! ## Key Types
//!
//! - [`NamespaceTree`]: merged namespace tree with qualified/unqualified lookup
//! - [`ImportResolver`]: `using` directives to namespaces, symbols or external names
//! - [`ExtensionRegistry`]: extension methods indexed by declaring namespace
//! - [`InvocationResolver`]: the four reference passes over a file or symbol
//! - [`CodeMetrics`]: cyclomatic complexity and code volume
//!
//! ## Resolution Layers
//!
//! ```text
//! SourceSet                    ← INPUT: parsed files + build manifests
//!     │
//!     ▼
//! NamespaceTree::build         ← Merge namespaces, assign full names
//!     │
//!     ▼
//! ImportResolver::new          ← Per-file directives, per-subproject globals
//!     │
//!     ▼
//! ExtensionRegistry::new       ← Extension methods by namespace
//!     │
//!     ▼
//! InvocationResolver           ← References per file (cached) / per symbol
//! ```
//!
//! [`SourceSet`]: crate::project::SourceSet

mod diagnostics;
mod extensions;
mod ids;
mod imports;
mod invocations;
mod metrics;
mod namespaces;

pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use extensions::{ExtensionMethod, ExtensionRegistry};
pub use ids::{NamespaceId, SymbolId};
pub use imports::{
    ExternalImport, ImportDirective, ImportKind, ImportResolver, ImportTarget, InternalImport,
    ResolvedImports,
};
pub use invocations::{InvocationResolver, Invocations};
pub use metrics::{CodeMetrics, analyze_file, analyze_type};
pub use namespaces::{NamespaceNode, NamespaceTree, SymbolKind, SymbolNode};
