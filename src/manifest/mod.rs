//! Dependency manifest: the output of a run.
//!
//! [`generate`] builds the namespace tree and resolvers for a source set,
//! records the dependencies of every file and every top-level symbol, collapses
//! symbol entries into the namespace entries that already cover them, and
//! finally fills each symbol's `dependents` in a second pass over all files.
//! Every record carries [`Metrics`]; dependent counts come from that second pass.

mod assembler;
mod types;

pub use assembler::{
    ManifestAssembler, ManifestOutput, collapse_namespaces, generate, populate_dependents,
};
pub use types::{
    DependencyEntry, DependencyManifest, DependentEntry, FileManifest, Metrics, SymbolManifest,
};
