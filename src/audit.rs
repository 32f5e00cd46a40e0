//! Audit queries over a finished manifest.
//!
//! Two directions are read from every file record:
//!
//! - forward: the files its dependencies point at (symbol-level entries are
//!   keyed by file, file-level entries are mapped through the symbol index)
//! - reverse: the files listed in the `dependents` of its symbols
//!
//! A file's own path never appears in either direction.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::manifest::DependencyManifest;

/// Two files that depend on each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CircularDependency {
    pub file: String,
    pub other: String,
}

/// Dependency totals of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCounts {
    pub filepath: String,
    /// Distinct analyzed files this file depends on.
    pub dependencies: usize,
    /// File-level entries outside the analyzed tree.
    pub external: usize,
    /// Distinct files that depend on this file.
    pub dependents: usize,
}

/// Files that `path` depends on.
pub fn file_dependencies(manifest: &DependencyManifest, path: &str) -> IndexSet<String> {
    let mut out = IndexSet::new();
    let Some(file) = manifest.get(path) else {
        return out;
    };
    let index = manifest.symbol_files();

    for symbol in file.symbols.values() {
        for (target, entry) in &symbol.dependencies {
            if !entry.is_external && target != path && manifest.get(target).is_some() {
                out.insert(target.clone());
            }
        }
    }
    for entry in file.dependencies.values().filter(|e| !e.is_external) {
        for name in entry.symbols.keys() {
            let full = if entry.is_namespace {
                format!("{}.{}", entry.id, name)
            } else {
                name.clone()
            };
            if let Some(&target) = index.get(full.as_str()) {
                if target != path {
                    out.insert(target.to_string());
                }
            }
        }
    }
    out
}

/// Files listed as dependents of any symbol of `path`.
pub fn file_dependents(manifest: &DependencyManifest, path: &str) -> IndexSet<String> {
    manifest
        .get(path)
        .map(|file| {
            file.symbols
                .values()
                .flat_map(|s| s.dependents.keys())
                .filter(|k| k.as_str() != path)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Pairs of files where each depends on the other, once per pair, in manifest order.
pub fn circular_dependencies(manifest: &DependencyManifest) -> Vec<CircularDependency> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for (path, _) in manifest.iter() {
        let dependents = file_dependents(manifest, path);
        for other in file_dependencies(manifest, path) {
            if !dependents.contains(&other) {
                continue;
            }
            let pair = if path < other.as_str() {
                (path.to_string(), other.clone())
            } else {
                (other.clone(), path.to_string())
            };
            if seen.insert(pair) {
                out.push(CircularDependency {
                    file: path.to_string(),
                    other,
                });
            }
        }
    }
    debug!("[AUDIT] {} circular dependencies", out.len());
    out
}

/// Files no other file depends on.
pub fn unused_files(manifest: &DependencyManifest) -> Vec<String> {
    manifest
        .iter()
        .filter(|(path, _)| file_dependents(manifest, path).is_empty())
        .map(|(path, _)| path.to_string())
        .collect()
}

pub fn dependency_counts(manifest: &DependencyManifest) -> Vec<DependencyCounts> {
    manifest
        .iter()
        .map(|(path, file)| DependencyCounts {
            filepath: path.to_string(),
            dependencies: file_dependencies(manifest, path).len(),
            external: file.dependencies.values().filter(|e| e.is_external).count(),
            dependents: file_dependents(manifest, path).len(),
        })
        .collect()
}
