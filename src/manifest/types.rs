//! Output records of the dependency manifest.
//!
//! With the `serde` feature every record serializes with camelCase field
//! names, the way downstream audit and extraction tooling reads them.

use indexmap::{IndexMap, IndexSet};

use crate::hir::{CodeMetrics, SymbolKind};

/// One outgoing dependency of a file or symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DependencyEntry {
    /// Target file path, namespace full name, symbol full name, or raw external name.
    pub id: String,
    pub is_external: bool,
    /// The entry stands for a whole imported namespace.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "std::ops::Not::not")
    )]
    pub is_namespace: bool,
    /// Symbols reached through this entry, `id → id`.
    pub symbols: IndexMap<String, String>,
}

impl DependencyEntry {
    /// A dependency on something inside the analyzed tree.
    pub fn internal(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// A dependency on a whole namespace.
    pub fn namespace(id: impl Into<String>) -> Self {
        Self {
            is_namespace: true,
            ..Self::internal(id)
        }
    }

    /// A dependency outside the analyzed tree.
    pub fn external(id: impl Into<String>) -> Self {
        Self {
            is_external: true,
            ..Self::internal(id)
        }
    }

    pub fn add_symbol(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.symbols.insert(id.clone(), id);
    }

    pub fn with_symbol(mut self, id: impl Into<String>) -> Self {
        self.add_symbol(id);
        self
    }
}

/// A file whose symbols reference a symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DependentEntry {
    pub id: String,
    pub filepath: String,
    /// Referencing symbols of that file. Empty when only file-level code refers.
    pub symbol_ids: IndexSet<String>,
}

/// Size, complexity and coupling of a file or symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Metrics {
    pub character_count: usize,
    pub code_character_count: usize,
    pub lines_count: usize,
    pub code_line_count: usize,
    /// Entries in the record's `dependencies`.
    pub dependency_count: usize,
    /// Files referring to the record; filled by the dependents pass.
    pub dependent_count: usize,
    pub cyclomatic_complexity: usize,
}

impl Metrics {
    pub fn new(code: CodeMetrics, dependency_count: usize) -> Self {
        Self {
            character_count: code.character_count,
            code_character_count: code.code_character_count,
            lines_count: code.lines_count,
            code_line_count: code.code_line_count,
            dependency_count,
            dependent_count: 0,
            cyclomatic_complexity: code.cyclomatic_complexity,
        }
    }
}

/// Per-symbol record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SymbolManifest {
    /// Symbol full name.
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: SymbolKind,
    pub line_count: usize,
    pub character_count: usize,
    pub metrics: Metrics,
    /// Keyed by declaring file path, or by raw name for external entries.
    pub dependencies: IndexMap<String, DependencyEntry>,
    /// Keyed by referencing file path.
    pub dependents: IndexMap<String, DependentEntry>,
}

/// Per-file record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct FileManifest {
    pub id: String,
    pub filepath: String,
    pub line_count: usize,
    pub character_count: usize,
    pub metrics: Metrics,
    /// Keyed by symbol full name, namespace full name, or raw external name.
    pub dependencies: IndexMap<String, DependencyEntry>,
    /// Top-level symbols keyed by full name.
    pub symbols: IndexMap<String, SymbolManifest>,
}

/// The dependency manifest of a run, keyed by file path in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct DependencyManifest {
    files: IndexMap<String, FileManifest>,
}

impl DependencyManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: FileManifest) {
        self.files.insert(file.filepath.clone(), file);
    }

    pub fn get(&self, path: &str) -> Option<&FileManifest> {
        self.files.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut FileManifest> {
        self.files.get_mut(path)
    }

    pub fn files(&self) -> &IndexMap<String, FileManifest> {
        &self.files
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileManifest)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Map every symbol full name to its declaring file.
    pub fn symbol_files(&self) -> IndexMap<&str, &str> {
        self.files
            .values()
            .flat_map(|file| {
                file.symbols
                    .keys()
                    .map(move |id| (id.as_str(), file.filepath.as_str()))
            })
            .collect()
    }

    /// Pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
