//! The immutable input of one analysis run.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::AnalysisOptions;
use crate::base::normalize_path;
use crate::syntax::CompilationUnit;

/// Parsed source files plus build-manifest contents.
///
/// Paths are normalized on insertion and iteration follows insertion order,
/// which makes every downstream structure deterministic for a given input.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    files: IndexMap<Arc<str>, CompilationUnit>,
    manifests: IndexMap<String, String>,
    skipped: Vec<String>,
    options: AnalysisOptions,
}

impl SourceSet {
    /// Create an empty source set with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty source set with the given options.
    pub fn with_options(options: AnalysisOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Add a parsed file. Returns `false` when the path is excluded.
    pub fn add_file(&mut self, path: &str, unit: CompilationUnit) -> bool {
        if self.options.is_excluded(path) {
            debug!("[SOURCES] Skipping excluded file {}", path);
            return false;
        }
        let path = normalize_path(path);
        if self.files.insert(Arc::from(path.as_str()), unit).is_some() {
            debug!("[SOURCES] Replaced existing entry for {}", path);
        }
        true
    }

    /// Add the outcome of parsing a file.
    ///
    /// A parse failure is logged and the file is left out of the run; the
    /// remaining files are still analyzed.
    pub fn add_parsed<E: fmt::Display>(
        &mut self,
        path: &str,
        parsed: Result<CompilationUnit, E>,
    ) -> bool {
        match parsed {
            Ok(unit) => self.add_file(path, unit),
            Err(e) => {
                warn!("[SOURCES] Failed to parse {}, skipping: {}", path, e);
                self.skipped.push(normalize_path(path));
                false
            }
        }
    }

    /// Add a build-manifest file. Returns `false` when the path does not carry
    /// the manifest extension.
    pub fn add_manifest(&mut self, path: &str, content: impl Into<String>) -> bool {
        if !self.options.is_manifest(path) {
            debug!("[SOURCES] {} is not a build manifest", path);
            return false;
        }
        self.manifests.insert(normalize_path(path), content.into());
        true
    }

    /// Parsed files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = (&Arc<str>, &CompilationUnit)> {
        self.files.iter()
    }

    /// Look up a parsed file by path.
    pub fn file(&self, path: &str) -> Option<&CompilationUnit> {
        self.files.get(normalize_path(path).as_str())
    }

    /// The interned path for a file, if present.
    pub fn file_path(&self, path: &str) -> Option<&Arc<str>> {
        self.files
            .get_key_value(normalize_path(path).as_str())
            .map(|(k, _)| k)
    }

    /// Build-manifest paths and contents.
    pub fn manifests(&self) -> impl Iterator<Item = (&str, &str)> {
        self.manifests.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Paths whose parse failed.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
