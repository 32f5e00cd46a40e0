//! Analysis configuration.

use crate::base::constants::{
    ATTRIBUTE_SUFFIX, EXCLUDED_DIRS, IMPLICIT_TYPE_NAMES, PROJECT_MANIFEST_EXTENSION,
};

/// Options for one analysis run.
///
/// The defaults match C# conventions; callers override individual fields with
/// struct update syntax:
///
/// ```
/// use monosplit::project::AnalysisOptions;
///
/// let options = AnalysisOptions {
///     report_unused_imports: false,
///     ..AnalysisOptions::default()
/// };
/// assert_eq!(options.attribute_suffix, "Attribute");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Extension that marks a build-manifest file.
    pub manifest_extension: String,
    /// Suffix retried when an attribute name does not resolve as written.
    pub attribute_suffix: String,
    /// Names that declare an implicitly typed variable.
    pub implicit_type_names: Vec<String>,
    /// Directories whose files are dropped from the source set.
    pub excluded_dirs: Vec<String>,
    /// Produce a warning for every import directive nothing in the file uses.
    pub report_unused_imports: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            manifest_extension: PROJECT_MANIFEST_EXTENSION.to_string(),
            attribute_suffix: ATTRIBUTE_SUFFIX.to_string(),
            implicit_type_names: IMPLICIT_TYPE_NAMES.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            report_unused_imports: true,
        }
    }
}

impl AnalysisOptions {
    /// Whether `name` declares an implicitly typed variable.
    pub fn is_implicit_type(&self, name: &str) -> bool {
        self.implicit_type_names.iter().any(|n| n == name)
    }

    /// Whether `path` names a build-manifest file.
    pub fn is_manifest(&self, path: &str) -> bool {
        path.ends_with(self.manifest_extension.as_str())
    }

    /// Whether `path` lies under an excluded directory.
    pub fn is_excluded(&self, path: &str) -> bool {
        path.split(['/', '\\'])
            .any(|segment| self.excluded_dirs.iter().any(|d| d == segment))
    }
}
