//! Project layer: the input file set, build subprojects, run options.

mod build_roots;
mod options;
mod source_set;

pub use build_roots::{BuildRoots, Subproject, SubprojectId};
pub use options::AnalysisOptions;
pub use source_set::SourceSet;
