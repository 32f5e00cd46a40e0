//! Build-root mapping: which subproject owns a file.
//!
//! A subproject is rooted at the directory of its build-manifest file. The
//! mapping only scopes project-global import directives; every other lookup
//! is project-independent.

use tracing::{debug, warn};

use super::SourceSet;
use crate::base::{common_dir, dir_contains, file_stem, normalize_path, parent_dir};

/// A build subproject rooted at a manifest's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subproject {
    /// Manifest directory, `/`-separated; `"."` at the analysis root.
    pub root: String,
    /// Manifest file name without extension.
    pub name: String,
    pub manifest_path: String,
    pub content: String,
}

/// Index of a subproject inside [`BuildRoots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubprojectId(u32);

impl SubprojectId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// All subprojects of a run.
#[derive(Debug, Clone, Default)]
pub struct BuildRoots {
    subprojects: Vec<Subproject>,
}

impl BuildRoots {
    /// Map every build manifest in the source set to a subproject.
    pub fn new(sources: &SourceSet) -> Self {
        let subprojects: Vec<Subproject> = sources
            .manifests()
            .map(|(path, content)| Subproject {
                root: parent_dir(path),
                name: file_stem(path),
                manifest_path: normalize_path(path),
                content: content.to_string(),
            })
            .collect();
        if subprojects.is_empty() {
            warn!("[BUILD_ROOTS] No build manifests found; global imports are scoped per file");
        }
        for project in &subprojects {
            debug!(
                "[BUILD_ROOTS] Subproject '{}' rooted at '{}'",
                project.name, project.root
            );
        }
        Self { subprojects }
    }

    pub fn subprojects(&self) -> &[Subproject] {
        &self.subprojects
    }

    pub fn get(&self, id: SubprojectId) -> Option<&Subproject> {
        self.subprojects.get(id.index())
    }

    /// The subproject with the longest root containing `path`.
    ///
    /// Roots match component-wise (`src/App` does not contain
    /// `src/AppTests/x.cs`). A root of `"."` contains every file.
    pub fn subproject_for_file(&self, path: &str) -> Option<SubprojectId> {
        self.subprojects
            .iter()
            .enumerate()
            .filter(|(_, p)| dir_contains(&p.root, path))
            .max_by_key(|(_, p)| root_depth(&p.root))
            .map(|(i, _)| SubprojectId::new(i))
    }

    /// Longest directory shared by every manifest.
    pub fn common_root(&self) -> Option<String> {
        common_dir(self.subprojects.iter().map(|p| p.manifest_path.as_str()))
    }
}

fn root_depth(root: &str) -> usize {
    if root == "." || root.is_empty() {
        0
    } else {
        root.split('/').filter(|s| !s.is_empty()).count()
    }
}
