//! Namespace tree, import, extension and invocation resolution across files.

pub mod tests_extensions;
pub mod tests_imports;
pub mod tests_namespace_tree;
