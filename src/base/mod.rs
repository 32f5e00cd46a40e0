//! Foundation types for the resolver.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`] - Line/column positions plus byte ranges for syntax nodes
//! - [`TextRange`], [`TextSize`] - Byte offsets
//! - Name helpers (generic stripping, dotted segments)
//! - Path helpers (normalization, component-wise containment)
//! - Language constants (manifest extension, attribute suffix, implicit types)
//!
//! This module has NO dependencies on other monosplit modules.

pub mod constants;
pub mod names;
mod paths;
mod position;

pub use paths::{common_dir, dir_contains, file_stem, normalize_path, parent_dir};
pub use position::{Position, Span};
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
