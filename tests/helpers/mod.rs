//! Shared fixtures and assertions for the integration tests.

#![allow(dead_code)]

pub mod hir_helpers;
pub mod manifest_assertions;
pub mod source_fixtures;
