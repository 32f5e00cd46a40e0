//! Lookups and assertions over a generated manifest.

use monosplit::manifest::{DependencyManifest, FileManifest, SymbolManifest};

pub fn file_record<'m>(manifest: &'m DependencyManifest, path: &str) -> &'m FileManifest {
    manifest
        .get(path)
        .unwrap_or_else(|| panic!("Expected file '{}' in manifest", path))
}

pub fn symbol_record<'m>(
    manifest: &'m DependencyManifest,
    path: &str,
    symbol: &str,
) -> &'m SymbolManifest {
    file_record(manifest, path)
        .symbols
        .get(symbol)
        .unwrap_or_else(|| panic!("Expected symbol '{}' in file '{}'", symbol, path))
}

pub fn dependency_keys<'m>(file: &'m FileManifest) -> Vec<&'m str> {
    file.dependencies.keys().map(String::as_str).collect()
}

/// Assert the files recorded as dependents of a symbol, ignoring order.
pub fn assert_dependents(
    manifest: &DependencyManifest,
    path: &str,
    symbol: &str,
    expected: &[&str],
) {
    let record = symbol_record(manifest, path, symbol);
    let mut actual: Vec<&str> = record.dependents.keys().map(String::as_str).collect();
    actual.sort_unstable();
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(
        actual, expected,
        "Dependents of '{}' in '{}' did not match",
        symbol, path
    );
}
