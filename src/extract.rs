//! Extraction closure: the symbols a unit needs to be moved out on its own.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::manifest::DependencyManifest;

/// Every symbol reachable from `roots` through symbol-level dependencies.
///
/// `roots` are `(file path, symbol full name)` pairs. The result maps each
/// file to the symbols it must contribute, in discovery order. External
/// dependencies end the walk; cycles terminate through the visited set.
pub fn extraction_closure(
    manifest: &DependencyManifest,
    roots: &[(&str, &str)],
) -> IndexMap<String, IndexSet<String>> {
    let mut out: IndexMap<String, IndexSet<String>> = IndexMap::new();
    let mut visited: FxHashSet<(String, String)> = FxHashSet::default();
    let mut worklist: Vec<(String, String)> = roots
        .iter()
        .rev()
        .map(|(file, symbol)| (file.to_string(), symbol.to_string()))
        .collect();

    while let Some((file, symbol)) = worklist.pop() {
        if !visited.insert((file.clone(), symbol.clone())) {
            continue;
        }
        let Some(record) = manifest.get(&file).and_then(|f| f.symbols.get(&symbol)) else {
            trace!("[EXTRACT] No record for '{}' in {}", symbol, file);
            continue;
        };
        let mut next = Vec::new();
        for (target, entry) in &record.dependencies {
            if entry.is_external {
                continue;
            }
            next.extend(entry.symbols.keys().map(|s| (target.clone(), s.clone())));
        }
        worklist.extend(next.into_iter().rev());
        out.entry(file).or_default().insert(symbol);
    }

    debug!(
        "[EXTRACT] Closure of {} roots: {} symbols in {} files",
        roots.len(),
        out.values().map(IndexSet::len).sum::<usize>(),
        out.len()
    );
    out
}
