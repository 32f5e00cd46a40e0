//! Path normalization utilities for consistent file path handling.
//!
//! Paths are compared textually, never through the filesystem: the engine
//! receives pre-parsed files and must not touch the disk.

/// Normalize a file path for consistent storage and lookup.
///
/// Backslashes become `/`, repeated separators collapse, `.` segments and a
/// trailing separator are dropped. An empty result normalizes to `"."`.
///
/// # Examples
///
/// ```
/// use monosplit::base::normalize_path;
///
/// assert_eq!(normalize_path(r"src\App\Program.cs"), "src/App/Program.cs");
/// assert_eq!(normalize_path("./src//App/"), "src/App");
/// ```
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let parts: Vec<&str> = unified
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Directory part of a normalized path (`"."` when there is none).
pub fn parent_dir(path: &str) -> String {
    let normalized = normalize_path(path);
    match normalized.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => normalized[..idx].to_string(),
        None => ".".to_string(),
    }
}

/// File name without its extension.
pub fn file_stem(path: &str) -> String {
    let normalized = normalize_path(path);
    let name = normalized.rsplit('/').next().unwrap_or(&normalized);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_string(),
        _ => name.to_string(),
    }
}

/// Component-wise prefix check. `"."` and `""` contain every path.
pub fn dir_contains(dir: &str, path: &str) -> bool {
    let dir = normalize_path(dir);
    if dir == "." {
        return true;
    }
    let path = normalize_path(path);
    path == dir || path.starts_with(&format!("{}/", dir.trim_end_matches('/')))
}

/// Longest common directory of a set of paths.
pub fn common_dir<'p>(paths: impl IntoIterator<Item = &'p str>) -> Option<String> {
    let mut common: Option<Vec<String>> = None;
    for path in paths {
        let dir = parent_dir(path);
        let parts: Vec<String> = dir.split('/').map(str::to_string).collect();
        common = Some(match common {
            None => parts,
            Some(prev) => prev
                .into_iter()
                .zip(parts)
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect(),
        });
    }
    common.map(|parts| {
        let joined = parts.join("/");
        if joined.is_empty() { ".".to_string() } else { joined }
    })
}
