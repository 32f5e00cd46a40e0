//! Language and project constants shared across the resolver.

/// File extension of a build-manifest (project) file.
pub const PROJECT_MANIFEST_EXTENSION: &str = ".csproj";

/// Conventional suffix of attribute class names (`[Serializable]` → `SerializableAttribute`).
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Names that declare an implicitly typed variable rather than naming a type.
pub const IMPLICIT_TYPE_NAMES: &[&str] = &["var", "dynamic"];

/// Separator between namespace segments in a dotted name.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Separator between an alias qualifier and a name (`global::System`).
pub const ALIAS_QUALIFIER: &str = "::";

/// Directories whose files are never analyzed.
pub const EXCLUDED_DIRS: &[&str] = &[".extracted", "bin", "obj"];

/// Predefined type keywords. These never resolve to project symbols.
pub const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint", "nint", "nuint",
    "long", "ulong", "short", "ushort", "object", "string", "void",
];

/// Check whether a name is a predefined type keyword.
pub fn is_predefined_type(name: &str) -> bool {
    PREDEFINED_TYPES.contains(&name)
}
