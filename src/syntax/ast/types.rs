use std::fmt;

/// A type as written at a use site.
///
/// Named types keep their dotted spelling (`ChickenBurger.Bun`) and their
/// generic arguments separately, so resolution can strip the arguments and
/// still visit each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// `Bun`, `ChickenBurger.Bun`, `List<Bun>`, `global::System.String`
    Named { name: String, type_args: Vec<TypeRef> },
    /// A keyword type: `int`, `string`, `void`
    Predefined(String),
    /// `T[]`
    Array(Box<TypeRef>),
    /// `T?`
    Nullable(Box<TypeRef>),
    /// `(A, B)`
    Tuple(Vec<TypeRef>),
}

impl TypeRef {
    /// A named type, no generic arguments.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    /// A named type with generic arguments.
    pub fn generic(name: impl Into<String>, type_args: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            type_args,
        }
    }

    pub fn predefined(keyword: impl Into<String>) -> Self {
        TypeRef::Predefined(keyword.into())
    }

    pub fn void() -> Self {
        TypeRef::Predefined("void".to_string())
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    /// The outermost name for named types, looking through array and nullable wrappers.
    pub fn base_name(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, .. } => Some(name),
            TypeRef::Array(inner) | TypeRef::Nullable(inner) => inner.base_name(),
            TypeRef::Predefined(_) | TypeRef::Tuple(_) => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, type_args } => {
                write!(f, "{name}")?;
                if !type_args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in type_args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::Predefined(keyword) => write!(f, "{keyword}"),
            TypeRef::Array(inner) => write!(f, "{inner}[]"),
            TypeRef::Nullable(inner) => write!(f, "{inner}?"),
            TypeRef::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}
