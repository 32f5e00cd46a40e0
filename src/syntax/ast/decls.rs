use std::sync::Arc;

use super::exprs::{Body, Expr, Stmt};
use super::types::TypeRef;
use crate::base::Span;

// ============================================================================
// FILE LEVEL
// ============================================================================

/// Root of one parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub usings: Vec<UsingDirective>,
    pub members: Vec<Member>,
    pub span: Span,
    /// Source text the spans index into, when the parser kept it.
    pub source: Option<Arc<str>>,
    /// Comment trivia, in source order.
    pub comments: Vec<Span>,
}

/// `using X;`, `global using X;`, `using static X;`, `using A = X;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingDirective {
    pub is_global: bool,
    pub is_static: bool,
    pub alias: Option<String>,
    /// Imported name as written, possibly with an alias qualifier (`global::System`).
    pub name: String,
    pub span: Span,
}

/// A member of a compilation unit or namespace body.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
    /// Top-level statement
    Statement(Stmt),
}

/// `namespace A.B { ... }` or the file-scoped `namespace A.B;`.
///
/// A file-scoped declaration carries the remainder of the file as its body.
/// `name` or `body` are `None` when the parser recovered from a malformed
/// declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: Option<String>,
    pub file_scoped: bool,
    pub usings: Vec<UsingDirective>,
    pub body: Option<Vec<Member>>,
    pub span: Span,
}

// ============================================================================
// TYPE DECLARATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Enum,
    Interface,
    Record,
    Delegate,
}

/// A type-like declaration: class, struct, enum, interface, record, delegate.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub type_params: Vec<String>,
    pub modifiers: Vec<String>,
    pub attributes: Vec<Attribute>,
    /// Base class and implemented interfaces.
    pub bases: Vec<TypeRef>,
    /// Primary constructor parameters (records) or delegate parameters.
    pub parameters: Vec<Parameter>,
    /// Delegate return type.
    pub return_type: Option<TypeRef>,
    pub members: Vec<TypeMember>,
    pub span: Span,
}

/// A member declared inside a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMember {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(MethodDecl),
    EnumMember(EnumMemberDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: Vec<String>,
    pub attributes: Vec<Attribute>,
    /// Accessor bodies, in declaration order.
    pub accessors: Vec<Body>,
    pub init: Option<Expr>,
    pub span: Span,
}

/// A method or constructor. Constructors have no return type.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
    pub modifiers: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub body: Option<Body>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberDecl {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterModifier {
    /// Marks the extended type of an extension method.
    This,
    Ref,
    Out,
    In,
    Params,
}

/// A method, delegate, record or lambda parameter. Lambda parameters may be untyped.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<TypeRef>,
    pub modifier: Option<ParameterModifier>,
    pub attributes: Vec<Attribute>,
    pub default: Option<Expr>,
}

/// `[Name(args)]`
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

// ============================================================================
// BUILDERS
// ============================================================================

impl CompilationUnit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn using(mut self, directive: UsingDirective) -> Self {
        self.usings.push(directive);
        self
    }

    pub fn member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn comment(mut self, span: Span) -> Self {
        self.comments.push(span);
        self
    }

    /// Source text covered by `span`, if the text is present and the range fits.
    pub fn text(&self, span: Span) -> Option<&str> {
        let source = self.source.as_deref()?;
        source.get(usize::from(span.range.start())..usize::from(span.range.end()))
    }
}

impl UsingDirective {
    /// `using name;`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            is_global: false,
            is_static: false,
            alias: None,
            name: name.into(),
            span: Span::default(),
        }
    }

    /// `global using name;`
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            is_global: true,
            ..Self::new(name)
        }
    }

    /// `using static name;`
    pub fn static_import(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::new(name)
        }
    }

    /// `using alias = name;`
    pub fn alias(alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..Self::new(name)
        }
    }
}

impl NamespaceDecl {
    /// `namespace name { }`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_scoped: false,
            usings: Vec::new(),
            body: Some(Vec::new()),
            span: Span::default(),
        }
    }

    /// `namespace name;`
    pub fn file_scoped(name: impl Into<String>) -> Self {
        Self {
            file_scoped: true,
            ..Self::new(name)
        }
    }

    pub fn using(mut self, directive: UsingDirective) -> Self {
        self.usings.push(directive);
        self
    }

    pub fn member(mut self, member: impl Into<Member>) -> Self {
        self.body.get_or_insert_with(Vec::new).push(member.into());
        self
    }

    /// Members of the body; empty when the body is missing.
    pub fn members(&self) -> &[Member] {
        self.body.as_deref().unwrap_or(&[])
    }
}

impl TypeDecl {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_params: Vec::new(),
            modifiers: Vec::new(),
            attributes: Vec::new(),
            bases: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            members: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn enumeration(name: impl Into<String>, variants: &[&str]) -> Self {
        let mut decl = Self::new(TypeKind::Enum, name);
        for variant in variants {
            decl.members.push(TypeMember::EnumMember(EnumMemberDecl {
                name: variant.to_string(),
                attributes: Vec::new(),
                value: None,
                span: Span::default(),
            }));
        }
        decl
    }

    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn base(mut self, base: TypeRef) -> Self {
        self.bases.push(base);
        self
    }

    pub fn member(mut self, member: TypeMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn method(self, method: MethodDecl) -> Self {
        self.member(TypeMember::Method(method))
    }

    pub fn field(self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.member(TypeMember::Field(FieldDecl {
            name: name.into(),
            ty,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            init: None,
            span: Span::default(),
        }))
    }

    pub fn property(self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.member(TypeMember::Property(PropertyDecl {
            name: name.into(),
            ty,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            accessors: Vec::new(),
            init: None,
            span: Span::default(),
        }))
    }

    pub fn nested(self, nested: TypeDecl) -> Self {
        self.member(TypeMember::Type(nested))
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Nested type declarations, in declaration order.
    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members.iter().filter_map(|m| match m {
            TypeMember::Type(t) => Some(t),
            _ => None,
        })
    }

    /// Methods and constructors, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            TypeMember::Method(method) | TypeMember::Constructor(method) => Some(method),
            _ => None,
        })
    }
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            return_type: Some(TypeRef::void()),
            parameters: Vec::new(),
            modifiers: Vec::new(),
            attributes: Vec::new(),
            body: None,
            span: Span::default(),
        }
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn body(mut self, stmts: Vec<Stmt>) -> Self {
        self.body = Some(Body::Block(stmts));
        self
    }

    /// The first parameter, when it carries the `this` modifier.
    pub fn extension_receiver(&self) -> Option<&Parameter> {
        self.parameters
            .first()
            .filter(|p| p.modifier == Some(ParameterModifier::This))
    }
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            modifier: None,
            attributes: Vec::new(),
            default: None,
        }
    }

    /// `this T name`
    pub fn this(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            modifier: Some(ParameterModifier::This),
            ..Self::new(name, ty)
        }
    }

    /// Untyped lambda parameter.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            modifier: None,
            attributes: Vec::new(),
            default: None,
        }
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            span: Span::default(),
        }
    }
}

impl From<NamespaceDecl> for Member {
    fn from(decl: NamespaceDecl) -> Self {
        Member::Namespace(decl)
    }
}

impl From<TypeDecl> for Member {
    fn from(decl: TypeDecl) -> Self {
        Member::Type(decl)
    }
}

impl From<Stmt> for Member {
    fn from(stmt: Stmt) -> Self {
        Member::Statement(stmt)
    }
}
