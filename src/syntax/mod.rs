//! Syntax layer: the typed tree the resolver reads, plus traversal.

pub mod ast;
pub mod visit;

pub use ast::{
    Attribute, Body, CatchClause, CompilationUnit, Expr, Member, MethodDecl, NamespaceDecl,
    Parameter, ParameterModifier, Stmt, SwitchSection, TypeDecl, TypeKind, TypeMember, TypeRef,
    UsingDirective,
};
pub use visit::Visitor;

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
