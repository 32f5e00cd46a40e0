//! Typed syntax tree consumed by the resolver.
//!
//! The parser is external; it produces these nodes. Only the shapes the
//! resolution passes look at are modelled: declarations, type references,
//! statements and expressions that can name a type.

mod decls;
mod exprs;
mod types;

pub use decls::{
    Attribute, CompilationUnit, EnumMemberDecl, FieldDecl, Member, MethodDecl, NamespaceDecl,
    Parameter, ParameterModifier, PropertyDecl, TypeDecl, TypeKind, TypeMember, UsingDirective,
};
pub use exprs::{Body, CatchClause, Expr, Stmt, SwitchSection};
pub use types::TypeRef;
