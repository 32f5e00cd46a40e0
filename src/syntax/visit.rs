//! Visitor pattern for syntax tree traversal.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children. Override a method to intercept a node kind and
//! call the `walk_*` function to keep descending.

use super::ast::{
    Attribute, Body, CatchClause, CompilationUnit, Expr, Member, MethodDecl, NamespaceDecl,
    Parameter, Stmt, SwitchSection, TypeDecl, TypeMember, TypeRef,
};

/// Visitor trait for syntax nodes.
pub trait Visitor<'ast> {
    fn visit_compilation_unit(&mut self, unit: &'ast CompilationUnit) {
        walk_compilation_unit(self, unit);
    }

    fn visit_namespace(&mut self, namespace: &'ast NamespaceDecl) {
        walk_namespace(self, namespace);
    }

    fn visit_type_decl(&mut self, decl: &'ast TypeDecl) {
        walk_type_decl(self, decl);
    }

    fn visit_method(&mut self, method: &'ast MethodDecl) {
        walk_method(self, method);
    }

    fn visit_parameter(&mut self, parameter: &'ast Parameter) {
        walk_parameter(self, parameter);
    }

    fn visit_attribute(&mut self, attribute: &'ast Attribute) {
        walk_attribute(self, attribute);
    }

    fn visit_type_ref(&mut self, ty: &'ast TypeRef) {
        walk_type_ref(self, ty);
    }

    fn visit_body(&mut self, body: &'ast Body) {
        walk_body(self, body);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_switch_section(&mut self, section: &'ast SwitchSection) {
        walk_switch_section(self, section);
    }

    fn visit_catch_clause(&mut self, clause: &'ast CatchClause) {
        walk_catch_clause(self, clause);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }

    /// A name introduced in a body: local, foreach or catch variable, pattern designation.
    fn visit_local_name(&mut self, _name: &'ast str) {}
}

pub fn walk_compilation_unit<'ast, V: Visitor<'ast> + ?Sized>(
    v: &mut V,
    unit: &'ast CompilationUnit,
) {
    for member in &unit.members {
        walk_member(v, member);
    }
}

pub fn walk_member<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, member: &'ast Member) {
    match member {
        Member::Namespace(ns) => v.visit_namespace(ns),
        Member::Type(decl) => v.visit_type_decl(decl),
        Member::Statement(stmt) => v.visit_stmt(stmt),
    }
}

pub fn walk_namespace<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, namespace: &'ast NamespaceDecl) {
    for member in namespace.members() {
        walk_member(v, member);
    }
}

pub fn walk_type_decl<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, decl: &'ast TypeDecl) {
    for attribute in &decl.attributes {
        v.visit_attribute(attribute);
    }
    for base in &decl.bases {
        v.visit_type_ref(base);
    }
    for parameter in &decl.parameters {
        v.visit_parameter(parameter);
    }
    if let Some(ret) = &decl.return_type {
        v.visit_type_ref(ret);
    }
    for member in &decl.members {
        match member {
            TypeMember::Field(field) => {
                for attribute in &field.attributes {
                    v.visit_attribute(attribute);
                }
                v.visit_type_ref(&field.ty);
                if let Some(init) = &field.init {
                    v.visit_expr(init);
                }
            }
            TypeMember::Property(prop) => {
                for attribute in &prop.attributes {
                    v.visit_attribute(attribute);
                }
                v.visit_type_ref(&prop.ty);
                for accessor in &prop.accessors {
                    v.visit_body(accessor);
                }
                if let Some(init) = &prop.init {
                    v.visit_expr(init);
                }
            }
            TypeMember::Method(method) | TypeMember::Constructor(method) => v.visit_method(method),
            TypeMember::EnumMember(variant) => {
                for attribute in &variant.attributes {
                    v.visit_attribute(attribute);
                }
                if let Some(value) = &variant.value {
                    v.visit_expr(value);
                }
            }
            TypeMember::Type(nested) => v.visit_type_decl(nested),
        }
    }
}

pub fn walk_method<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, method: &'ast MethodDecl) {
    for attribute in &method.attributes {
        v.visit_attribute(attribute);
    }
    if let Some(ret) = &method.return_type {
        v.visit_type_ref(ret);
    }
    for parameter in &method.parameters {
        v.visit_parameter(parameter);
    }
    if let Some(body) = &method.body {
        v.visit_body(body);
    }
}

pub fn walk_parameter<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, parameter: &'ast Parameter) {
    for attribute in &parameter.attributes {
        v.visit_attribute(attribute);
    }
    if let Some(ty) = &parameter.ty {
        v.visit_type_ref(ty);
    }
    if let Some(default) = &parameter.default {
        v.visit_expr(default);
    }
}

pub fn walk_attribute<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, attribute: &'ast Attribute) {
    for arg in &attribute.args {
        v.visit_expr(arg);
    }
}

pub fn walk_type_ref<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, ty: &'ast TypeRef) {
    match ty {
        TypeRef::Named { type_args, .. } => {
            for arg in type_args {
                v.visit_type_ref(arg);
            }
        }
        TypeRef::Predefined(_) => {}
        TypeRef::Array(inner) | TypeRef::Nullable(inner) => v.visit_type_ref(inner),
        TypeRef::Tuple(items) => {
            for item in items {
                v.visit_type_ref(item);
            }
        }
    }
}

pub fn walk_body<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, body: &'ast Body) {
    match body {
        Body::Block(stmts) => walk_stmts(v, stmts),
        Body::Expr(expr) => v.visit_expr(expr),
    }
}

fn walk_stmts<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, stmts: &'ast [Stmt]) {
    for stmt in stmts {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, stmt: &'ast Stmt) {
    match stmt {
        Stmt::Local { ty, name, init, .. } => {
            v.visit_type_ref(ty);
            v.visit_local_name(name);
            if let Some(init) = init {
                v.visit_expr(init);
            }
        }
        Stmt::Expr(expr) => v.visit_expr(expr),
        Stmt::Return(expr) | Stmt::Throw(expr) => {
            if let Some(expr) = expr {
                v.visit_expr(expr);
            }
        }
        Stmt::Block(stmts) => walk_stmts(v, stmts),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            v.visit_expr(cond);
            walk_stmts(v, then_branch);
            walk_stmts(v, else_branch);
        }
        Stmt::While { cond, body } => {
            v.visit_expr(cond);
            walk_stmts(v, body);
        }
        Stmt::For {
            init,
            cond,
            updates,
            body,
        } => {
            walk_stmts(v, init);
            if let Some(cond) = cond {
                v.visit_expr(cond);
            }
            for update in updates {
                v.visit_expr(update);
            }
            walk_stmts(v, body);
        }
        Stmt::Foreach {
            ty,
            name,
            iterable,
            body,
        } => {
            v.visit_type_ref(ty);
            v.visit_local_name(name);
            v.visit_expr(iterable);
            walk_stmts(v, body);
        }
        Stmt::Do { body, cond } => {
            walk_stmts(v, body);
            v.visit_expr(cond);
        }
        Stmt::Switch { subject, sections } => {
            v.visit_expr(subject);
            for section in sections {
                v.visit_switch_section(section);
            }
        }
        Stmt::Try {
            body,
            catches,
            finally,
        } => {
            walk_stmts(v, body);
            for clause in catches {
                v.visit_catch_clause(clause);
            }
            walk_stmts(v, finally);
        }
    }
}

pub fn walk_switch_section<'ast, V: Visitor<'ast> + ?Sized>(
    v: &mut V,
    section: &'ast SwitchSection,
) {
    for label in &section.labels {
        v.visit_expr(label);
    }
    walk_stmts(v, &section.body);
}

pub fn walk_catch_clause<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, clause: &'ast CatchClause) {
    if let Some(ty) = &clause.ty {
        v.visit_type_ref(ty);
    }
    if let Some(name) = &clause.name {
        v.visit_local_name(name);
    }
    walk_stmts(v, &clause.body);
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, expr: &'ast Expr) {
    match expr {
        Expr::Identifier(_) | Expr::Literal(_) | Expr::This | Expr::Base => {}
        Expr::GenericName { type_args, .. } => {
            for arg in type_args {
                v.visit_type_ref(arg);
            }
        }
        Expr::MemberAccess {
            target, type_args, ..
        } => {
            v.visit_expr(target);
            for arg in type_args {
                v.visit_type_ref(arg);
            }
        }
        Expr::Invocation { callee, args } => {
            v.visit_expr(callee);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        Expr::ObjectCreation {
            ty,
            args,
            initializer,
        } => {
            v.visit_type_ref(ty);
            for arg in args.iter().chain(initializer) {
                v.visit_expr(arg);
            }
        }
        Expr::ArrayCreation {
            ty,
            sizes,
            initializer,
        } => {
            v.visit_type_ref(ty);
            for arg in sizes.iter().chain(initializer) {
                v.visit_expr(arg);
            }
        }
        Expr::TypeOf(ty) => v.visit_type_ref(ty),
        Expr::Default(ty) => {
            if let Some(ty) = ty {
                v.visit_type_ref(ty);
            }
        }
        Expr::Cast { ty, expr } | Expr::As { expr, ty } => {
            v.visit_type_ref(ty);
            v.visit_expr(expr);
        }
        Expr::Is {
            expr,
            ty,
            designation,
        } => {
            v.visit_expr(expr);
            v.visit_type_ref(ty);
            if let Some(name) = designation {
                v.visit_local_name(name);
            }
        }
        Expr::Assignment { target, value } => {
            v.visit_expr(target);
            v.visit_expr(value);
        }
        Expr::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        Expr::Unary { operand, .. } => v.visit_expr(operand),
        Expr::Conditional {
            cond,
            then_expr,
            else_expr,
        } => {
            v.visit_expr(cond);
            v.visit_expr(then_expr);
            v.visit_expr(else_expr);
        }
        Expr::Lambda { parameters, body } => {
            for parameter in parameters {
                v.visit_parameter(parameter);
            }
            v.visit_body(body);
        }
        Expr::Await(inner) => v.visit_expr(inner),
    }
}
