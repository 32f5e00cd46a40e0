use super::decls::Parameter;
use super::types::TypeRef;
use crate::base::Span;

/// A method, accessor or lambda body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Block(Vec<Stmt>),
    /// Expression-bodied member: `=> expr`
    Expr(Expr),
}

/// A statement inside a body.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `T name = init;` (`var` declarations use a named `var` type)
    Local {
        ty: TypeRef,
        name: String,
        init: Option<Expr>,
        span: Span,
    },
    Expr(Expr),
    Return(Option<Expr>),
    Throw(Option<Expr>),
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// `for (init; cond; updates) { body }`
    For {
        init: Vec<Stmt>,
        cond: Option<Expr>,
        updates: Vec<Expr>,
        body: Vec<Stmt>,
    },
    Foreach {
        ty: TypeRef,
        name: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    /// `do { body } while (cond);`
    Do {
        body: Vec<Stmt>,
        cond: Expr,
    },
    Switch {
        subject: Expr,
        sections: Vec<SwitchSection>,
    },
    Try {
        body: Vec<Stmt>,
        catches: Vec<CatchClause>,
        finally: Vec<Stmt>,
    },
}

/// `case A: case B: ... break;` or `default: ...`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSection {
    /// Case labels; empty for `default`.
    pub labels: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// `catch (T name) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub ty: Option<TypeRef>,
    pub name: Option<String>,
    pub body: Vec<Stmt>,
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),
    /// `Method<T>` used as a simple name
    GenericName {
        name: String,
        type_args: Vec<TypeRef>,
    },
    /// `target.name` or `target.name<T>`
    MemberAccess {
        target: Box<Expr>,
        name: String,
        type_args: Vec<TypeRef>,
    },
    /// `callee(args)`
    Invocation {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `new T(args) { initializer }`
    ObjectCreation {
        ty: TypeRef,
        args: Vec<Expr>,
        initializer: Vec<Expr>,
    },
    /// `new T[size] { items }`
    ArrayCreation {
        ty: TypeRef,
        sizes: Vec<Expr>,
        initializer: Vec<Expr>,
    },
    TypeOf(TypeRef),
    Default(Option<TypeRef>),
    Cast {
        ty: TypeRef,
        expr: Box<Expr>,
    },
    /// `expr is T name`
    Is {
        expr: Box<Expr>,
        ty: TypeRef,
        designation: Option<String>,
    },
    As {
        expr: Box<Expr>,
        ty: TypeRef,
    },
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        op: String,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Lambda {
        parameters: Vec<Parameter>,
        body: Box<Body>,
    },
    Await(Box<Expr>),
    Literal(String),
    This,
    Base,
}

impl Stmt {
    pub fn local(ty: TypeRef, name: impl Into<String>, init: Option<Expr>) -> Self {
        Stmt::Local {
            ty,
            name: name.into(),
            init,
            span: Span::default(),
        }
    }

    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }

    pub fn if_else(cond: Expr, then_branch: Vec<Stmt>, else_branch: Vec<Stmt>) -> Self {
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        }
    }
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    pub fn member(target: Expr, name: impl Into<String>) -> Self {
        Expr::MemberAccess {
            target: Box::new(target),
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    /// Build a pure member-access chain from a dotted path: `A.B.C`.
    pub fn path(dotted: &str) -> Self {
        let mut parts = dotted.split('.');
        let first = parts.next().unwrap_or_default();
        parts.fold(Expr::ident(first), |acc, part| Expr::member(acc, part))
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Invocation {
            callee: Box::new(callee),
            args,
        }
    }

    /// `target.method(args)`
    pub fn method_call(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::call(Expr::member(target, method), args)
    }

    pub fn new_object(ty: TypeRef, args: Vec<Expr>) -> Self {
        Expr::ObjectCreation {
            ty,
            args,
            initializer: Vec::new(),
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Expr::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }
}
