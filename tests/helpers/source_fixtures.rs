//! Parsed C# files shared by the integration tests.
//!
//! The default project mirrors a small console app:
//!
//! ```text
//! Models.cs             MyApp.Models { User, Order, OrderStatus }
//! Namespaced.cs         MyNamespace { MyClass }
//! SemiNamespaced.cs     HalfNamespace { Gordon }, Freeman (global namespace)
//! Nested.cs             OuterNamespace { OuterClass { OuterInnerClass } }
//!                       OuterNamespace.InnerNamespace { InnerClass }
//! 2Namespaces1File.cs   BeefBurger { Steak, Cheese, Bun },
//!                       ChickenBurger { Chicken, Salad<T>, Bun }
//! Program.cs            Tests { Program }
//! Usage.cs              Usage { Consumer, TagAttribute }
//! ```

use monosplit::project::SourceSet;
use monosplit::syntax::{
    Attribute, CompilationUnit, Expr, MethodDecl, NamespaceDecl, Parameter, Span, Stmt,
    SwitchSection, TypeDecl, TypeMember, TypeRef, UsingDirective,
};

pub const MODELS: &str = "Models.cs";
pub const NAMESPACED: &str = "Namespaced.cs";
pub const SEMI_NAMESPACED: &str = "SemiNamespaced.cs";
pub const NESTED: &str = "Nested.cs";
pub const BURGERS: &str = "2Namespaces1File.cs";
pub const PROGRAM: &str = "Program.cs";
pub const USAGE: &str = "Usage.cs";
pub const WORKFLOW: &str = "Workflow.cs";
pub const RUNNER: &str = "Runner.cs";

// ============================================================================
// FILES
// ============================================================================

pub fn models() -> CompilationUnit {
    CompilationUnit::new().member(
        NamespaceDecl::new("MyApp.Models")
            .member(TypeDecl::class("User").property("Name", TypeRef::predefined("string")))
            .member(TypeDecl::class("Order").field("owner", TypeRef::named("User")))
            .member(TypeDecl::enumeration("OrderStatus", &["Pending", "Shipped"])),
    )
}

pub fn namespaced() -> CompilationUnit {
    CompilationUnit::new().member(
        NamespaceDecl::new("MyNamespace")
            .member(TypeDecl::class("MyClass").method(MethodDecl::new("MyMethod"))),
    )
}

pub fn semi_namespaced() -> CompilationUnit {
    CompilationUnit::new()
        .member(
            NamespaceDecl::new("HalfNamespace")
                .member(TypeDecl::class("Gordon").method(MethodDecl::new("Crowbar"))),
        )
        .member(TypeDecl::class("Freeman").method(MethodDecl::new("Shotgun")))
}

pub fn nested() -> CompilationUnit {
    CompilationUnit::new().member(
        NamespaceDecl::new("OuterNamespace")
            .member(
                TypeDecl::class("OuterClass").nested(
                    TypeDecl::class("OuterInnerClass").method(MethodDecl::new("OuterInnerMethod")),
                ),
            )
            .member(
                NamespaceDecl::new("InnerNamespace")
                    .member(TypeDecl::class("InnerClass").method(MethodDecl::new("InnerMethod"))),
            ),
    )
}

/// Two namespaces in one file, each declaring a `Bun`.
///
/// `using MyApp.Models;` is never used.
pub fn burgers() -> CompilationUnit {
    let console = |text: &str| {
        Stmt::expr(Expr::method_call(
            Expr::ident("Console"),
            "WriteLine",
            vec![Expr::literal(text)],
        ))
    };

    let steak = TypeDecl::class("Steak")
        .field("gordon", TypeRef::named("Gordon"))
        .member(TypeMember::Constructor(
            MethodDecl::new("Steak")
                .param(Parameter::new("gordon", TypeRef::named("Gordon")))
                .body(vec![Stmt::expr(Expr::assign(
                    Expr::member(Expr::This, "gordon"),
                    Expr::ident("gordon"),
                ))]),
        ))
        .method(MethodDecl::new("Cook").body(vec![console("\"Cooking steak\"")]));

    let cheese = TypeDecl::class("Cheese").modifier("static").method(
        MethodDecl::new("Melt")
            .modifier("static")
            .param(Parameter::this("steak", TypeRef::named("Steak")))
            .body(vec![console("\"Melting cheese on steak\"")]),
    );

    let salad = TypeDecl::class("Salad")
        .type_param("T")
        .property("Item", TypeRef::named("T"))
        .method(
            MethodDecl::new("Add")
                .param(Parameter::new("item", TypeRef::named("T")))
                .body(vec![Stmt::expr(Expr::assign(
                    Expr::ident("Item"),
                    Expr::ident("item"),
                ))]),
        );

    CompilationUnit::new()
        .using(UsingDirective::new("HalfNamespace"))
        .using(UsingDirective::new("MyApp.Models"))
        .member(
            NamespaceDecl::new("BeefBurger")
                .member(steak)
                .member(cheese)
                .member(TypeDecl::class("Bun")),
        )
        .member(
            NamespaceDecl::new("ChickenBurger")
                .member(TypeDecl::class("Chicken"))
                .member(salad)
                .member(TypeDecl::class("Bun")),
        )
}

pub fn program() -> CompilationUnit {
    let local = |ty: &str, name: &str| {
        Stmt::local(
            TypeRef::named(ty),
            name,
            Some(Expr::new_object(TypeRef::named(ty), vec![])),
        )
    };
    let call = |target: &str, method: &str| {
        Stmt::expr(Expr::method_call(Expr::ident(target), method, vec![]))
    };

    let abs = Expr::method_call(Expr::path("System.Math"), "Abs", vec![Expr::literal("-1")]);
    let chained = Expr::method_call(
        Expr::method_call(abs, "Equals", vec![Expr::literal("1")]),
        "ToString",
        vec![],
    );

    let main = MethodDecl::new("Main")
        .modifier("static")
        .param(Parameter::new(
            "args",
            TypeRef::array(TypeRef::predefined("string")),
        ))
        .body(vec![
            local("Bun", "beefBun"),
            local("ChickenBurger.Bun", "chickenBun"),
            local("MyClass", "myClass"),
            call("myClass", "MyMethod"),
            local("Gordon", "gordon"),
            call("gordon", "Crowbar"),
            local("Freeman", "freeman"),
            call("freeman", "Shotgun"),
            local("OuterInnerClass", "outerInner"),
            call("outerInner", "OuterInnerMethod"),
            local("InnerClass", "inner"),
            call("inner", "InnerMethod"),
            Stmt::local(
                TypeRef::named("OrderStatus"),
                "orderStatus",
                Some(Expr::path("OrderStatus.Pending")),
            ),
            Stmt::expr(chained),
        ]);

    CompilationUnit::new()
        .using(UsingDirective::new("MyNamespace"))
        .using(UsingDirective::new("HalfNamespace"))
        .using(UsingDirective::new("OuterNamespace.OuterClass.OuterInnerClass"))
        .using(UsingDirective::new("OuterNamespace.InnerNamespace"))
        .using(UsingDirective::new("BeefBurger"))
        .member(NamespaceDecl::new("Tests").member(TypeDecl::class("Program").method(main)))
}

/// Alias, extension call, attribute and an external directive.
pub fn usage() -> CompilationUnit {
    let serve = MethodDecl::new("Serve")
        .param(Parameter::new("steak", TypeRef::named("Steak")))
        .body(vec![
            Stmt::expr(Expr::method_call(Expr::ident("steak"), "Melt", vec![])),
            Stmt::expr(Expr::method_call(
                Expr::ident("JsonConvert"),
                "SerializeObject",
                vec![Expr::ident("steak")],
            )),
        ]);

    CompilationUnit::new()
        .using(UsingDirective::new("BeefBurger"))
        .using(UsingDirective::alias("Valve", "HalfNamespace"))
        .using(UsingDirective::new("Newtonsoft.Json"))
        .member(
            NamespaceDecl::new("Usage")
                .member(
                    TypeDecl::class("Consumer")
                        .attribute(Attribute::new("Tag"))
                        .field("gordon", TypeRef::named("Valve.Gordon"))
                        .method(serve),
                )
                .member(TypeDecl::class("TagAttribute").base(TypeRef::named("Attribute"))),
        )
}

/// Branches and loops in `Flow.Workflow.Run`; `Flow.Step` has none.
pub fn workflow() -> CompilationUnit {
    let conditional = Expr::Conditional {
        cond: Box::new(Expr::ident("n")),
        then_expr: Box::new(Expr::literal("1")),
        else_expr: Box::new(Expr::literal("2")),
    };
    let run = MethodDecl::new("Run")
        .param(Parameter::new("n", TypeRef::predefined("int")))
        .param(Parameter::new("steps", TypeRef::array(TypeRef::named("Step"))))
        .body(vec![
            Stmt::For {
                init: vec![],
                cond: Some(Expr::ident("n")),
                updates: vec![],
                body: vec![],
            },
            Stmt::While {
                cond: Expr::ident("n"),
                body: vec![Stmt::Do {
                    body: vec![],
                    cond: Expr::ident("n"),
                }],
            },
            Stmt::Switch {
                subject: Expr::ident("n"),
                sections: vec![
                    SwitchSection {
                        labels: vec![Expr::literal("0")],
                        body: vec![Stmt::Return(None)],
                    },
                    SwitchSection {
                        labels: vec![],
                        body: vec![Stmt::Return(Some(conditional))],
                    },
                ],
            },
            Stmt::Foreach {
                ty: TypeRef::named("Step"),
                name: "step".into(),
                iterable: Expr::ident("steps"),
                body: vec![],
            },
        ]);

    CompilationUnit::new().member(
        NamespaceDecl::new("Flow")
            .member(TypeDecl::class("Workflow").method(run))
            .member(TypeDecl::class("Step")),
    )
}

/// `Flow.Runner` holding a `Workflow`, with its source text and one comment.
pub fn runner() -> CompilationUnit {
    let text = concat!(
        "namespace Flow\n",
        "{\n",
        "    // runs workflows\n",
        "    class Runner { Workflow workflow; }\n",
        "}",
    );
    CompilationUnit::new()
        .with_span(Span::from_coords(0, 0, 4, 1, 0, 80))
        .with_source(text)
        .comment(Span::from_coords(2, 4, 2, 21, 21, 38))
        .member(
            NamespaceDecl::new("Flow").member(
                TypeDecl::class("Runner")
                    .field("workflow", TypeRef::named("Workflow"))
                    .with_span(Span::from_coords(3, 4, 3, 39, 43, 78)),
            ),
        )
}

// ============================================================================
// SOURCE SETS
// ============================================================================

/// Every file of the console app, in a single subproject.
pub fn console_app() -> SourceSet {
    let mut sources = SourceSet::new();
    sources.add_manifest("ConsoleApp.csproj", "<Project Sdk=\"Microsoft.NET.Sdk\" />");
    sources.add_file(MODELS, models());
    sources.add_file(NAMESPACED, namespaced());
    sources.add_file(SEMI_NAMESPACED, semi_namespaced());
    sources.add_file(NESTED, nested());
    sources.add_file(BURGERS, burgers());
    sources.add_file(PROGRAM, program());
    sources.add_file(USAGE, usage());
    sources
}

/// Two subprojects that each see a different `User`.
///
/// `App` imports `MyApp.Models` globally; `Lib` has no global imports, so an
/// unqualified `User` there falls back to the first match in the tree
/// (`Legacy.User`, declared first).
pub fn two_subprojects() -> SourceSet {
    let consumer = |name: &str| {
        CompilationUnit::new().member(TypeDecl::class(name).field("user", TypeRef::named("User")))
    };

    let mut sources = SourceSet::new();
    sources.add_manifest("App/App.csproj", "<Project Sdk=\"Microsoft.NET.Sdk\" />");
    sources.add_manifest("Lib/Lib.csproj", "<Project Sdk=\"Microsoft.NET.Sdk\" />");
    sources.add_file(
        "Lib/Legacy.cs",
        CompilationUnit::new().member(NamespaceDecl::new("Legacy").member(TypeDecl::class("User"))),
    );
    sources.add_file("App/Models.cs", models());
    sources.add_file(
        "App/GlobalUsings.cs",
        CompilationUnit::new().using(UsingDirective::global("MyApp.Models")),
    );
    sources.add_file("App/AppConsumer.cs", consumer("AppConsumer"));
    sources.add_file("Lib/LibConsumer.cs", consumer("LibConsumer"));
    sources
}

/// A workflow with control flow plus a file that uses it.
pub fn workflow_app() -> SourceSet {
    let mut sources = SourceSet::new();
    sources.add_file(WORKFLOW, workflow());
    sources.add_file(RUNNER, runner());
    sources
}
