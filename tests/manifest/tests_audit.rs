//! Audit and extraction queries over generated manifests.

use monosplit::audit::{
    CircularDependency, circular_dependencies, dependency_counts, file_dependencies,
    file_dependents, unused_files,
};
use monosplit::extract::extraction_closure;
use monosplit::manifest::generate;
use monosplit::project::SourceSet;
use monosplit::syntax::{CompilationUnit, NamespaceDecl, TypeDecl, TypeRef};

use crate::helpers::source_fixtures::*;

fn ping_pong() -> SourceSet {
    let mut sources = SourceSet::new();
    sources.add_file(
        "Ping.cs",
        CompilationUnit::new().member(
            NamespaceDecl::new("Game")
                .member(TypeDecl::class("Ping").field("next", TypeRef::named("Pong"))),
        ),
    );
    sources.add_file(
        "Pong.cs",
        CompilationUnit::new().member(
            NamespaceDecl::new("Game")
                .member(TypeDecl::class("Pong").field("next", TypeRef::named("Ping"))),
        ),
    );
    sources.add_file(
        "Referee.cs",
        CompilationUnit::new().member(
            NamespaceDecl::new("Game")
                .member(TypeDecl::class("Referee").field("ball", TypeRef::named("Ping"))),
        ),
    );
    sources
}

#[test]
fn test_file_dependencies_and_dependents() {
    let output = generate(&console_app());
    let manifest = &output.manifest;

    let program: Vec<String> = file_dependencies(manifest, PROGRAM).into_iter().collect();
    assert_eq!(
        program,
        vec![BURGERS, NAMESPACED, SEMI_NAMESPACED, NESTED, MODELS]
    );

    let semi = file_dependents(manifest, SEMI_NAMESPACED);
    assert_eq!(semi.len(), 3);
    assert!(semi.contains(BURGERS));
    assert!(semi.contains(PROGRAM));
    assert!(semi.contains(USAGE));
}

#[test]
fn test_same_file_references_are_not_dependents() {
    let output = generate(&console_app());
    // Cheese references Steak inside the burgers file
    assert!(!file_dependents(&output.manifest, BURGERS).contains(BURGERS));
}

#[test]
fn test_circular_dependency_between_files() {
    let output = generate(&ping_pong());
    assert_eq!(
        circular_dependencies(&output.manifest),
        vec![CircularDependency {
            file: "Ping.cs".into(),
            other: "Pong.cs".into(),
        }]
    );
}

#[test]
fn test_console_app_has_no_cycles() {
    let output = generate(&console_app());
    assert!(circular_dependencies(&output.manifest).is_empty());
}

#[test]
fn test_unused_files() {
    let output = generate(&console_app());
    assert_eq!(unused_files(&output.manifest), vec![PROGRAM, USAGE]);

    let output = generate(&ping_pong());
    assert_eq!(unused_files(&output.manifest), vec!["Referee.cs"]);
}

#[test]
fn test_dependency_counts() {
    let output = generate(&ping_pong());
    let counts = dependency_counts(&output.manifest);
    assert_eq!(counts.len(), 3);

    let ping = &counts[0];
    assert_eq!(ping.filepath, "Ping.cs");
    assert_eq!(ping.dependencies, 1);
    assert_eq!(ping.dependents, 2);
    assert_eq!(ping.external, 0);

    let referee = &counts[2];
    assert_eq!(referee.dependencies, 1);
    assert_eq!(referee.dependents, 0);
}

#[test]
fn test_extraction_closure_follows_symbol_dependencies() {
    let output = generate(&console_app());
    let closure = extraction_closure(&output.manifest, &[(USAGE, "Usage.Consumer")]);

    assert_eq!(closure.len(), 3);
    assert!(closure[USAGE].contains("Usage.Consumer"));
    assert!(closure[USAGE].contains("Usage.TagAttribute"));
    assert!(closure[BURGERS].contains("BeefBurger.Steak"));
    assert!(closure[BURGERS].contains("BeefBurger.Cheese"));
    assert!(!closure[BURGERS].contains("BeefBurger.Bun"));
    assert!(closure[SEMI_NAMESPACED].contains("HalfNamespace.Gordon"));
}

#[test]
fn test_extraction_closure_terminates_on_cycles() {
    let output = generate(&ping_pong());
    let closure = extraction_closure(&output.manifest, &[("Ping.cs", "Game.Ping")]);
    assert_eq!(closure.len(), 2);
    assert!(closure["Pong.cs"].contains("Game.Pong"));
    assert!(!closure.contains_key("Referee.cs"));
}
