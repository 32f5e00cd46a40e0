//! Code metrics: cyclomatic complexity and code volume of files and symbols.
//!
//! Complexity counts decision nodes only (`if`, `while`, `for`, `do`, switch
//! sections, `?:`, `try`, `catch`, `finally`), with no base of one.
//! `foreach` is not a decision node here.
//!
//! Code volume needs the source text of the unit. Lines that hold only
//! whitespace or comments are not code lines; code characters are counted
//! after comments are cut and whitespace runs collapse to one space.

use crate::base::Span;
use crate::syntax::ast::{CatchClause, CompilationUnit, Expr, Stmt, SwitchSection, TypeDecl};
use crate::syntax::visit::{self, Visitor};

/// Complexity and volume of one file or symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeMetrics {
    pub cyclomatic_complexity: usize,
    /// Lines touched by the node, first and last included.
    pub lines_count: usize,
    pub code_line_count: usize,
    pub character_count: usize,
    pub code_character_count: usize,
}

/// Metrics of a whole file.
pub fn analyze_file(unit: &CompilationUnit) -> CodeMetrics {
    let mut counter = ComplexityCounter::default();
    counter.visit_compilation_unit(unit);
    measure(unit, unit.span, counter.count)
}

/// Metrics of a type declared in `unit`, nested types included.
pub fn analyze_type(unit: &CompilationUnit, decl: &TypeDecl) -> CodeMetrics {
    let mut counter = ComplexityCounter::default();
    counter.visit_type_decl(decl);
    measure(unit, decl.span, counter.count)
}

fn measure(unit: &CompilationUnit, span: Span, complexity: usize) -> CodeMetrics {
    let lines_count = span.line_count() + 1;
    let character_count = span.character_count();
    // without text every line and character counts as code
    let (code_line_count, code_character_count) = match unit.text(span) {
        Some(text) => code_volume(text, span, &unit.comments),
        None => (lines_count, character_count),
    };
    CodeMetrics {
        cyclomatic_complexity: complexity,
        lines_count,
        code_line_count,
        character_count,
        code_character_count,
    }
}

// ============================================================================
// COMPLEXITY
// ============================================================================

#[derive(Default)]
struct ComplexityCounter {
    count: usize,
}

impl<'ast> Visitor<'ast> for ComplexityCounter {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match stmt {
            Stmt::If { .. } | Stmt::While { .. } | Stmt::For { .. } | Stmt::Do { .. } => {
                self.count += 1;
            }
            Stmt::Try { finally, .. } => {
                self.count += 1;
                if !finally.is_empty() {
                    self.count += 1;
                }
            }
            _ => {}
        }
        visit::walk_stmt(self, stmt);
    }

    fn visit_switch_section(&mut self, section: &'ast SwitchSection) {
        self.count += 1;
        visit::walk_switch_section(self, section);
    }

    fn visit_catch_clause(&mut self, clause: &'ast CatchClause) {
        self.count += 1;
        visit::walk_catch_clause(self, clause);
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if matches!(expr, Expr::Conditional { .. }) {
            self.count += 1;
        }
        visit::walk_expr(self, expr);
    }
}

// ============================================================================
// CODE VOLUME
// ============================================================================

/// Code lines and code characters of `text`, which starts at `span.start`.
fn code_volume(text: &str, span: Span, comments: &[Span]) -> (usize, usize) {
    let mut lines = 0;
    let mut characters = 0;
    for (i, raw) in text.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        // columns of the first line are offset by where the node starts
        let offset = if i == 0 { span.start.column } else { 0 };
        let code = cut_comments(raw, span.start.line + i, offset, comments);
        let normalized = code.split_whitespace().collect::<Vec<_>>().join(" ");
        if !normalized.is_empty() {
            lines += 1;
            characters += normalized.chars().count();
        }
    }
    (lines, characters)
}

/// The parts of `line` not covered by a comment.
fn cut_comments(line: &str, line_no: usize, offset: usize, comments: &[Span]) -> String {
    let mut cuts: Vec<(usize, usize)> = comments
        .iter()
        .filter(|c| c.start.line <= line_no && line_no <= c.end.line)
        .map(|c| {
            let from = if c.start.line == line_no {
                c.start.column.saturating_sub(offset)
            } else {
                0
            };
            let to = if c.end.line == line_no {
                c.end.column.saturating_sub(offset)
            } else {
                line.len()
            };
            (char_boundary(line, from), char_boundary(line, to))
        })
        .collect();
    if cuts.is_empty() {
        return line.to_string();
    }
    cuts.sort_unstable();

    let mut kept = String::with_capacity(line.len());
    let mut cursor = 0;
    for (from, to) in cuts {
        if from > cursor {
            kept.push_str(&line[cursor..from]);
        }
        cursor = cursor.max(to);
    }
    if cursor < line.len() {
        kept.push_str(&line[cursor..]);
    }
    kept
}

fn char_boundary(line: &str, column: usize) -> usize {
    let mut column = column.min(line.len());
    while !line.is_char_boundary(column) {
        column -= 1;
    }
    column
}
