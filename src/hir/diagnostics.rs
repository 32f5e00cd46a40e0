//! Diagnostics: recoverable problems found while resolving.
//!
//! Nothing the resolver meets aborts a run. Malformed declarations and unused
//! import directives are reported here and the affected construct is treated
//! as contributing nothing.

use std::sync::Arc;

use crate::base::Span;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// One reported problem, located by 0-indexed line/column coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Arc<str>,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub severity: Severity,
    /// One of [`codes`].
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
}

impl Diagnostic {
    fn new(file: Arc<str>, span: Span, severity: Severity, message: impl Into<Arc<str>>) -> Self {
        Self {
            file,
            start_line: span.start.line,
            start_col: span.start.column,
            end_line: span.end.line,
            end_col: span.end.column,
            severity,
            code: None,
            message: message.into(),
        }
    }

    pub fn error(file: Arc<str>, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self::new(file, span, Severity::Error, message)
    }

    pub fn warning(file: Arc<str>, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self::new(file, span, Severity::Warning, message)
    }

    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Codes carried by resolver diagnostics. `E` codes are errors, `W` codes warnings.
pub mod codes {
    /// Import directive with no usable name.
    pub const INVALID_IMPORT: &str = "E0014";
    /// Namespace declaration missing its name or body.
    pub const MALFORMED_NAMESPACE: &str = "E0015";

    /// Import directive nothing in the file uses.
    pub const UNUSED_IMPORT: &str = "W0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Accumulates diagnostics while a structure is built.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// `E0015`: a namespace declaration that contributes nothing.
    pub fn malformed_namespace(&mut self, file: &Arc<str>, span: Span, what: &str) {
        self.add(
            Diagnostic::error(
                file.clone(),
                span,
                format!("malformed namespace declaration: {}", what),
            )
            .with_code(codes::MALFORMED_NAMESPACE),
        );
    }

    /// `E0014`: a directive without a usable name.
    pub fn invalid_import(&mut self, file: &Arc<str>, span: Span) {
        self.add(
            Diagnostic::error(file.clone(), span, "import directive names nothing")
                .with_code(codes::INVALID_IMPORT),
        );
    }

    /// `W0001`: a directive nothing in its file needs.
    pub fn unused_import(&mut self, file: &Arc<str>, span: Span, name: &str) {
        self.add(
            Diagnostic::warning(file.clone(), span, format!("unused import: '{}'", name))
                .with_code(codes::UNUSED_IMPORT),
        );
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }

    /// Drain everything collected so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
