//! # Diagnostics
//!
//! Malformed-input findings reported alongside generated output.
//!
//! A diagnostic never aborts a pass. Each one is scoped to the declaration
//! that produced it, and output for every other declaration is still
//! generated.
//!
//! ## Codes
//!
//! | Code                           | Severity | Raised when                                              |
//! |--------------------------------|----------|----------------------------------------------------------|
//! | `non_partial_dto`              | Error    | A `[Dto]` target is not declared partial                 |
//! | `unmatched_route_parameter`    | Warning  | A `{name}` route segment has no matching parameter       |
//! | `synthesis_failed`             | Error    | Rendering a generated unit failed                        |
//! | `duplicate_output_key`         | Error    | A declaration's output key was already produced          |
//! | `conflicting_request_envelope` | Warning  | Two envelope fields or two envelope records share a name |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use facadegen::diagnostics::{print_diagnostics, has_errors};
//!
//! let output = generator.run(&graph);
//! print_diagnostics(&output.diagnostics);
//! if has_errors(&output.diagnostics) {
//!     std::process::exit(1);
//! }
//! ```

use std::fmt;


/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Generation proceeds; the output may not behave as intended
    Warning,
    /// No output is produced for the affected declaration
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    NonPartialDto,
    UnmatchedRouteParameter,
    SynthesisFailed,
    DuplicateOutputKey,
    ConflictingRequestEnvelope,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::NonPartialDto => "non_partial_dto",
            DiagnosticCode::UnmatchedRouteParameter => "unmatched_route_parameter",
            DiagnosticCode::SynthesisFailed => "synthesis_failed",
            DiagnosticCode::DuplicateOutputKey => "duplicate_output_key",
            DiagnosticCode::ConflictingRequestEnvelope => "conflicting_request_envelope",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticCode::UnmatchedRouteParameter
            | DiagnosticCode::ConflictingRequestEnvelope => Severity::Warning,
            DiagnosticCode::NonPartialDto
            | DiagnosticCode::SynthesisFailed
            | DiagnosticCode::DuplicateOutputKey => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A malformed-input finding tied to a declaration or member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    /// Identity of the declaration or `Declaration.Member` the finding is about
    pub location: String,
    /// Optional suggestion for how to fix it
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the code's default severity
    pub fn new(
        code: DiagnosticCode,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            code,
            severity: code.severity(),
            message: message.into(),
            location: location.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.location, self.message
        )
    }
}

/// Append-only collector for one unit of work.
///
/// Resolvers write into a private reporter; the pass merges it into the
/// shared stream only once the declaration has been fully processed.
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => tracing::warn!(
                code = diagnostic.code.as_str(),
                location = %diagnostic.location,
                "{}",
                diagnostic.message
            ),
            Severity::Error => tracing::error!(
                code = diagnostic.code.as_str(),
                location = %diagnostic.location,
                "{}",
                diagnostic.message
            ),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// True when any diagnostic is an error
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Format diagnostics grouped by severity, errors first
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "✅ No diagnostics\n".to_string();
    }

    let errors: Vec<_> = diagnostics.iter().filter(|d| d.is_error()).collect();
    let warnings: Vec<_> = diagnostics.iter().filter(|d| !d.is_error()).collect();

    let mut out = String::new();
    out.push_str(&format!(
        "\n📋 Diagnostics:\n   {} error(s), {} warning(s)\n\n",
        errors.len(),
        warnings.len()
    ));

    for (title, group) in [("❌ Errors:", &errors), ("⚠️  Warnings:", &warnings)] {
        if group.is_empty() {
            continue;
        }
        out.push_str(title);
        out.push('\n');
        for diagnostic in group.iter() {
            out.push_str(&format!("   [{}] {}\n", diagnostic.code, diagnostic.location));
            out.push_str(&format!("      {}\n", diagnostic.message));
            if let Some(suggestion) = &diagnostic.suggestion {
                out.push_str(&format!("      💡 Suggestion: {}\n", suggestion));
            }
        }
        out.push('\n');
    }
    out
}

/// Print diagnostics in a formatted way
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    print!("{}", format_diagnostics(diagnostics));
}
