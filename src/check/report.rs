//! check::report
//!
//! Aggregated result of a validation run and its rendering.
//!
//! Rendering is a pure function of the report, so running the same check
//! twice on unchanged input produces byte-identical output.

use serde::Serialize;

use super::issues::{IssueId, Inconsistency, InconsistencyKind, Severity};
use crate::core::config::ReportFormat;
use crate::core::cycle::CyclePath;
use crate::core::types::LessonId;

/// Process exit status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Acyclic and consistent
    Clean,
    /// Cycle or blocking inconsistency found
    Failed,
    /// Input could not be loaded
    Malformed,
}

impl ExitStatus {
    /// Numeric exit code.
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::Failed => 1,
            ExitStatus::Malformed => 2,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        std::process::ExitCode::from(status.code())
    }
}

/// Result of checking one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Number of sections
    pub sections: usize,
    /// Number of distinct edges
    pub edges: usize,
    /// Every cycle found
    pub cycles: Vec<CyclePath>,
    /// Teaching order, if the graph is acyclic
    pub sequence: Option<Vec<LessonId>>,
    /// Whether the teaching order equals the declared ordinal order
    pub matches_declared: Option<bool>,
    /// Every inconsistency found
    pub issues: Vec<Inconsistency>,
    /// Warnings fail the run
    pub strict: bool,
}

#[derive(Serialize)]
struct IssueView<'a> {
    id: IssueId,
    kind: InconsistencyKind,
    severity: Severity,
    from: Option<&'a LessonId>,
    to: Option<&'a LessonId>,
    message: String,
}

#[derive(Serialize)]
struct ReportView<'a> {
    ok: bool,
    strict: bool,
    sections: usize,
    edges: usize,
    cycles: &'a [CyclePath],
    sequence: Option<&'a [LessonId]>,
    sequence_matches_declared: Option<bool>,
    errors: usize,
    warnings: usize,
    issues: Vec<IssueView<'a>>,
}

impl Report {
    /// Number of error-severity issues.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-severity issues.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity() == severity)
            .count()
    }

    /// Check whether the run passes.
    pub fn is_ok(&self) -> bool {
        self.cycles.is_empty()
            && !self
                .issues
                .iter()
                .any(|i| i.severity().is_blocking(self.strict))
    }

    /// Exit status for this report.
    pub fn exit_status(&self) -> ExitStatus {
        if self.is_ok() {
            ExitStatus::Clean
        } else {
            ExitStatus::Failed
        }
    }

    /// Render in the requested format.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if JSON rendering fails.
    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => self.render_json(),
        }
    }

    fn render_text(&self) -> String {
        let mut lines = vec![format!(
            "checked {} {}, {} {}",
            self.sections,
            plural(self.sections, "section"),
            self.edges,
            plural(self.edges, "edge")
        )];

        for cycle in &self.cycles {
            lines.push(format!("error[cycle]: {}", cycle));
        }
        for issue in &self.issues {
            lines.push(format!(
                "{}[{}]: {} [{}]",
                issue.severity(),
                issue.kind,
                issue,
                issue.issue_id()
            ));
        }

        if let Some(sequence) = self.sequence.as_ref().filter(|s| !s.is_empty()) {
            let order = sequence
                .iter()
                .map(LessonId::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("teaching order: {order}"));
        }

        let cycles = self.cycles.len();
        let errors = self.error_count();
        let warnings = self.warning_count();
        lines.push(format!(
            "{}: {} {}, {} {}, {} {}",
            if self.is_ok() { "ok" } else { "failed" },
            cycles,
            plural(cycles, "cycle"),
            errors,
            plural(errors, "error"),
            warnings,
            plural(warnings, "warning"),
        ));

        lines.join("\n")
    }

    fn render_json(&self) -> Result<String, serde_json::Error> {
        let view = ReportView {
            ok: self.is_ok(),
            strict: self.strict,
            sections: self.sections,
            edges: self.edges,
            cycles: &self.cycles,
            sequence: self.sequence.as_deref(),
            sequence_matches_declared: self.matches_declared,
            errors: self.error_count(),
            warnings: self.warning_count(),
            issues: self
                .issues
                .iter()
                .map(|issue| IssueView {
                    id: issue.issue_id(),
                    kind: issue.kind,
                    severity: issue.severity(),
                    from: issue.from.as_ref(),
                    to: issue.to.as_ref(),
                    message: issue.to_string(),
                })
                .collect(),
        };

        serde_json::to_string_pretty(&view)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
