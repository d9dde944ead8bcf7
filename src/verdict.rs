use crate::{
    script::ScriptError,
    util::{
        ansi::{ANSI_BOLD, ANSI_GRAY, ANSI_GREEN, ANSI_RED, ANSI_RESET},
        plural,
    },
};

/// The outcome class of one verification call. Each class maps to a
/// distinct process exit code so callers can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Verified,
    /// A premise, axiom, modus ponens, or goal check failed.
    RuleViolation,
    /// A formula or proof line could not be parsed.
    ParseError,
    MalformedNumbering,
    UnknownJustification,
}

impl StatusClass {
    pub fn code(&self) -> i32 {
        match self {
            Self::Verified => 0,
            Self::RuleViolation => 1,
            Self::ParseError => 2,
            Self::MalformedNumbering => 3,
            Self::UnknownJustification => 4,
        }
    }
}

/// The result of checking one derivation: a status class, the ordered
/// per-line diagnostics, and the first failing line if any. Owned by the
/// caller; nothing is shared across verification calls.
#[derive(Debug, Clone)]
pub struct Verdict {
    status: StatusClass,
    diagnostics: Vec<String>,
    failing_line: Option<usize>,
    lines_accepted: usize,
}

impl Verdict {
    pub(crate) fn verified(diagnostics: Vec<String>, lines_accepted: usize) -> Self {
        Self {
            status: StatusClass::Verified,
            diagnostics,
            failing_line: None,
            lines_accepted,
        }
    }

    pub(crate) fn failed(
        status: StatusClass,
        diagnostics: Vec<String>,
        failing_line: Option<usize>,
        lines_accepted: usize,
    ) -> Self {
        Self {
            status,
            diagnostics,
            failing_line,
            lines_accepted,
        }
    }

    pub(crate) fn from_script_error(error: &ScriptError) -> Self {
        let status = match error {
            ScriptError::MalformedNumbering { .. } => StatusClass::MalformedNumbering,
            ScriptError::UnknownJustification { .. } => StatusClass::UnknownJustification,
            ScriptError::Formula { .. }
            | ScriptError::MalformedLine { .. }
            | ScriptError::EmptyProof => StatusClass::ParseError,
        };

        Self::failed(status, vec![error.to_string()], error.line_index(), 0)
    }

    pub fn success(&self) -> bool {
        self.status == StatusClass::Verified
    }

    pub fn status(&self) -> StatusClass {
        self.status
    }

    /// Ordered per-line messages; on failure the last entry describes the
    /// rejection.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn failing_line(&self) -> Option<usize> {
        self.failing_line
    }

    pub fn lines_accepted(&self) -> usize {
        self.lines_accepted
    }
}

/// Print the verdict to stdout.
pub fn display_report(verdict: &Verdict) {
    let messages = verdict.diagnostics();
    for (i, message) in messages.iter().enumerate() {
        if !verdict.success() && i + 1 == messages.len() {
            println!("  {ANSI_RED}{message}{ANSI_RESET}");
        } else {
            println!("  {ANSI_GRAY}{message}{ANSI_RESET}");
        }
    }

    println!();
    let accepted = verdict.lines_accepted();
    println!(
        " {ANSI_GREEN}✓{ANSI_RESET} {ANSI_BOLD}{accepted}{ANSI_RESET} line{} accepted.",
        plural(accepted)
    );
    if let Some(line) = verdict.failing_line() {
        println!(" {ANSI_RED}✗{ANSI_RESET} line {ANSI_BOLD}{line}{ANSI_RESET} rejected.");
    }

    if verdict.success() {
        println!();
        println!("Proof verified.");
    }
}
