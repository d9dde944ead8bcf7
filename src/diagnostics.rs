use crate::{script::ScriptError, span::Span};
use annotate_snippets::{Level, Renderer, Snippet};

/// A renderable error report over the proof source text. Annotation spans
/// are byte ranges into that text.
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    annotations: Vec<(String, Span)>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_error(mut self, msg: impl Into<String>, span: Span) -> Self {
        self.annotations.push((msg.into(), span));
        self
    }

    /// Render with the proof text as the quoted source. `origin` names the
    /// source in the header, usually the proof file path.
    pub fn render(&self, origin: &str, source: &str) -> String {
        let mut msg = Level::Error.title(&self.title);

        if !self.annotations.is_empty() {
            let mut snippet = Snippet::source(source).origin(origin).fold(true);
            for (label, span) in &self.annotations {
                snippet = snippet.annotation(Level::Error.span(span.range()).label(label));
            }
            msg = msg.snippet(snippet);
        }

        let renderer = Renderer::styled();
        renderer.render(msg).to_string()
    }
}

/// The report for a script error, with the offending token annotated.
pub fn script_error_report(error: &ScriptError) -> Report {
    let title = match error {
        ScriptError::Formula { line_index, .. } => {
            format!("malformed formula on line {line_index}")
        }
        ScriptError::MalformedLine { expected_index, .. } => {
            format!("malformed proof line {expected_index}")
        }
        ScriptError::MalformedNumbering { .. } => {
            "line numbers must be consecutive starting at 1".to_string()
        }
        ScriptError::UnknownJustification { word, .. } => {
            format!("unknown justification `{word}`")
        }
        ScriptError::EmptyProof => "proof text contains no derivation lines".to_string(),
    };

    let report = Report::new(title);
    match error.span() {
        Some(span) => report.with_error(annotation_label(error), span),
        None => report,
    }
}

/// The report for a rejected derivation line, annotating the line itself.
pub fn rejection_report(message: &str, line_span: Span) -> Report {
    Report::new("derivation rejected").with_error(message, line_span)
}

fn annotation_label(error: &ScriptError) -> String {
    match error {
        ScriptError::Formula { error, .. } => error.to_string(),
        ScriptError::MalformedLine { .. } => {
            "expected `<index> <formula> <justification>`".to_string()
        }
        ScriptError::MalformedNumbering { expected, .. } => format!("expected line {expected}"),
        ScriptError::UnknownJustification { .. } => {
            "expected `Premise`, `AX1`, `AX2`, `AX3`, or `MP <i> <j>`".to_string()
        }
        ScriptError::EmptyProof => String::new(),
    }
}
