use crate::{
    formula::{Formula, FormulaError, parse_formula},
    schema::SchemaId,
    span::Span,
};
use std::fmt;

/// One numbered derivation step: `<index> <formula> <justification>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofLine {
    index: usize,
    formula: Formula,
    justification: Justification,
    span: Span,
}

impl ProofLine {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn justification(&self) -> Justification {
        self.justification
    }

    /// The span of the whole line within the proof text.
    pub fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    Premise,
    Axiom(SchemaId),
    /// `ModusPonens(i, j)`: line i proves the antecedent, line j the
    /// implication. Both are 1-based line indices.
    ModusPonens(usize, usize),
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Premise => f.write_str("Premise"),
            Self::Axiom(schema) => write!(f, "{schema}"),
            Self::ModusPonens(i, j) => write!(f, "MP {i} {j}"),
        }
    }
}

/// How splitting the proof text into lines failed. Spans point into the
/// proof text handed to [`parse_script`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A formula token failed to parse.
    Formula {
        line_index: usize,
        error: FormulaError,
        span: Span,
    },
    /// A line is missing fields, has extra fields, or has a field that is
    /// not of the required form.
    MalformedLine { expected_index: usize, span: Span },
    /// Line indices must be consecutive starting at 1.
    MalformedNumbering {
        expected: usize,
        found: usize,
        span: Span,
    },
    /// The justification word is not in the recognized set.
    UnknownJustification {
        line_index: usize,
        word: String,
        span: Span,
    },
    /// The proof text contains no derivation lines at all.
    EmptyProof,
}

impl ScriptError {
    /// The 1-based index of the offending line, where one exists.
    pub fn line_index(&self) -> Option<usize> {
        match self {
            Self::Formula { line_index, .. } => Some(*line_index),
            Self::MalformedLine { expected_index, .. } => Some(*expected_index),
            Self::MalformedNumbering { found, .. } => Some(*found),
            Self::UnknownJustification { line_index, .. } => Some(*line_index),
            Self::EmptyProof => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Formula { span, .. } => Some(*span),
            Self::MalformedLine { span, .. } => Some(*span),
            Self::MalformedNumbering { span, .. } => Some(*span),
            Self::UnknownJustification { span, .. } => Some(*span),
            Self::EmptyProof => None,
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formula { line_index, error, .. } => {
                write!(f, "line {line_index}: malformed formula: {error}")
            }
            Self::MalformedLine { expected_index, .. } => {
                write!(
                    f,
                    "line {expected_index}: expected `<index> <formula> <justification>`"
                )
            }
            Self::MalformedNumbering { expected, found, .. } => {
                write!(
                    f,
                    "line numbers must be consecutive starting at 1 (expected {expected} but found {found})"
                )
            }
            Self::UnknownJustification { line_index, word, .. } => {
                write!(f, "line {line_index}: unknown justification `{word}`")
            }
            Self::EmptyProof => f.write_str("proof text contains no derivation lines"),
        }
    }
}

/// Split proof text into ordered proof lines. Blank lines and lines whose
/// first non-space character is `#` are ignored. Fails on the first
/// malformed line.
pub fn parse_script(text: &str) -> Result<Vec<ProofLine>, ScriptError> {
    let mut lines = Vec::new();
    let mut line_start = 0;

    for raw_line in text.split('\n') {
        let line_span = Span::new(line_start, line_start + raw_line.len());
        line_start = line_span.end() + 1;

        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let expected_index = lines.len() + 1;
        lines.push(parse_line(raw_line, line_span, expected_index)?);
    }

    if lines.is_empty() {
        return Err(ScriptError::EmptyProof);
    }

    Ok(lines)
}

fn parse_line(
    raw_line: &str,
    line_span: Span,
    expected_index: usize,
) -> Result<ProofLine, ScriptError> {
    let malformed = || ScriptError::MalformedLine {
        expected_index,
        span: line_span,
    };

    let fields: Vec<Field> = fields(raw_line, line_span.start()).collect();
    let [index_field, formula_field, justification_field, rest @ ..] = fields.as_slice() else {
        return Err(malformed());
    };

    let index: usize = index_field.text.parse().map_err(|_| malformed())?;
    if index == 0 {
        return Err(malformed());
    }
    if index != expected_index {
        return Err(ScriptError::MalformedNumbering {
            expected: expected_index,
            found: index,
            span: index_field.span,
        });
    }

    let formula = parse_formula(formula_field.text).map_err(|error| ScriptError::Formula {
        line_index: index,
        error,
        span: formula_field.span,
    })?;

    let justification = match justification_field.text {
        "Premise" => Justification::Premise,
        "MP" => {
            let [i_field, j_field] = rest else {
                return Err(malformed());
            };
            let i = parse_citation(i_field.text).ok_or_else(malformed)?;
            let j = parse_citation(j_field.text).ok_or_else(malformed)?;
            return Ok(ProofLine {
                index,
                formula,
                justification: Justification::ModusPonens(i, j),
                span: line_span,
            });
        }
        word => match SchemaId::from_keyword(word) {
            Some(schema) => Justification::Axiom(schema),
            None => {
                return Err(ScriptError::UnknownJustification {
                    line_index: index,
                    word: word.to_string(),
                    span: justification_field.span,
                });
            }
        },
    };

    // Premise and axiom justifications take no arguments.
    if !rest.is_empty() {
        return Err(malformed());
    }

    Ok(ProofLine {
        index,
        formula,
        justification,
        span: line_span,
    })
}

fn parse_citation(text: &str) -> Option<usize> {
    let cited: usize = text.parse().ok()?;
    if cited == 0 { None } else { Some(cited) }
}

struct Field<'a> {
    text: &'a str,
    span: Span,
}

/// Whitespace-separated fields of a line, each with its span in the proof
/// text (`line_start` is the line's byte offset within that text).
fn fields(line: &str, line_start: usize) -> impl Iterator<Item = Field<'_>> {
    line.split_whitespace().map(move |text| {
        // `split_whitespace` yields subslices of `line`, so offsets can be
        // recovered from pointer arithmetic.
        let offset = text.as_ptr() as usize - line.as_ptr() as usize;
        Field {
            text,
            span: Span::new(line_start + offset, line_start + offset + text.len()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_script() {
        let lines = parse_script("1 cPcQP AX1\n2 P Premise\n3 cQP MP 2 1\n").unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].index(), 1);
        assert_eq!(lines[0].justification(), Justification::Axiom(SchemaId::Ax1));
        assert_eq!(lines[1].justification(), Justification::Premise);
        assert_eq!(lines[2].justification(), Justification::ModusPonens(2, 1));
        assert_eq!(lines[2].formula(), &parse_formula("cQP").unwrap());
    }

    #[test]
    fn ignores_blank_and_comment_lines() {
        let text = "\n# a comment\n1 P Premise\n\n   # indented comment\n2 Q Premise\n\n";
        let lines = parse_script(text).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].index(), 2);
    }

    #[test]
    fn rejects_empty_proofs() {
        assert_eq!(parse_script(""), Err(ScriptError::EmptyProof));
        assert_eq!(parse_script("\n# only comments\n"), Err(ScriptError::EmptyProof));
    }

    #[test]
    fn rejects_bad_numbering() {
        let error = parse_script("1 P Premise\n3 Q Premise\n").unwrap_err();
        assert!(matches!(
            error,
            ScriptError::MalformedNumbering { expected: 2, found: 3, .. }
        ));

        // Duplicate indices are the same error.
        let error = parse_script("1 P Premise\n1 Q Premise\n").unwrap_err();
        assert!(matches!(
            error,
            ScriptError::MalformedNumbering { expected: 2, found: 1, .. }
        ));

        // And so is not starting at 1.
        let error = parse_script("2 P Premise\n").unwrap_err();
        assert!(matches!(
            error,
            ScriptError::MalformedNumbering { expected: 1, found: 2, .. }
        ));
    }

    #[test]
    fn rejects_unknown_justifications() {
        let error = parse_script("1 P Premise\n2 Q Foo\n").unwrap_err();
        let ScriptError::UnknownJustification { line_index, word, .. } = error else {
            panic!("expected UnknownJustification, got {error:?}");
        };
        assert_eq!(line_index, 2);
        assert_eq!(word, "Foo");

        // Keywords are literal: the original accepted any case, this
        // grammar does not.
        assert!(matches!(
            parse_script("1 P premise\n").unwrap_err(),
            ScriptError::UnknownJustification { .. }
        ));
    }

    #[test]
    fn rejects_malformed_lines() {
        // Missing justification.
        assert!(matches!(
            parse_script("1 P\n").unwrap_err(),
            ScriptError::MalformedLine { expected_index: 1, .. }
        ));
        // Missing MP citations.
        assert!(matches!(
            parse_script("1 P Premise\n2 Q MP 1\n").unwrap_err(),
            ScriptError::MalformedLine { expected_index: 2, .. }
        ));
        // Zero is not a valid citation.
        assert!(matches!(
            parse_script("1 P Premise\n2 Q MP 0 1\n").unwrap_err(),
            ScriptError::MalformedLine { .. }
        ));
        // Trailing fields after a no-argument justification.
        assert!(matches!(
            parse_script("1 P Premise extra\n").unwrap_err(),
            ScriptError::MalformedLine { .. }
        ));
        // A line index that is not a number.
        assert!(matches!(
            parse_script("one P Premise\n").unwrap_err(),
            ScriptError::MalformedLine { .. }
        ));
    }

    #[test]
    fn formula_errors_carry_the_token_span() {
        let error = parse_script("1 cPcQP AX1\n2 cP(Q) Premise\n").unwrap_err();
        let ScriptError::Formula { line_index, span, .. } = error else {
            panic!("expected Formula error, got {error:?}");
        };
        assert_eq!(line_index, 2);
        // The span covers the `cP(Q)` token on the second line.
        assert_eq!(span.start(), 14);
        assert_eq!(span.end(), 19);
    }

    #[test]
    fn line_spans_cover_the_source_line() {
        let text = "1 P Premise\n2 Q Premise\n";
        let lines = parse_script(text).unwrap();

        assert_eq!(&text[lines[0].span().range()], "1 P Premise");
        assert_eq!(&text[lines[1].span().range()], "2 Q Premise");
    }
}
