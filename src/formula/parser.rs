use crate::formula::Formula;
use std::fmt;

/// Parse a complete formula in prefix notation. The entire string must be
/// consumed; a leftover suffix is an error.
pub fn parse_formula(text: &str) -> Result<Formula, FormulaError> {
    let mut stream = Stream::new(text);
    let formula = parse_node(&mut stream)?;

    if stream.peek().is_some() {
        return Err(FormulaError::new(stream.pos(), FormulaErrorKind::TrailingInput));
    }

    Ok(formula)
}

/// Arity is determined entirely by the leading symbol, so a single token of
/// lookahead suffices and no backtracking is ever needed.
fn parse_node(stream: &mut Stream) -> Result<Formula, FormulaError> {
    let at = stream.pos();
    let Some(symbol) = stream.pop() else {
        return Err(FormulaError::new(at, FormulaErrorKind::UnexpectedEnd));
    };

    match symbol {
        'c' => {
            let antecedent = parse_node(stream)?;
            let consequent = parse_node(stream)?;
            Ok(Formula::implication(antecedent, consequent))
        }
        'n' => {
            let operand = parse_node(stream)?;
            Ok(Formula::negation(operand))
        }
        'A'..='Z' => Ok(Formula::atom(symbol)),
        other => Err(FormulaError::new(at, FormulaErrorKind::UnrecognizedSymbol(other))),
    }
}

#[derive(Debug)]
struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Stream<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn pop(&mut self) -> Option<char> {
        let char = self.peek()?;
        self.pos += char.len_utf8();
        Some(char)
    }
}

/// Why and where parsing a formula failed. The offset is the byte position
/// within the parsed string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaError {
    offset: usize,
    kind: FormulaErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaErrorKind {
    UnexpectedEnd,
    UnrecognizedSymbol(char),
    TrailingInput,
}

impl FormulaError {
    fn new(offset: usize, kind: FormulaErrorKind) -> Self {
        Self { offset, kind }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn kind(&self) -> FormulaErrorKind {
        self.kind
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FormulaErrorKind::UnexpectedEnd => {
                write!(f, "formula ends before all operands are given")
            }
            FormulaErrorKind::UnrecognizedSymbol(symbol) => {
                write!(f, "unrecognized symbol `{symbol}` at offset {}", self.offset)
            }
            FormulaErrorKind::TrailingInput => {
                write!(f, "trailing characters after the formula at offset {}", self.offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_atoms() {
        assert_eq!(parse_formula("P"), Ok(Formula::atom('P')));
        assert_eq!(parse_formula("Z"), Ok(Formula::atom('Z')));
    }

    #[test]
    fn parses_connectives() {
        assert_eq!(
            parse_formula("cPQ"),
            Ok(Formula::implication(Formula::atom('P'), Formula::atom('Q')))
        );
        assert_eq!(parse_formula("nP"), Ok(Formula::negation(Formula::atom('P'))));
        assert_eq!(
            parse_formula("cnPcQR"),
            Ok(Formula::implication(
                Formula::negation(Formula::atom('P')),
                Formula::implication(Formula::atom('Q'), Formula::atom('R')),
            ))
        );
    }

    #[test]
    fn rejects_incomplete_input() {
        let error = parse_formula("cP").unwrap_err();
        assert_eq!(error.kind(), FormulaErrorKind::UnexpectedEnd);
        assert_eq!(error.offset(), 2);

        assert_eq!(parse_formula("").unwrap_err().kind(), FormulaErrorKind::UnexpectedEnd);
        assert_eq!(parse_formula("n").unwrap_err().kind(), FormulaErrorKind::UnexpectedEnd);
    }

    #[test]
    fn rejects_unrecognized_symbols() {
        let error = parse_formula("cPq").unwrap_err();
        assert_eq!(error.kind(), FormulaErrorKind::UnrecognizedSymbol('q'));
        assert_eq!(error.offset(), 2);

        // Whitespace is not permitted inside a formula.
        let error = parse_formula("c PQ").unwrap_err();
        assert_eq!(error.kind(), FormulaErrorKind::UnrecognizedSymbol(' '));
    }

    #[test]
    fn rejects_trailing_input() {
        let error = parse_formula("PQ").unwrap_err();
        assert_eq!(error.kind(), FormulaErrorKind::TrailingInput);
        assert_eq!(error.offset(), 1);

        let error = parse_formula("cPQR").unwrap_err();
        assert_eq!(error.kind(), FormulaErrorKind::TrailingInput);
        assert_eq!(error.offset(), 3);
    }

    #[test]
    fn round_trips() {
        for text in ["P", "nA", "cPQ", "ccnBnAcAB", "cPcQnP", "nnnA", "ccABcCD"] {
            let formula = parse_formula(text).unwrap();
            assert_eq!(formula.to_string(), text);
            assert_eq!(parse_formula(&formula.to_string()), Ok(formula));
        }
    }
}
