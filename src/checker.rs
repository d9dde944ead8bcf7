use crate::{
    formula::Formula,
    schema::SchemaId,
    script::{Justification, ProofLine, ScriptError},
    verdict::{StatusClass, Verdict},
};
use std::fmt;

/// Why the checker rejected a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// A `Premise` line's formula is not among the supplied premises.
    PremiseNotFound { formula: Formula },
    /// A claimed axiom instance does not match its schema.
    AxiomMismatch { schema: SchemaId, formula: Formula },
    /// A modus ponens citation refers to the current line or a later one.
    ForwardReference { cited: usize },
    /// The cited lines do not fit the modus ponens shape: line j proves no
    /// implication, or line i's formula differs from its antecedent.
    AntecedentMismatch {
        implication_line: usize,
        implication: Formula,
        antecedent_line: usize,
        antecedent: Formula,
    },
    /// The line's own formula differs from the cited implication's
    /// consequent.
    ConsequentMismatch {
        implication_line: usize,
        expected: Formula,
        found: Formula,
    },
    /// Every line was valid but the final proved formula is not the goal.
    GoalMismatch { proved: Formula, goal: Formula },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PremiseNotFound { formula } => {
                write!(f, "formula `{formula}` is not among the premises")
            }
            Self::AxiomMismatch { schema, formula } => {
                write!(f, "`{formula}` is not an instance of {schema}")
            }
            Self::ForwardReference { cited } => {
                write!(f, "cited line {cited} is not strictly earlier than this line")
            }
            Self::AntecedentMismatch {
                implication_line,
                implication,
                antecedent_line,
                antecedent,
            } => match implication.as_implication() {
                Some((expected_antecedent, _)) => write!(
                    f,
                    "line {antecedent_line} proves `{antecedent}` but the antecedent of line {implication_line} is `{expected_antecedent}`"
                ),
                None => write!(
                    f,
                    "line {implication_line} proves `{implication}`, which is not an implication"
                ),
            },
            Self::ConsequentMismatch {
                implication_line,
                expected,
                found,
            } => write!(
                f,
                "the implication at line {implication_line} yields `{expected}`, not `{found}`"
            ),
            Self::GoalMismatch { proved, goal } => {
                write!(f, "the final line proves `{proved}` but the goal is `{goal}`")
            }
        }
    }
}

/// Checker state as the derivation is replayed.
enum CheckState {
    Running,
    Failed { at: usize, violation: RuleViolation },
}

/// Replay the derivation in order, validating each line's justification
/// against the supplied premises and the table of already-proved lines.
/// Checking halts at the first failure; later lines are never evaluated.
pub fn check_derivation(premises: &[Formula], goal: &Formula, lines: &[ProofLine]) -> Verdict {
    if lines.is_empty() {
        return Verdict::from_script_error(&ScriptError::EmptyProof);
    }

    // The proof table: line n's formula lives at table[n - 1]. Entries are
    // appended only after their justification has been validated, so the
    // table's domain is always exactly the lines checked so far.
    let mut table: Vec<Formula> = Vec::with_capacity(lines.len());
    let mut log = Vec::new();
    let mut state = CheckState::Running;

    for line in lines {
        match check_line(line, premises, &table) {
            Ok(()) => {
                log.push(format!(
                    "line {}: ok  {}  [{}]",
                    line.index(),
                    line.formula(),
                    line.justification()
                ));
                table.push(line.formula().clone());
            }
            Err(violation) => {
                state = CheckState::Failed {
                    at: line.index(),
                    violation,
                };
                break;
            }
        }
    }

    // The derivation succeeds only if the last proved formula is the goal.
    // Unused premises and extra valid lines are fine.
    if let CheckState::Running = state
        && let Some(proved) = table.last()
        && proved != goal
    {
        state = CheckState::Failed {
            at: lines.len(),
            violation: RuleViolation::GoalMismatch {
                proved: proved.clone(),
                goal: goal.clone(),
            },
        };
    }

    match state {
        CheckState::Running => {
            let final_line = lines.len();
            log.push(format!("line {final_line} proves the goal `{goal}`"));
            Verdict::verified(log, final_line)
        }
        CheckState::Failed { at, violation } => {
            log.push(format!("line {at}: {violation}"));
            Verdict::failed(StatusClass::RuleViolation, log, Some(at), table.len())
        }
    }
}

fn check_line(
    line: &ProofLine,
    premises: &[Formula],
    table: &[Formula],
) -> Result<(), RuleViolation> {
    match line.justification() {
        Justification::Premise => {
            // Membership is structural equality; premise order and
            // duplicates are irrelevant.
            if premises.contains(line.formula()) {
                Ok(())
            } else {
                Err(RuleViolation::PremiseNotFound {
                    formula: line.formula().clone(),
                })
            }
        }
        Justification::Axiom(schema) => {
            if schema.matches(line.formula()) {
                Ok(())
            } else {
                Err(RuleViolation::AxiomMismatch {
                    schema,
                    formula: line.formula().clone(),
                })
            }
        }
        Justification::ModusPonens(i, j) => {
            check_modus_ponens(line.index(), line.formula(), i, j, table)
        }
    }
}

/// From phi (line i) and `Implication(phi, psi)` (line j), infer psi. Both
/// citations must be strictly earlier lines; i = j is never valid because
/// the same line cannot be both the implication and its own antecedent.
fn check_modus_ponens(
    index: usize,
    conclusion: &Formula,
    i: usize,
    j: usize,
    table: &[Formula],
) -> Result<(), RuleViolation> {
    if i >= index {
        return Err(RuleViolation::ForwardReference { cited: i });
    }
    if j >= index {
        return Err(RuleViolation::ForwardReference { cited: j });
    }

    let antecedent = &table[i - 1];
    let implication = &table[j - 1];

    let mismatch = || RuleViolation::AntecedentMismatch {
        implication_line: j,
        implication: implication.clone(),
        antecedent_line: i,
        antecedent: antecedent.clone(),
    };

    let Some((phi, psi)) = implication.as_implication() else {
        return Err(mismatch());
    };
    if antecedent != phi {
        return Err(mismatch());
    }
    if conclusion != psi {
        return Err(RuleViolation::ConsequentMismatch {
            implication_line: j,
            expected: psi.clone(),
            found: conclusion.clone(),
        });
    }

    Ok(())
}
