//! Mechanical verification of derivations in the Łukasiewicz–Church (P2)
//! propositional axiom system, written in Polish prefix notation.
//!
//! A derivation is a numbered sequence of `<index> <formula>
//! <justification>` lines; [`verify`] replays it against a premise list and
//! a goal and returns an owned [`Verdict`]. Nothing is shared between
//! verification calls.

pub mod checker;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod formula;
pub mod schema;
pub mod script;
pub mod span;
pub mod util;
pub mod verdict;

pub use checker::{RuleViolation, check_derivation};
pub use formula::{Formula, FormulaError, parse_formula};
pub use schema::SchemaId;
pub use script::{Justification, ProofLine, ScriptError, parse_script};
pub use verdict::{StatusClass, Verdict};

/// Verify a derivation against premises and a goal.
///
/// The proof text is untrusted input; any malformed line yields a failed
/// verdict in the appropriate status class, never a panic.
pub fn verify(premises: &[Formula], goal: &Formula, proof: &str) -> Verdict {
    match script::parse_script(proof) {
        Ok(lines) => checker::check_derivation(premises, goal, &lines),
        Err(error) => Verdict::from_script_error(&error),
    }
}

/// Parse premise and goal strings, then verify. A premise or goal that is
/// not a well-formed formula yields a parse-error verdict naming it.
pub fn verify_text(premises: &[&str], goal: &str, proof: &str) -> Verdict {
    let mut premise_formulas = Vec::with_capacity(premises.len());
    for (i, text) in premises.iter().enumerate() {
        match formula::parse_formula(text) {
            Ok(formula) => premise_formulas.push(formula),
            Err(error) => {
                let message = format!("premise {} `{text}`: {error}", i + 1);
                return Verdict::failed(StatusClass::ParseError, vec![message], None, 0);
            }
        }
    }

    let goal_formula = match formula::parse_formula(goal) {
        Ok(formula) => formula,
        Err(error) => {
            let message = format!("goal `{goal}`: {error}");
            return Verdict::failed(StatusClass::ParseError, vec![message], None, 0);
        }
    };

    verify(&premise_formulas, &goal_formula, proof)
}
