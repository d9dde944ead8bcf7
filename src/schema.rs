use crate::formula::{Formula, parse_formula};
use rustc_hash::FxHashMap;
use std::{collections::hash_map::Entry, fmt, sync::LazyLock};

// The axiom schemas are held as data: ordinary formulas whose atoms act as
// metavariables, consumed by one generic matcher. Adding a schema is a data
// change, not new control flow.
static AX1_TEMPLATE: LazyLock<Formula> = LazyLock::new(|| parse_formula("cAcBA").unwrap());
static AX2_TEMPLATE: LazyLock<Formula> = LazyLock::new(|| parse_formula("ccAcBCccABcAC").unwrap());
static AX3_TEMPLATE: LazyLock<Formula> = LazyLock::new(|| parse_formula("ccnBnAcAB").unwrap());

/// One of the three axiom schemas of the P2 system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    /// A → (B → A)
    Ax1,
    /// (A → (B → C)) → ((A → B) → (A → C))
    Ax2,
    /// (¬B → ¬A) → (A → B)
    Ax3,
}

impl SchemaId {
    pub const ALL: [SchemaId; 3] = [SchemaId::Ax1, SchemaId::Ax2, SchemaId::Ax3];

    /// The schema named by a justification keyword, if any.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "AX1" => Some(Self::Ax1),
            "AX2" => Some(Self::Ax2),
            "AX3" => Some(Self::Ax3),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ax1 => "AX1",
            Self::Ax2 => "AX2",
            Self::Ax3 => "AX3",
        }
    }

    pub fn template(&self) -> &'static Formula {
        match self {
            Self::Ax1 => &AX1_TEMPLATE,
            Self::Ax2 => &AX2_TEMPLATE,
            Self::Ax3 => &AX3_TEMPLATE,
        }
    }

    /// Whether `candidate` is an instance of this schema, i.e. obtainable by
    /// substituting formulas for the template's metavariables consistently.
    pub fn matches(&self, candidate: &Formula) -> bool {
        let mut bindings = FxHashMap::default();
        match_template(self.template(), candidate, &mut bindings)
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural unification of a template against a candidate. A metavariable
/// binds the candidate subtree at its first occurrence; every later
/// occurrence must bind a structurally equal subtree. Connectives must match
/// exactly, so arity and tree shape always align with the template.
fn match_template<'c>(
    template: &Formula,
    candidate: &'c Formula,
    bindings: &mut FxHashMap<char, &'c Formula>,
) -> bool {
    match (template, candidate) {
        (Formula::Atom(metavariable), _) => match bindings.entry(*metavariable) {
            Entry::Occupied(bound) => *bound.get() == candidate,
            Entry::Vacant(slot) => {
                slot.insert(candidate);
                true
            }
        },
        (Formula::Negation(template_operand), Formula::Negation(operand)) => {
            match_template(template_operand, operand, bindings)
        }
        (Formula::Implication(template_antecedent, template_consequent), Formula::Implication(antecedent, consequent)) => {
            match_template(template_antecedent, antecedent, bindings)
                && match_template(template_consequent, consequent, bindings)
        }
        _ => false,
    }
}
