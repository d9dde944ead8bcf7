use lukas::{Formula, SchemaId, StatusClass, parse_formula, verify};
use proptest::prelude::*;

fn formula_strategy() -> impl Strategy<Value = Formula> {
    let leaf = prop::sample::select(('A'..='Z').collect::<Vec<_>>()).prop_map(Formula::atom);
    leaf.prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::negation),
            (inner.clone(), inner).prop_map(|(a, c)| Formula::implication(a, c)),
        ]
    })
}

proptest! {
    #[test]
    fn parsing_round_trips(formula in formula_strategy()) {
        let text = formula.to_string();
        prop_assert_eq!(parse_formula(&text), Ok(formula));
    }

    // Substituting arbitrary formulas into a schema's template yields an
    // instance of that schema and of no other: every cross-schema pair
    // forces a metavariable to contain itself or a negation to equal an
    // implication, so there are no coincidental instances.
    #[test]
    fn ax1_instances_match_only_ax1(a in formula_strategy(), b in formula_strategy()) {
        let instance = Formula::implication(
            a.clone(),
            Formula::implication(b, a),
        );

        prop_assert!(SchemaId::Ax1.matches(&instance));
        prop_assert!(!SchemaId::Ax2.matches(&instance));
        prop_assert!(!SchemaId::Ax3.matches(&instance));
    }

    #[test]
    fn ax2_instances_match_only_ax2(
        a in formula_strategy(),
        b in formula_strategy(),
        c in formula_strategy(),
    ) {
        let instance = Formula::implication(
            Formula::implication(a.clone(), Formula::implication(b.clone(), c.clone())),
            Formula::implication(
                Formula::implication(a.clone(), b),
                Formula::implication(a, c),
            ),
        );

        prop_assert!(SchemaId::Ax2.matches(&instance));
        prop_assert!(!SchemaId::Ax1.matches(&instance));
        prop_assert!(!SchemaId::Ax3.matches(&instance));
    }

    #[test]
    fn ax3_instances_match_only_ax3(a in formula_strategy(), b in formula_strategy()) {
        let instance = Formula::implication(
            Formula::implication(Formula::negation(b.clone()), Formula::negation(a.clone())),
            Formula::implication(a, b),
        );

        prop_assert!(SchemaId::Ax3.matches(&instance));
        prop_assert!(!SchemaId::Ax1.matches(&instance));
        prop_assert!(!SchemaId::Ax2.matches(&instance));
    }

    #[test]
    fn modus_ponens_infers_exactly_the_consequent(
        phi in formula_strategy(),
        psi in formula_strategy(),
    ) {
        let implication = Formula::implication(phi.clone(), psi.clone());
        let premises = [phi.clone(), implication.clone()];
        let proof = format!("1 {phi} Premise\n2 {implication} Premise\n3 {psi} MP 1 2\n");

        let verdict = verify(&premises, &psi, &proof);
        prop_assert!(verdict.success());
    }

    #[test]
    fn any_forward_citation_is_rejected(
        psi in formula_strategy(),
        i in 1usize..10,
        j in 1usize..10,
    ) {
        // Line 1 is the only line, so every citation is forward or
        // self-referential.
        let proof = format!("1 {psi} MP {i} {j}\n");

        let verdict = verify(&[], &psi, &proof);
        prop_assert!(!verdict.success());
        prop_assert_eq!(verdict.status(), StatusClass::RuleViolation);
        prop_assert_eq!(verdict.failing_line(), Some(1));
    }
}
