//! Property-based tests for unification using proptest.

use super::unify;
use crate::fol::{Substitution, Term};
use proptest::prelude::*;

/// Generate a random term of bounded depth.
///
/// Terms draw from a fixed pool of variables, constants, and relation names
/// so that generated pairs share symbols often enough to unify.
fn arb_term(max_depth: u32) -> BoxedStrategy<Term> {
    if max_depth == 0 {
        prop_oneof![
            (0..4u8).prop_map(|i| Term::var(format!("?x{}", i))),
            (0..4u8).prop_map(|i| Term::constant(format!("c{}", i))),
        ]
        .boxed()
    } else {
        prop_oneof![
            3 => (0..4u8).prop_map(|i| Term::var(format!("?x{}", i))),
            3 => (0..4u8).prop_map(|i| Term::constant(format!("c{}", i))),
            2 => (
                0..2u8,
                proptest::collection::vec(arb_term(max_depth - 1), 1..=2)
            )
                .prop_map(|(r, args)| Term::predicate(format!("r{}", r), args)),
        ]
        .boxed()
    }
}

proptest! {
    /// Soundness: if unify(a, b) = sigma, then a·sigma = b·sigma
    #[test]
    fn unification_soundness(a in arb_term(3), b in arb_term(3)) {
        if let Ok(sigma) = unify(&a, &b) {
            prop_assert_eq!(a.apply(&sigma), b.apply(&sigma), "unifier must make terms equal");
        }
        // If unification fails there is no property to check
    }

    /// Symmetry: unify(a, b) succeeds iff unify(b, a) succeeds
    #[test]
    fn unification_symmetry(a in arb_term(3), b in arb_term(3)) {
        let r1 = unify(&a, &b);
        let r2 = unify(&b, &a);
        prop_assert_eq!(r1.is_ok(), r2.is_ok(), "unification should be symmetric");
    }

    /// Occurs check: unify(X, r(...X...)) should always fail
    #[test]
    fn unification_occurs_check(rel_idx in 0..2u8, depth in 1..3u32) {
        let x = Term::var("?x");
        let mut term = x.clone();
        for _ in 0..depth {
            term = Term::predicate(format!("r{}", rel_idx), vec![term]);
        }
        prop_assert!(unify(&x, &term).is_err(), "occurs check should prevent X = r(...X...)");
    }

    /// Identity: unify(t, t) succeeds without changing the term
    #[test]
    fn unification_identity(t in arb_term(3)) {
        let result = unify(&t, &t);
        prop_assert!(result.is_ok(), "term should unify with itself");
        if let Ok(sigma) = result {
            prop_assert_eq!(t.apply(&sigma), t, "identity unifier should not change term");
        }
    }

    /// Empty substitution is identity
    #[test]
    fn substitution_identity(t in arb_term(3)) {
        let empty = Substitution::new();
        prop_assert_eq!(t.apply(&empty), t, "empty substitution should be identity");
    }
}

proptest! {
    // Most `arb_term` samples contain variables, so two ground terms are rare;
    // raise the global-reject tolerance so enough ground pairs are sampled.
    #![proptest_config(ProptestConfig { max_global_rejects: 65536, ..ProptestConfig::default() })]

    /// Ground terms unify only when equal, and with an empty unifier
    #[test]
    fn unification_ground_is_equality(a in arb_term(2), b in arb_term(2)) {
        prop_assume!(a.is_ground() && b.is_ground());
        match unify(&a, &b) {
            Ok(sigma) => {
                prop_assert_eq!(&a, &b);
                prop_assert!(sigma.is_empty());
            }
            Err(_) => prop_assert_ne!(&a, &b),
        }
    }
}
