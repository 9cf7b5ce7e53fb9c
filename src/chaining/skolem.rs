//! Skolemization of existential conclusions

use crate::fol::{Substitution, Term, Variable};

/// Mint the next Skolem constant (`_sk1`, `_sk2`, ..) from a counter.
pub(crate) fn fresh_constant(counter: &mut usize) -> Term {
    *counter += 1;
    Term::constant(format!("_sk{}", counter))
}

/// Replace each existential binder in `body` with a fresh Skolem constant.
pub(crate) fn instantiate(binders: &[Variable], body: &Term, counter: &mut usize) -> Term {
    let mut subst = Substitution::new();
    for binder in binders {
        subst.insert(binder.name.clone(), fresh_constant(counter));
    }
    body.apply(&subst)
}
