//! Most general unifier computation over an accumulated substitution

use crate::fol::{Constant, Functor, Substitution, Term, Variable};

/// Result of a unification attempt
pub type UnificationResult = Result<Substitution, UnificationError>;

/// Why two terms failed to unify.
///
/// Unification failure is ordinary control flow during premise search and
/// queries, not an error condition; the variants exist so callers that care
/// can tell the mismatches apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnificationError {
    /// Occurs check failed - the variable occurs in its own binding
    OccursCheck(Variable, Term),
    /// Compound functors don't match
    FunctorClash(Functor, Functor),
    /// Arities don't match
    ArityMismatch(usize, usize),
    /// Constant symbols don't match
    ConstantClash(Constant, Constant),
    /// Constant against compound
    ConstantCompoundClash(Constant, Functor),
}

/// Unify two terms from the empty substitution.
pub fn unify(a: &Term, b: &Term) -> UnificationResult {
    unify_with(a, b, &Substitution::new())
}

/// Extend `subst` so that both terms become equal under it.
///
/// The caller's substitution is never mutated: the extension is built on a
/// clone and returned, so a failed attempt leaves no partial bindings
/// observable anywhere.
pub fn unify_with(a: &Term, b: &Term, subst: &Substitution) -> UnificationResult {
    let mut extended = subst.clone();
    unify_terms(a, b, &mut extended)?;
    Ok(extended)
}

fn unify_terms(a: &Term, b: &Term, subst: &mut Substitution) -> Result<(), UnificationError> {
    // Resolve each side one level through the substitution
    let a = resolve(a, subst);
    let b = resolve(b, subst);

    if a == b {
        return Ok(());
    }

    match (&a, &b) {
        (Term::Variable(v), other) | (other, Term::Variable(v)) => bind(v, other, subst),

        (Term::Compound(ca), Term::Compound(cb)) => {
            if ca.functor != cb.functor {
                return Err(UnificationError::FunctorClash(
                    ca.functor.clone(),
                    cb.functor.clone(),
                ));
            }
            if ca.args.len() != cb.args.len() {
                return Err(UnificationError::ArityMismatch(ca.args.len(), cb.args.len()));
            }
            // Unify arguments pairwise, threading the substitution
            for (x, y) in ca.args.iter().zip(cb.args.iter()) {
                unify_terms(x, y, subst)?;
            }
            Ok(())
        }

        (Term::Constant(c1), Term::Constant(c2)) => {
            Err(UnificationError::ConstantClash(c1.clone(), c2.clone()))
        }

        (Term::Constant(c), Term::Compound(cc)) | (Term::Compound(cc), Term::Constant(c)) => Err(
            UnificationError::ConstantCompoundClash(c.clone(), cc.functor.clone()),
        ),
    }
}

/// Bind a variable, honoring existing bindings and the occurs check.
fn bind(var: &Variable, term: &Term, subst: &mut Substitution) -> Result<(), UnificationError> {
    // An already-bound variable is never rebound; its value is unified
    // against the other term instead.
    if let Some(existing) = subst.get(&var.name).cloned() {
        return unify_terms(&existing, term, subst);
    }
    if let Term::Variable(other) = term {
        if let Some(existing) = subst.get(&other.name).cloned() {
            return unify_terms(&Term::Variable(var.clone()), &existing, subst);
        }
    }
    if occurs(&var.name, term, subst) {
        return Err(UnificationError::OccursCheck(var.clone(), term.clone()));
    }
    subst.insert_normalized(var.name.clone(), term.clone());
    Ok(())
}

/// Would binding `name` to `term` create a self-referential structure?
///
/// Follows existing bindings in `subst` through variable chains.
pub fn occurs(name: &str, term: &Term, subst: &Substitution) -> bool {
    match term {
        Term::Variable(v) => {
            if v.name == name {
                return true;
            }
            match subst.get(&v.name) {
                Some(bound) => occurs(name, bound, subst),
                None => false,
            }
        }
        Term::Constant(_) => false,
        Term::Compound(c) => c.args.iter().any(|arg| occurs(name, arg, subst)),
    }
}

fn resolve(term: &Term, subst: &Substitution) -> Term {
    if let Term::Variable(v) = term {
        if let Some(bound) = subst.get(&v.name) {
            return bound.clone();
        }
    }
    term.clone()
}
