//! Backtracking search over a rule's premise sequence

use crate::fol::{Substitution, Term};
use crate::unification::unify_with;

/// Lazily enumerates every substitution satisfying a premise sequence
/// against a snapshot of the fact set.
///
/// The search is depth-first over premises, trying facts in snapshot order
/// at each step. Each frame owns its partial substitution, so sibling
/// branches cannot observe bindings from an abandoned branch. The iterator
/// is finite and callers may stop after any number of solutions.
pub struct Solutions<'a> {
    premises: &'a [Term],
    facts: &'a [Term],
    stack: Vec<Frame>,
}

struct Frame {
    /// Index of the premise this frame is matching
    premise: usize,
    /// Next candidate position in the fact snapshot
    next_fact: usize,
    /// Bindings accumulated before this premise
    subst: Substitution,
}

impl<'a> Solutions<'a> {
    /// Start a search over `premises` against the `facts` snapshot.
    pub fn new(premises: &'a [Term], facts: &'a [Term]) -> Self {
        Solutions {
            premises,
            facts,
            stack: vec![Frame {
                premise: 0,
                next_fact: 0,
                subst: Substitution::new(),
            }],
        }
    }
}

impl Iterator for Solutions<'_> {
    type Item = Substitution;

    fn next(&mut self) -> Option<Substitution> {
        loop {
            let top = self.stack.last_mut()?;

            if top.premise == self.premises.len() {
                // Every premise matched: yield this branch and backtrack
                return self.stack.pop().map(|frame| frame.subst);
            }

            let goal = self.premises[top.premise].apply(&top.subst);
            let mut extended = None;
            while top.next_fact < self.facts.len() {
                let fact = &self.facts[top.next_fact];
                top.next_fact += 1;
                if let Ok(subst) = unify_with(&goal, fact, &top.subst) {
                    extended = Some(subst);
                    break;
                }
            }

            let next_premise = top.premise + 1;
            match extended {
                Some(subst) => self.stack.push(Frame {
                    premise: next_premise,
                    next_fact: 0,
                    subst,
                }),
                // No remaining fact matches this premise: backtrack
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
