//! The forward-chaining driver

use super::kb::KnowledgeBase;
use super::skolem;
use super::solve::Solutions;
use crate::fol::{Functor, Term, Variable};

/// Budget for a forward-chaining run
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Iteration ceiling guarding against rule sets with no finite fixpoint
    pub max_iterations: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig { max_iterations: 50 }
    }
}

/// How a forward-chaining run stopped.
///
/// Hitting the budget is a defined stopping condition, not an error;
/// callers can re-run with a larger budget if facts were still being
/// derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    /// An iteration derived nothing new
    Fixpoint {
        iterations: usize,
        facts_added: usize,
    },
    /// The iteration budget ran out while facts were still appearing
    BudgetExhausted {
        iterations: usize,
        facts_added: usize,
    },
}

impl ChainOutcome {
    /// Total facts added over the whole run.
    pub fn facts_added(&self) -> usize {
        match self {
            ChainOutcome::Fixpoint { facts_added, .. }
            | ChainOutcome::BudgetExhausted { facts_added, .. } => *facts_added,
        }
    }

    /// Whether the run ended because nothing new could be derived.
    pub fn is_fixpoint(&self) -> bool {
        matches!(self, ChainOutcome::Fixpoint { .. })
    }
}

impl KnowledgeBase {
    /// Run the rules to a fixpoint under the default budget.
    pub fn forward_chain(&mut self) -> ChainOutcome {
        self.forward_chain_with(ChainConfig::default())
    }

    /// Derive facts level by level until a fixpoint or the budget.
    ///
    /// Each iteration matches every rule's premises against the facts known
    /// at iteration entry; derivations become visible to premise matching
    /// only on the next pass. The fixpoint content is the same either way,
    /// since derivation only ever adds facts, but the level order keeps
    /// runs deterministic.
    pub fn forward_chain_with(&mut self, config: ChainConfig) -> ChainOutcome {
        let rules = self.rules.clone();
        let mut total_added = 0;

        for iteration in 1..=config.max_iterations {
            let snapshot: Vec<Term> = self.facts.iter().cloned().collect();
            let mut added_this_round = 0;

            for rule in &rules {
                for theta in Solutions::new(&rule.premises, &snapshot) {
                    let conclusion = rule.conclusion.apply(&theta);
                    let fact = match split_exists(&conclusion) {
                        Some((binders, body)) => {
                            // An existing instance already satisfies the
                            // pattern; minting another Skolem constant for
                            // it would grow the fact set without bound.
                            if !self.query(body).is_empty() {
                                continue;
                            }
                            skolem::instantiate(&binders, body, &mut self.skolem_counter)
                        }
                        None => conclusion,
                    };
                    // Conclusions with variables the premises don't cover
                    // never become facts; skip them rather than fail.
                    if !fact.is_predicate() || !fact.is_ground() {
                        continue;
                    }
                    if let Ok(true) = self.add_fact(fact) {
                        added_this_round += 1;
                    }
                }
            }

            total_added += added_this_round;
            if added_this_round == 0 {
                return ChainOutcome::Fixpoint {
                    iterations: iteration,
                    facts_added: total_added,
                };
            }
        }

        ChainOutcome::BudgetExhausted {
            iterations: config.max_iterations,
            facts_added: total_added,
        }
    }
}

/// View an existential conclusion as binders and body.
///
/// Returns `None` for plain conclusions and for quantifiers whose binder
/// positions are no longer variables (a premise binding shadowed them); the
/// driver skips those derivations.
fn split_exists(term: &Term) -> Option<(Vec<Variable>, &Term)> {
    let compound = match term {
        Term::Compound(c) if c.functor == Functor::Exists => c,
        _ => return None,
    };
    let (body, binders) = compound.args.split_last()?;
    let mut variables = Vec::with_capacity(binders.len());
    for binder in binders {
        match binder {
            Term::Variable(v) => variables.push(v.clone()),
            _ => return None,
        }
    }
    Some((variables, body))
}
