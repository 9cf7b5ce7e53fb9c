//! The knowledge base store: ground facts and rules

use crate::fol::{Compound, Functor, Rule, RuleExpr, Substitution, Term, Variable};
use crate::unification::unify;
use indexmap::IndexSet;
use std::fmt;

/// Rejected input to [`KnowledgeBase::add_fact`] or [`KnowledgeBase::add_rule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Facts must be predicates
    NotAPredicate(Term),
    /// Facts must contain no variables
    NotGround(Term),
    /// Raw rule expressions must be universally quantified
    NotQuantified(Term),
    /// Quantifier binders must all be variables
    BadBinder(Term),
    /// A quantifier needs at least a body argument
    EmptyQuantifier,
    /// The quantifier body must be an implication of premises and conclusion
    NotAnImplication(Term),
    /// Premises must be predicates
    BadPremise(Term),
    /// Conjunctions in premise position take exactly two operands
    UnbalancedConjunction(usize),
    /// The conclusion must be a predicate or an existential wrapping one
    BadConclusion(Term),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAPredicate(term) => {
                write!(f, "facts must be predicates, got {}", term)
            }
            ValidationError::NotGround(term) => {
                write!(f, "facts must be ground (no free variables), got {}", term)
            }
            ValidationError::NotQuantified(term) => write!(
                f,
                "rules must be encoded as forall(vars.., implies(premises, conclusion)), got {}",
                term
            ),
            ValidationError::BadBinder(term) => {
                write!(f, "quantifier binders must be variables, got {}", term)
            }
            ValidationError::EmptyQuantifier => {
                write!(f, "quantifier needs at least a body argument")
            }
            ValidationError::NotAnImplication(term) => write!(
                f,
                "rule body must be an implication of premises and conclusion, got {}",
                term
            ),
            ValidationError::BadPremise(term) => {
                write!(f, "premises must be predicates, got {}", term)
            }
            ValidationError::UnbalancedConjunction(arity) => write!(
                f,
                "conjunctions in premise position take exactly two operands, got {}",
                arity
            ),
            ValidationError::BadConclusion(term) => write!(
                f,
                "conclusion must be a predicate or an existential wrapping one, got {}",
                term
            ),
        }
    }
}

/// The knowledge base: a deduplicated, insertion-ordered set of ground
/// facts, an ordered list of rules, and the Skolem-constant counter.
///
/// Facts accumulate monotonically; nothing is ever retracted. The counter
/// is instance state, so independent knowledge bases mint independent
/// Skolem constants.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub(crate) facts: IndexSet<Term>,
    pub(crate) rules: Vec<Rule>,
    pub(crate) skolem_counter: usize,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    /// Build a knowledge base from initial facts and rules.
    pub fn with<F, R, E>(facts: F, rules: R) -> Result<Self, ValidationError>
    where
        F: IntoIterator<Item = Term>,
        R: IntoIterator<Item = E>,
        E: Into<RuleExpr>,
    {
        let mut kb = KnowledgeBase::new();
        for fact in facts {
            kb.add_fact(fact)?;
        }
        for rule in rules {
            kb.add_rule(rule)?;
        }
        Ok(kb)
    }

    /// Insert a ground fact.
    ///
    /// Returns `Ok(true)` if the fact was newly inserted and `Ok(false)` if
    /// it was already present. On a validation failure the store is
    /// untouched.
    pub fn add_fact(&mut self, fact: Term) -> Result<bool, ValidationError> {
        if !fact.is_predicate() {
            return Err(ValidationError::NotAPredicate(fact));
        }
        if !fact.is_ground() {
            return Err(ValidationError::NotGround(fact));
        }
        Ok(self.facts.insert(fact))
    }

    /// Append a rule.
    ///
    /// Accepts an already-structured [`Rule`] or a raw
    /// `forall(binders.., implies(premises, conclusion))` term. Identical
    /// rules may coexist; they cost redundant derivation work, not
    /// correctness.
    pub fn add_rule(&mut self, rule: impl Into<RuleExpr>) -> Result<(), ValidationError> {
        let rule = match rule.into() {
            RuleExpr::Structured(rule) => rule,
            RuleExpr::Quantified(expr) => parse_rule_expr(expr)?,
        };
        validate_rule(&rule)?;
        self.rules.push(rule);
        Ok(())
    }

    /// All substitutions under which the pattern matches a current fact.
    ///
    /// One substitution per matching fact, in fact insertion order, with no
    /// deduplication.
    pub fn query(&self, pattern: &Term) -> Vec<Substitution> {
        self.facts
            .iter()
            .filter_map(|fact| unify(pattern, fact).ok())
            .collect()
    }

    /// The current facts, in insertion order.
    pub fn facts(&self) -> impl Iterator<Item = &Term> {
        self.facts.iter()
    }

    /// Number of facts currently stored.
    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    /// Check whether a fact is currently stored.
    pub fn contains_fact(&self, fact: &Term) -> bool {
        self.facts.contains(fact)
    }

    /// The current rules, in insertion order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Parse a raw `forall(binders.., implies(premises, conclusion))` term.
fn parse_rule_expr(expr: Term) -> Result<Rule, ValidationError> {
    let compound = match expr {
        Term::Compound(c) if c.functor == Functor::Forall => c,
        other => return Err(ValidationError::NotQuantified(other)),
    };
    let (binders, body) = split_quantifier(compound)?;

    let implies = match body {
        Term::Compound(c) if c.functor == Functor::Implies => c,
        other => return Err(ValidationError::NotAnImplication(other)),
    };
    let [raw_premises, conclusion]: [Term; 2] = match implies.args.try_into() {
        Ok(args) => args,
        Err(args) => {
            return Err(ValidationError::NotAnImplication(Term::Compound(Compound {
                functor: Functor::Implies,
                args,
            })))
        }
    };

    Ok(Rule {
        variables: binders,
        premises: normalize_premises(raw_premises)?,
        conclusion,
    })
}

/// Split a quantifier compound into binders and body.
fn split_quantifier(compound: Compound) -> Result<(Vec<Variable>, Term), ValidationError> {
    let mut args = compound.args;
    let body = args.pop().ok_or(ValidationError::EmptyQuantifier)?;
    let mut binders = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Term::Variable(v) => binders.push(v),
            other => return Err(ValidationError::BadBinder(other)),
        }
    }
    Ok((binders, body))
}

/// Flatten the premise position into an ordered predicate sequence.
///
/// A single predicate stands for itself; an `and` chain of two operands is
/// flattened recursively. (The third accepted form, an explicit list, only
/// exists on the structured [`Rule`] constructor.)
fn normalize_premises(raw: Term) -> Result<Vec<Term>, ValidationError> {
    let mut premises = Vec::new();
    flatten_conjunction(raw, &mut premises)?;
    Ok(premises)
}

fn flatten_conjunction(term: Term, out: &mut Vec<Term>) -> Result<(), ValidationError> {
    match term {
        Term::Compound(c) if c.functor == Functor::And => {
            if c.args.len() != 2 {
                return Err(ValidationError::UnbalancedConjunction(c.args.len()));
            }
            for operand in c.args {
                flatten_conjunction(operand, out)?;
            }
            Ok(())
        }
        predicate if predicate.is_predicate() => {
            out.push(predicate);
            Ok(())
        }
        other => Err(ValidationError::BadPremise(other)),
    }
}

/// Check the shape invariants of a rule before it enters the store.
fn validate_rule(rule: &Rule) -> Result<(), ValidationError> {
    for premise in &rule.premises {
        if !premise.is_predicate() {
            return Err(ValidationError::BadPremise(premise.clone()));
        }
    }
    if rule.conclusion.is_predicate() {
        return Ok(());
    }
    match &rule.conclusion {
        Term::Compound(c) if c.functor == Functor::Exists => {
            let (body, binders) = c
                .args
                .split_last()
                .ok_or(ValidationError::EmptyQuantifier)?;
            for binder in binders {
                if !matches!(binder, Term::Variable(_)) {
                    return Err(ValidationError::BadBinder(binder.clone()));
                }
            }
            if !body.is_predicate() {
                return Err(ValidationError::BadConclusion(body.clone()));
            }
            Ok(())
        }
        other => Err(ValidationError::BadConclusion(other.clone())),
    }
}
