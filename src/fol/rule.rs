//! Rules: universally quantified implications

use super::term::{Term, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A universally quantified implication.
///
/// Premises are predicate patterns over the rule's variables; the conclusion
/// is a predicate pattern or an existential quantification wrapping one.
/// Variable scope is local to one rule application; no bindings are shared
/// across rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub variables: Vec<Variable>,
    pub premises: Vec<Term>,
    pub conclusion: Term,
}

impl Rule {
    /// Create a rule from its parts.
    pub fn new(
        variables: impl IntoIterator<Item = Variable>,
        premises: Vec<Term>,
        conclusion: Term,
    ) -> Self {
        Rule {
            variables: variables.into_iter().collect(),
            premises,
            conclusion,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "forall ")?;
        for (i, var) in self.variables.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", var)?;
        }
        write!(f, ": ")?;
        for (i, premise) in self.premises.iter().enumerate() {
            if i > 0 {
                write!(f, " & ")?;
            }
            write!(f, "{}", premise)?;
        }
        write!(f, " -> {}", self.conclusion)
    }
}

/// Input accepted by `KnowledgeBase::add_rule`: either an already-structured
/// rule or a raw `forall(binders.., implies(premises, conclusion))` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleExpr {
    Structured(Rule),
    Quantified(Term),
}

impl From<Rule> for RuleExpr {
    fn from(rule: Rule) -> Self {
        RuleExpr::Structured(rule)
    }
}

impl From<Term> for RuleExpr {
    fn from(expr: Term) -> Self {
        RuleExpr::Quantified(expr)
    }
}
