//! factforge: a forward-chaining rule engine over first-order predicates
//!
//! This library stores ground facts and universally/existentially quantified
//! implication rules, derives new ground facts by matching rule premises
//! against the fact store via unification, and answers pattern queries
//! against the resulting fact set.

pub mod chaining;
pub mod fol;
pub mod parser;
pub mod unification;

// Re-export commonly used types from fol
pub use fol::{Compound, Constant, Functor, Rule, RuleExpr, Substitution, Term, Variable};

// Re-export the knowledge base and driver types
pub use chaining::{ChainConfig, ChainOutcome, KnowledgeBase, Solutions, ValidationError};

pub use unification::{unify, unify_with, UnificationError, UnificationResult};

pub use parser::{
    parse_fact, parse_facts_block, parse_query, parse_rule, parse_rules_block,
};
