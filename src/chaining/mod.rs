//! The knowledge base and its forward-chaining machinery
//!
//! A [`KnowledgeBase`] owns a deduplicated, insertion-ordered set of ground
//! facts, an ordered list of rules, and the Skolem-constant counter. The
//! driver in [`chain`] derives facts level by level: each iteration matches
//! every rule's premises against the facts known at iteration entry, so
//! derivations become visible to premise matching only on the next pass.
//! Iteration stops at a fixpoint or at the configured budget.

mod chain;
mod kb;
mod skolem;
mod solve;

pub use chain::{ChainConfig, ChainOutcome};
pub use kb::{KnowledgeBase, ValidationError};
pub use solve::Solutions;
