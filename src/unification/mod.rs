//! Unification for predicate terms
//!
//! The sole source of pattern-matching logic in the engine: the premise
//! solver and the query engine are both built on [`unify_with`].

mod mgu;

#[cfg(test)]
mod proptest_tests;

pub use mgu::{occurs, unify, unify_with, UnificationError, UnificationResult};
