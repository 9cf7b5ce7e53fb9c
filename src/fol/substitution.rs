//! Variable substitutions

use super::term::{Compound, Term};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A substitution mapping variable names to terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    map: HashMap<String, Term>,
}

impl Substitution {
    /// Create a new empty substitution
    pub fn new() -> Self {
        Substitution {
            map: HashMap::new(),
        }
    }

    /// Add a variable name -> term mapping
    pub fn insert(&mut self, name: impl Into<String>, term: Term) {
        self.map.insert(name.into(), term);
    }

    /// Add a mapping with eager substitution propagation.
    ///
    /// The new right-hand side is resolved against the current map first,
    /// and the new binding is then folded into every existing right-hand
    /// side. This keeps every stored term fully resolved, so applying the
    /// substitution once is enough: there are no binding chains to chase.
    pub fn insert_normalized(&mut self, name: impl Into<String>, term: Term) {
        let name = name.into();
        let resolved = term.apply(self);

        let mut single = Substitution::new();
        single.insert(name.clone(), resolved.clone());
        for value in self.map.values_mut() {
            *value = value.apply(&single);
        }

        self.map.insert(name, resolved);
    }

    /// Get the term a variable name is bound to, if any
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.map.get(name)
    }

    /// Check if a variable name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if this substitution has no bindings
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over the bindings
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.map.iter().map(|(name, term)| (name.as_str(), term))
    }
}

impl Term {
    /// Apply a substitution to this term.
    ///
    /// A bound variable is replaced by its binding with a single lookup;
    /// constants and compound functors are never rewritten.
    pub fn apply(&self, subst: &Substitution) -> Term {
        match self {
            Term::Variable(v) => subst
                .get(&v.name)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Term::Constant(_) => self.clone(),
            Term::Compound(c) => Term::Compound(Compound {
                functor: c.functor.clone(),
                args: c.args.iter().map(|arg| arg.apply(subst)).collect(),
            }),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.map.keys().map(String::as_str).collect();
        names.sort_unstable();
        write!(f, "{{")?;
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", name, self.map[*name])?;
        }
        write!(f, "}}")
    }
}
