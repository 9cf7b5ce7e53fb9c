//! Terms: constants, variables, and compound predicates/connectives

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A variable, bound within the scope of a single rule application or query.
///
/// The surface syntax reserves a leading `?` for variable names, but the
/// engine treats any `Variable` node as a variable regardless of its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }
}

/// A constant symbol, compared by value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Constant { name: name.into() }
    }
}

/// The head position of a compound term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Functor {
    /// A user-defined relation name
    Relation(String),
    And,
    Or,
    Not,
    Implies,
    Forall,
    Exists,
}

/// A compound term: a functor applied to ordered arguments.
///
/// Quantifier compounds (`Forall`, `Exists`) use the shape
/// `args = [binder_1, .., binder_n, body]`; every argument except the last
/// must be a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compound {
    pub functor: Functor,
    pub args: Vec<Term>,
}

/// A term of the predicate language
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Constant(Constant),
    Variable(Variable),
    Compound(Compound),
}

impl Term {
    /// Create a variable term.
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Create a constant term.
    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(Constant::new(name))
    }

    /// Create a predicate: a relation name applied to arguments.
    pub fn predicate(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Compound(Compound {
            functor: Functor::Relation(name.into()),
            args,
        })
    }

    /// Create a two-operand conjunction.
    pub fn and(lhs: Term, rhs: Term) -> Self {
        Term::Compound(Compound {
            functor: Functor::And,
            args: vec![lhs, rhs],
        })
    }

    /// Create an implication from premises to a conclusion.
    pub fn implies(premises: Term, conclusion: Term) -> Self {
        Term::Compound(Compound {
            functor: Functor::Implies,
            args: vec![premises, conclusion],
        })
    }

    /// Create a universally quantified term.
    pub fn forall(binders: impl IntoIterator<Item = Variable>, body: Term) -> Self {
        Term::Compound(Compound {
            functor: Functor::Forall,
            args: quantifier_args(binders, body),
        })
    }

    /// Create an existentially quantified term.
    pub fn exists(binders: impl IntoIterator<Item = Variable>, body: Term) -> Self {
        Term::Compound(Compound {
            functor: Functor::Exists,
            args: quantifier_args(binders, body),
        })
    }

    /// Check if this term is a predicate (a compound with a relation functor).
    pub fn is_predicate(&self) -> bool {
        matches!(
            self,
            Term::Compound(Compound {
                functor: Functor::Relation(_),
                ..
            })
        )
    }

    /// Check if this term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Constant(_) => true,
            Term::Variable(_) => false,
            Term::Compound(c) => c.args.iter().all(|arg| arg.is_ground()),
        }
    }

    /// Get all variables in this term.
    pub fn variables(&self) -> HashSet<Variable> {
        let mut vars = HashSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    /// Collect all variables in this term.
    pub fn collect_variables(&self, vars: &mut HashSet<Variable>) {
        match self {
            Term::Constant(_) => {}
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Compound(c) => {
                for arg in &c.args {
                    arg.collect_variables(vars);
                }
            }
        }
    }
}

fn quantifier_args(binders: impl IntoIterator<Item = Variable>, body: Term) -> Vec<Term> {
    let mut args: Vec<Term> = binders.into_iter().map(Term::Variable).collect();
    args.push(body);
    args
}

// Display implementations for pretty printing

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(c) => write!(f, "{}", c),
            Term::Variable(v) => write!(f, "{}", v),
            Term::Compound(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.functor {
            Functor::Relation(name) => {
                if self.args.is_empty() {
                    return write!(f, "{}", name);
                }
                write!(f, "{}(", name)?;
                for (i, arg) in self.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Functor::And => write_infix(f, &self.args, " & "),
            Functor::Or => write_infix(f, &self.args, " | "),
            Functor::Not => match self.args.as_slice() {
                [arg] => write!(f, "~{}", arg),
                args => write_infix(f, args, " ~ "),
            },
            Functor::Implies => write_infix(f, &self.args, " -> "),
            Functor::Forall => write_quantified(f, "forall", &self.args),
            Functor::Exists => write_quantified(f, "exists", &self.args),
        }
    }
}

fn write_infix(f: &mut fmt::Formatter<'_>, args: &[Term], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ")")
}

fn write_quantified(f: &mut fmt::Formatter<'_>, keyword: &str, args: &[Term]) -> fmt::Result {
    match args.split_last() {
        Some((body, binders)) => {
            write!(f, "{} ", keyword)?;
            for (i, binder) in binders.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", binder)?;
            }
            write!(f, ": {}", body)
        }
        None => write!(f, "{}:", keyword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_construction() {
        let term = Term::predicate("parent", vec![Term::constant("alice"), Term::var("?x")]);
        match &term {
            Term::Compound(c) => {
                assert_eq!(c.functor, Functor::Relation("parent".to_string()));
                assert_eq!(c.args.len(), 2);
            }
            _ => panic!("Expected compound term"),
        }
        assert!(term.is_predicate());
    }

    #[test]
    fn test_connectives_are_not_predicates() {
        let p = Term::predicate("p", vec![]);
        let q = Term::predicate("q", vec![]);
        assert!(!Term::and(p.clone(), q.clone()).is_predicate());
        assert!(!Term::implies(p, q).is_predicate());
        assert!(!Term::var("?x").is_predicate());
        assert!(!Term::constant("a").is_predicate());
    }

    #[test]
    fn test_ground_check() {
        assert!(Term::constant("a").is_ground());
        assert!(!Term::var("?x").is_ground());

        let ground = Term::predicate("parent", vec![Term::constant("a"), Term::constant("b")]);
        assert!(ground.is_ground());

        let open = Term::predicate("parent", vec![Term::constant("a"), Term::var("?x")]);
        assert!(!open.is_ground());

        let nested = Term::predicate("p", vec![Term::predicate("q", vec![Term::var("?x")])]);
        assert!(!nested.is_ground());
    }

    #[test]
    fn test_variables_collects_all() {
        let term = Term::predicate(
            "triple",
            vec![Term::var("?x"), Term::constant("a"), Term::var("?y")],
        );
        let vars = term.variables();
        assert_eq!(vars.len(), 2);
        assert!(vars.contains(&Variable::new("?x")));
        assert!(vars.contains(&Variable::new("?y")));
    }

    #[test]
    fn test_duplicate_variables_collapse() {
        let term = Term::predicate("p", vec![Term::var("?x"), Term::var("?x")]);
        assert_eq!(term.variables().len(), 1);
    }

    #[test]
    fn test_display_predicate() {
        let term = Term::predicate("parent", vec![Term::constant("alice"), Term::constant("bob")]);
        assert_eq!(term.to_string(), "parent(alice,bob)");
    }

    #[test]
    fn test_display_quantified_implication() {
        let rule = Term::forall(
            vec![Variable::new("?x"), Variable::new("?y")],
            Term::implies(
                Term::predicate("parent", vec![Term::var("?x"), Term::var("?y")]),
                Term::predicate("ancestor", vec![Term::var("?x"), Term::var("?y")]),
            ),
        );
        assert_eq!(
            rule.to_string(),
            "forall ?x,?y: (parent(?x,?y) -> ancestor(?x,?y))"
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = Term::predicate("p", vec![Term::constant("a")]);
        let b = Term::predicate("p", vec![Term::constant("a")]);
        let c = Term::predicate("p", vec![Term::constant("b")]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
