//! Integration tests for the forward-chaining engine

use factforge::{
    ChainConfig, ChainOutcome, KnowledgeBase, Rule, Term, ValidationError, Variable,
};

fn parent(a: &str, b: &str) -> Term {
    Term::predicate("parent", vec![Term::constant(a), Term::constant(b)])
}

fn ancestor(a: &str, b: &str) -> Term {
    Term::predicate("ancestor", vec![Term::constant(a), Term::constant(b)])
}

fn ancestor_kb() -> KnowledgeBase {
    KnowledgeBase::with(
        vec![parent("alice", "bob"), parent("bob", "carol")],
        vec![
            Term::forall(
                vec![Variable::new("?x"), Variable::new("?y")],
                Term::implies(
                    Term::predicate("parent", vec![Term::var("?x"), Term::var("?y")]),
                    Term::predicate("ancestor", vec![Term::var("?x"), Term::var("?y")]),
                ),
            ),
            Term::forall(
                vec![
                    Variable::new("?x"),
                    Variable::new("?y"),
                    Variable::new("?z"),
                ],
                Term::implies(
                    Term::and(
                        Term::predicate("parent", vec![Term::var("?x"), Term::var("?y")]),
                        Term::predicate("ancestor", vec![Term::var("?y"), Term::var("?z")]),
                    ),
                    Term::predicate("ancestor", vec![Term::var("?x"), Term::var("?z")]),
                ),
            ),
        ],
    )
    .expect("valid knowledge base")
}

#[test]
fn test_ancestor_fixpoint_content() {
    let mut kb = ancestor_kb();
    let outcome = kb.forward_chain();
    assert!(outcome.is_fixpoint());

    let expected = vec![
        parent("alice", "bob"),
        parent("bob", "carol"),
        ancestor("alice", "bob"),
        ancestor("bob", "carol"),
        ancestor("alice", "carol"),
    ];
    assert_eq!(kb.fact_count(), expected.len());
    for fact in &expected {
        assert!(kb.contains_fact(fact), "missing {}", fact);
    }

    // A second run must add nothing
    let outcome = kb.forward_chain();
    assert_eq!(outcome.facts_added(), 0);
    assert_eq!(kb.fact_count(), expected.len());
}

#[test]
fn test_query_bindings() {
    let mut kb = ancestor_kb();
    kb.forward_chain();

    let pattern = Term::predicate("ancestor", vec![Term::var("?who"), Term::constant("carol")]);
    let answers = kb.query(&pattern);

    let mut who: Vec<String> = answers
        .iter()
        .map(|subst| subst.get("?who").expect("bound").to_string())
        .collect();
    who.sort();
    assert_eq!(who, vec!["alice", "bob"]);
}

#[test]
fn test_monotonicity_across_runs() {
    let mut kb = ancestor_kb();
    let mut previous: Vec<Term> = kb.facts().cloned().collect();
    for _ in 0..3 {
        kb.forward_chain();
        for fact in &previous {
            assert!(kb.contains_fact(fact));
        }
        previous = kb.facts().cloned().collect();
    }
}

#[test]
fn test_ground_invariant_holds_throughout() {
    let mut kb = ancestor_kb();
    assert!(kb.facts().all(Term::is_ground));
    kb.forward_chain();
    assert!(kb.facts().all(Term::is_ground));
}

#[test]
fn test_malformed_fact_leaves_store_unchanged() {
    let mut kb = ancestor_kb();
    let before = kb.fact_count();
    let open = Term::predicate("parent", vec![Term::var("?x"), Term::constant("bob")]);
    assert!(matches!(
        kb.add_fact(open),
        Err(ValidationError::NotGround(_))
    ));
    assert_eq!(kb.fact_count(), before);
}

#[test]
fn test_existential_conclusion_skolemizes_once() {
    let rule = Rule::new(
        vec![Variable::new("?x")],
        vec![Term::predicate("person", vec![Term::var("?x")])],
        Term::exists(
            vec![Variable::new("?z")],
            Term::predicate("mother", vec![Term::var("?z"), Term::var("?x")]),
        ),
    );
    let mut kb = KnowledgeBase::with(
        vec![Term::predicate("person", vec![Term::constant("seth")])],
        vec![rule],
    )
    .expect("valid knowledge base");

    kb.forward_chain();
    kb.forward_chain();

    let pattern = Term::predicate("mother", vec![Term::var("?z"), Term::constant("seth")]);
    assert_eq!(kb.query(&pattern).len(), 1);
}

#[test]
fn test_budget_reports_ongoing_growth() {
    let grow = Rule::new(
        vec![Variable::new("?x")],
        vec![Term::predicate("node", vec![Term::var("?x")])],
        Term::exists(
            vec![Variable::new("?y")],
            Term::predicate("edge", vec![Term::var("?x"), Term::var("?y")]),
        ),
    );
    let spread = Rule::new(
        vec![Variable::new("?x"), Variable::new("?y")],
        vec![Term::predicate(
            "edge",
            vec![Term::var("?x"), Term::var("?y")],
        )],
        Term::predicate("node", vec![Term::var("?y")]),
    );
    let mut kb = KnowledgeBase::with(
        vec![Term::predicate("node", vec![Term::constant("root")])],
        vec![grow, spread],
    )
    .expect("valid knowledge base");

    let outcome = kb.forward_chain_with(ChainConfig { max_iterations: 3 });
    match outcome {
        ChainOutcome::BudgetExhausted {
            iterations,
            facts_added,
        } => {
            assert_eq!(iterations, 3);
            assert!(facts_added > 0);
        }
        other => panic!("Expected budget exhaustion, got {:?}", other),
    }

    // The caller can decide to continue with a fresh budget
    let more = kb.forward_chain_with(ChainConfig { max_iterations: 3 });
    assert!(more.facts_added() > 0);
}

#[test]
fn test_propositional_rules_as_zero_arity_predicates() {
    // Modus ponens falls out of the general engine: p, p -> q |- q
    let mut kb = KnowledgeBase::with(
        vec![Term::predicate("rain", vec![])],
        vec![Term::forall(
            vec![Variable::new("?unused")],
            Term::implies(
                Term::predicate("rain", vec![]),
                Term::predicate("wet_streets", vec![]),
            ),
        )],
    )
    .expect("valid knowledge base");

    kb.forward_chain();
    assert!(kb.contains_fact(&Term::predicate("wet_streets", vec![])));
}

#[test]
fn test_facts_and_rules_serialize() {
    let mut kb = ancestor_kb();
    kb.forward_chain();

    let facts: Vec<Term> = kb.facts().cloned().collect();
    let json = serde_json::to_string(&facts).expect("facts serialize");
    let back: Vec<Term> = serde_json::from_str(&json).expect("facts deserialize");
    assert_eq!(facts, back);

    let rules_json = serde_json::to_string(kb.rules()).expect("rules serialize");
    assert!(rules_json.contains("ancestor"));
}
