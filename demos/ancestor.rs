//! Parse a small textual knowledge base, run it to fixpoint, and query it.

use factforge::{parse_facts_block, parse_query, parse_rules_block, KnowledgeBase};

const FACTS: &str = "\
parent(alice,bob)
parent(bob,carol)
parent(carol,dana)";

const RULES: &str = "\
forall x,y: parent(x,y) -> ancestor(x,y)
forall x,y,z: parent(x,y) & ancestor(y,z) -> ancestor(x,z)
forall x,y: ancestor(x,y) -> connected(x,y)";

const QUERY: &str = "ancestor(?who, dana)";

fn main() {
    let facts = parse_facts_block(FACTS).expect("Failed to parse facts");
    let rules = parse_rules_block(RULES).expect("Failed to parse rules");
    let given = facts.clone();

    let mut kb = KnowledgeBase::with(facts, rules).expect("Failed to build knowledge base");
    let outcome = kb.forward_chain();
    println!("Forward chaining stopped: {:?}", outcome);

    println!("\n=== FACTS ({} total) ===", kb.fact_count());
    for fact in kb.facts() {
        let source = if given.contains(fact) { "given" } else { "derived" };
        println!("{:8} {}", source, fact);
    }

    println!("\n=== RULES ===");
    for rule in kb.rules() {
        println!("{}", rule);
    }

    let query = parse_query(QUERY).expect("Failed to parse query");
    println!("\n=== QUERY {} ===", query);
    let answers = kb.query(&query);
    if answers.is_empty() {
        println!("no matches");
    } else {
        for answer in &answers {
            println!("{}", answer);
        }
    }
}
