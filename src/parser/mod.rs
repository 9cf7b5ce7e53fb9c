//! Textual surface syntax for facts, rules, and query patterns
//!
//! A pure, stateless translation layer feeding the knowledge-base API:
//!
//! - facts: `parent(alice,bob)`, one per line
//! - rules: `forall x,y: parent(x,y) & ancestor(y,z) -> ancestor(x,z)`
//! - queries: `ancestor(?who, carol)`
//!
//! Inside rules, the quantified names and `?`-prefixed tokens become
//! variables; every other argument is a lowercased constant. Parsing never
//! touches a knowledge base.

use crate::fol::{Term, Variable};
use nom::{
    character::complete::{char, multispace0},
    combinator::opt,
    multi::separated_list0,
    sequence::{delimited, preceded},
    IResult,
};

/// A predicate token before variable resolution
struct RawAtom<'a> {
    name: &'a str,
    args: Vec<RawArg<'a>>,
}

/// One argument token: `?name` or a bare symbol
enum RawArg<'a> {
    Variable(&'a str),
    Symbol(&'a str),
}

/// Parse one fact line: a predicate over constant arguments.
///
/// Argument symbols are lowercased. A `?`-prefixed argument still parses;
/// it becomes a variable term, which `add_fact` then rejects as non-ground.
pub fn parse_fact(line: &str) -> Result<Term, String> {
    let atom = full_atom(line).map_err(|_| format!("could not parse fact: {}", line.trim()))?;
    Ok(resolve_atom(atom, &[]))
}

/// Parse a query pattern: a predicate where `?`-prefixed arguments are
/// variables.
pub fn parse_query(line: &str) -> Result<Term, String> {
    let atom = full_atom(line).map_err(|_| format!("could not parse query: {}", line.trim()))?;
    Ok(resolve_atom(atom, &[]))
}

/// Parse one rule line into the raw quantified term accepted by
/// `KnowledgeBase::add_rule`.
///
/// Shape: `forall x,y: premise & premise -> conclusion`.
pub fn parse_rule(line: &str) -> Result<Term, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err("rule line is empty".to_string());
    }
    if !trimmed.to_lowercase().starts_with("forall") {
        return Err(format!("rules must start with 'forall': {}", trimmed));
    }
    let rest = &trimmed["forall".len()..];

    let (quantifier, body) = rest
        .split_once(':')
        .ok_or_else(|| format!("rule must contain ':' after the quantifier: {}", trimmed))?;
    let binders: Vec<&str> = quantifier
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if binders.is_empty() {
        return Err(format!("quantifier must list at least one variable: {}", trimmed));
    }

    let (premise_text, conclusion_text) = body
        .split_once("->")
        .ok_or_else(|| format!("rule body must use '->' before the conclusion: {}", trimmed))?;
    let premise_tokens: Vec<&str> = premise_text
        .split('&')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .collect();
    if premise_tokens.is_empty() {
        return Err(format!("rule must contain at least one premise: {}", trimmed));
    }

    let mut premises = Vec::with_capacity(premise_tokens.len());
    for token in premise_tokens {
        let atom =
            full_atom(token).map_err(|_| format!("could not parse premise: {}", token))?;
        premises.push(resolve_atom(atom, &binders));
    }
    let conclusion_atom = full_atom(conclusion_text)
        .map_err(|_| format!("could not parse conclusion: {}", conclusion_text.trim()))?;
    let conclusion = resolve_atom(conclusion_atom, &binders);

    // Premises fold into a right-nested two-operand conjunction chain
    let premise_term = premises
        .into_iter()
        .rev()
        .reduce(|rhs, lhs| Term::and(lhs, rhs));
    let premise_term = match premise_term {
        Some(term) => term,
        None => return Err(format!("rule must contain at least one premise: {}", trimmed)),
    };

    let variables = binders
        .iter()
        .map(|name| Variable::new(format!("?{}", name)));
    Ok(Term::forall(
        variables,
        Term::implies(premise_term, conclusion),
    ))
}

/// Parse a block of fact lines, skipping blank ones.
pub fn parse_facts_block(text: &str) -> Result<Vec<Term>, String> {
    non_blank_lines(text).map(parse_fact).collect()
}

/// Parse a block of rule lines, skipping blank ones.
pub fn parse_rules_block(text: &str) -> Result<Vec<Term>, String> {
    non_blank_lines(text).map(parse_rule).collect()
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Turn a raw atom into a term, treating binder occurrences as variables.
fn resolve_atom(atom: RawAtom<'_>, binders: &[&str]) -> Term {
    let args = atom
        .args
        .into_iter()
        .map(|arg| match arg {
            RawArg::Variable(name) => Term::var(format!("?{}", name)),
            RawArg::Symbol(name) if binders.contains(&name) => Term::var(format!("?{}", name)),
            RawArg::Symbol(name) => Term::constant(name.to_lowercase()),
        })
        .collect();
    Term::predicate(atom.name, args)
}

/// Parse an atom that must span the whole input.
fn full_atom(input: &str) -> Result<RawAtom<'_>, nom::Err<nom::error::Error<&str>>> {
    let (rest, atom) = delimited(multispace0, parse_atom, multispace0)(input)?;
    if rest.is_empty() {
        Ok(atom)
    } else {
        Err(nom::Err::Error(nom::error::Error::new(
            rest,
            nom::error::ErrorKind::Eof,
        )))
    }
}

/// Parse `name(arg, arg, ..)`
fn parse_atom(input: &str) -> IResult<&str, RawAtom<'_>> {
    let (input, name) = parse_identifier(input)?;
    let (input, args) = delimited(
        preceded(multispace0, char('(')),
        separated_list0(preceded(multispace0, char(',')), parse_arg),
        preceded(multispace0, char(')')),
    )(input)?;
    Ok((input, RawAtom { name, args }))
}

/// Parse one argument: `?name` or a bare identifier
fn parse_arg(input: &str) -> IResult<&str, RawArg<'_>> {
    let (input, _) = multispace0(input)?;
    let (input, sigil) = opt(char('?'))(input)?;
    let (input, name) = parse_identifier(input)?;
    let arg = match sigil {
        Some(_) => RawArg::Variable(name),
        None => RawArg::Symbol(name),
    };
    Ok((input, arg))
}

/// Parse `[A-Za-z_][A-Za-z0-9_]*`
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    let mut chars = input.chars();
    if let Some(first) = chars.next() {
        if first.is_alphabetic() || first == '_' {
            let mut end = first.len_utf8();
            for ch in chars {
                if ch.is_alphanumeric() || ch == '_' {
                    end += ch.len_utf8();
                } else {
                    break;
                }
            }
            return Ok((&input[end..], &input[..end]));
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Alpha,
    )))
}
