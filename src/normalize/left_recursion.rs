//! Stage 7: direct left-recursion elimination, preceded by a pre-check that
//! rejects indirect left recursion.
//!
//! The pre-check builds the "A begins with B" relation and fails if it
//! contains a cycle through more than one nonterminal; a direct self-loop
//! alone is left to the rewrite below.

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// Builds the "A's production begins with nonterminal B" relation.
fn begins_with_graph(grammar: &Grammar) -> HashMap<Symbol, HashSet<Symbol>> {
    let mut graph: HashMap<Symbol, HashSet<Symbol>> = HashMap::new();
    for nt in grammar.nonterminals() {
        let mut targets = HashSet::new();
        for production in grammar.productions_of(*nt) {
            if let Some(first) = production.rhs.first() {
                if first.is_nonterminal() {
                    targets.insert(*first);
                }
            }
        }
        graph.insert(*nt, targets);
    }
    graph
}

/// Finds a cycle in `graph` that passes through more than one nonterminal
/// (a direct self-loop `A -> A...` is fine; that's what stage 7 removes).
fn find_indirect_cycle(graph: &HashMap<Symbol, HashSet<Symbol>>) -> Option<Vec<Symbol>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Visiting,
        Done,
    }

    let mut marks: HashMap<Symbol, Mark> = HashMap::new();
    let mut stack: Vec<Symbol> = Vec::new();

    fn visit(
        node: Symbol,
        graph: &HashMap<Symbol, HashSet<Symbol>>,
        marks: &mut HashMap<Symbol, Mark>,
        stack: &mut Vec<Symbol>,
    ) -> Option<Vec<Symbol>> {
        marks.insert(node, Mark::Visiting);
        stack.push(node);

        if let Some(targets) = graph.get(&node) {
            let mut sorted_targets: Vec<Symbol> = targets.iter().copied().collect();
            sorted_targets.sort_by_key(|s| s.id());
            for &target in &sorted_targets {
                if target == node {
                    continue; // direct recursion, handled by the transform below
                }
                match marks.get(&target) {
                    Some(Mark::Done) => continue,
                    Some(Mark::Visiting) => {
                        let start = stack.iter().position(|s| *s == target).unwrap();
                        return Some(stack[start..].to_vec());
                    }
                    None => {
                        if let Some(cycle) = visit(target, graph, marks, stack) {
                            return Some(cycle);
                        }
                    }
                }
            }
        }

        stack.pop();
        marks.insert(node, Mark::Done);
        None
    }

    let mut nodes: Vec<Symbol> = graph.keys().copied().collect();
    nodes.sort_by_key(|s| s.id());
    for node in nodes {
        if !marks.contains_key(&node) {
            if let Some(cycle) = visit(node, graph, &mut marks, &mut stack) {
                return Some(cycle);
            }
        }
    }
    None
}

pub(crate) fn run(grammar: &mut Grammar) -> Result<()> {
    let graph = begins_with_graph(grammar);
    if let Some(cycle) = find_indirect_cycle(&graph) {
        let names: Vec<String> = cycle.iter().map(|s| grammar.table().display(*s).to_string()).collect();
        return Err(GrammarError::IndirectLeftRecursion(names));
    }

    let nonterminals: Vec<Symbol> = grammar.nonterminals().iter().copied().collect();
    let mut new_productions: HashMap<Symbol, Vec<Production>> = HashMap::new();
    let mut all_nonterminals: HashSet<Symbol> = nonterminals.iter().copied().collect();
    let mut counter: u32 = 0;
    let mut rewritten = 0usize;

    for a in &nonterminals {
        let bodies: Vec<Vec<Symbol>> = grammar.productions_of(*a).iter().map(|p| p.rhs.clone()).collect();

        let mut recursive: Vec<Vec<Symbol>> = Vec::new();
        let mut non_recursive: Vec<Vec<Symbol>> = Vec::new();
        for body in bodies {
            if body.first() == Some(a) {
                recursive.push(body[1..].to_vec());
            } else {
                non_recursive.push(body);
            }
        }

        if recursive.is_empty() {
            new_productions.insert(*a, non_recursive.into_iter().map(|rhs| Production::new(*a, rhs)).collect());
            continue;
        }

        rewritten += 1;
        let base_name = format!("{}_rec", grammar.table().name(a.id().unwrap()));
        let name = grammar.table_mut().fresh_name(&base_name, &mut counter);
        let new_id = grammar.table_mut().intern(&name);
        let a_prime = Symbol::Nonterminal(new_id);
        all_nonterminals.insert(a_prime);

        let a_bodies: Vec<Vec<Symbol>> = non_recursive
            .into_iter()
            .map(|mut beta| {
                beta.push(a_prime);
                beta
            })
            .collect();
        new_productions.insert(*a, a_bodies.into_iter().map(|rhs| Production::new(*a, rhs)).collect());

        let mut prime_bodies: Vec<Vec<Symbol>> = recursive
            .into_iter()
            .map(|mut alpha| {
                alpha.push(a_prime);
                alpha
            })
            .collect();
        prime_bodies.push(Vec::new());
        new_productions.insert(a_prime, prime_bodies.into_iter().map(|rhs| Production::new(a_prime, rhs)).collect());
    }

    log::info!("stage 7: eliminated direct left recursion in {rewritten} nonterminal(s)");

    grammar.replace_all(all_nonterminals, new_productions)
}
