//! Stage 5: chain-rule elimination.
//!
//! A chain rule is `A -> B` where `B` is a single nonterminal.

use crate::error::Result;
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

fn chain_target(production: &Production) -> Option<Symbol> {
    if production.rhs.len() == 1 && production.rhs[0].is_nonterminal() {
        Some(production.rhs[0])
    } else {
        None
    }
}

/// The reflexive-transitive chain closure of `start`: every nonterminal
/// reachable from it by zero or more chain steps.
fn chain_closure(grammar: &Grammar, start: Symbol) -> HashSet<Symbol> {
    let mut closure = HashSet::from([start]);
    let mut changed = true;
    while changed {
        changed = false;
        let frontier: Vec<Symbol> = closure.iter().copied().collect();
        for b in frontier {
            for production in grammar.productions_of(b) {
                if let Some(c) = chain_target(production) {
                    if !closure.contains(&c) {
                        closure.insert(c);
                        changed = true;
                    }
                }
            }
        }
    }
    closure
}

pub(crate) fn run(grammar: &mut Grammar) -> Result<()> {
    let nonterminals: Vec<Symbol> = grammar.nonterminals().iter().copied().collect();
    let mut new_productions: HashMap<Symbol, Vec<Production>> = HashMap::new();

    for a in &nonterminals {
        let closure = chain_closure(grammar, *a);
        let mut members: Vec<Symbol> = closure.into_iter().collect();
        grammar.table().sort_by_name(&mut members);

        let mut new_rhs: Vec<Production> = Vec::new();
        for b in members {
            for production in grammar.productions_of(b) {
                if chain_target(production).is_none() && !new_rhs.contains(production) {
                    new_rhs.push(Production::new(*a, production.rhs.clone()));
                }
            }
        }
        new_productions.insert(*a, new_rhs);
    }

    log::info!("stage 5: chain rules eliminated for {} nonterminals", nonterminals.len());

    let nonterminal_set: HashSet<Symbol> = nonterminals.into_iter().collect();
    grammar.replace_all(nonterminal_set, new_productions)
}
