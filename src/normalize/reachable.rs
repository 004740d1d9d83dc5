//! Stage 3: unreachable-symbol elimination.

use crate::error::Result;
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

fn compute_reachable(grammar: &Grammar) -> HashSet<Symbol> {
    let mut reachable: HashSet<Symbol> = HashSet::from([grammar.start()]);
    let mut changed = true;
    while changed {
        changed = false;
        let frontier: Vec<Symbol> = reachable.iter().copied().collect();
        for nt in frontier {
            for production in grammar.productions_of(nt) {
                for sym in &production.rhs {
                    if sym.is_nonterminal() && !reachable.contains(sym) {
                        reachable.insert(*sym);
                        changed = true;
                    }
                }
            }
        }
    }
    reachable
}

pub(crate) fn run(grammar: &mut Grammar) -> Result<()> {
    let reachable = compute_reachable(grammar);

    let mut sorted: Vec<Symbol> = reachable.iter().copied().collect();
    grammar.table().sort_by_name(&mut sorted);
    log::info!(
        "stage 3: reachable nonterminals = {{{}}}",
        sorted
            .iter()
            .map(|s| grammar.table().display(*s).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut new_productions: HashMap<Symbol, Vec<Production>> = HashMap::new();
    for nt in &reachable {
        let kept: Vec<Production> = grammar
            .productions_of(*nt)
            .iter()
            .filter(|p| p.rhs.iter().all(|sym| !sym.is_nonterminal() || reachable.contains(sym)))
            .cloned()
            .collect();
        new_productions.insert(*nt, kept);
    }

    grammar.replace_all(reachable, new_productions)
}
