//! Stage 1/2: language-nonemptiness check and non-generating-nonterminal
//! elimination.

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// A production body is "ready" once every nonterminal it mentions is
/// already known to be generating (terminals and ε are trivially ready).
fn body_is_ready(rhs: &[Symbol], generating: &HashSet<Symbol>) -> bool {
    rhs.iter().all(|sym| !sym.is_nonterminal() || generating.contains(sym))
}

fn compute_generating(grammar: &Grammar) -> HashSet<Symbol> {
    let mut generating: HashSet<Symbol> = HashSet::new();
    let mut changed = true;
    while changed {
        changed = false;
        for nt in grammar.nonterminals() {
            if generating.contains(nt) {
                continue;
            }
            if grammar.productions_of(*nt).iter().any(|p| body_is_ready(&p.rhs, &generating)) {
                generating.insert(*nt);
                changed = true;
            }
        }
    }
    generating
}

pub(crate) fn run(grammar: &mut Grammar) -> Result<()> {
    let generating = compute_generating(grammar);

    let mut sorted: Vec<Symbol> = generating.iter().copied().collect();
    grammar.table().sort_by_name(&mut sorted);
    log::info!(
        "stage 1/2: generating nonterminals = {{{}}}",
        sorted
            .iter()
            .map(|s| grammar.table().display(*s).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if !generating.contains(&grammar.start()) {
        return Err(GrammarError::EmptyLanguage(
            grammar.table().display(grammar.start()).to_string(),
        ));
    }

    let removed: Vec<Symbol> = grammar
        .nonterminals()
        .iter()
        .filter(|nt| !generating.contains(nt))
        .copied()
        .collect();
    if removed.is_empty() {
        log::info!("stage 1/2: no non-generating nonterminals to remove");
    } else {
        let mut removed_sorted = removed.clone();
        grammar.table().sort_by_name(&mut removed_sorted);
        log::info!(
            "stage 1/2: removing non-generating nonterminals {{{}}}",
            removed_sorted
                .iter()
                .map(|s| grammar.table().display(*s).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let mut new_productions: HashMap<Symbol, Vec<Production>> = HashMap::new();
    for nt in &generating {
        let kept: Vec<Production> = grammar
            .productions_of(*nt)
            .iter()
            .filter(|p| body_is_ready(&p.rhs, &generating))
            .cloned()
            .collect();
        new_productions.insert(*nt, kept);
    }

    grammar.replace_all(generating, new_productions)
}
