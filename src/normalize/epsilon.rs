//! Stage 4: ε-elimination.
//!
//! For every production, every way of dropping a non-empty subset of its
//! nullable positions is added as its own alternative (the power set over
//! nullable positions).

use crate::error::Result;
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

fn compute_nullable(grammar: &Grammar) -> HashSet<Symbol> {
    let mut nullable: HashSet<Symbol> = grammar
        .nonterminals()
        .iter()
        .copied()
        .filter(|nt| grammar.productions_of(*nt).iter().any(Production::is_epsilon))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for nt in grammar.nonterminals() {
            if nullable.contains(nt) {
                continue;
            }
            let becomes_nullable = grammar
                .productions_of(*nt)
                .iter()
                .any(|p| !p.rhs.is_empty() && p.rhs.iter().all(|s| nullable.contains(s)));
            if becomes_nullable {
                nullable.insert(*nt);
                changed = true;
            }
        }
    }
    nullable
}

/// Every way to drop a non-empty subset of the positions in `nullable_positions`
/// from `rhs`, keeping only results that are themselves non-empty.
fn nullable_combinations(rhs: &[Symbol], nullable_positions: &[usize]) -> Vec<Vec<Symbol>> {
    let n = nullable_positions.len();
    let mut results = Vec::new();
    for mask in 1u32..(1 << n) {
        let to_remove: HashSet<usize> = (0..n)
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| nullable_positions[i])
            .collect();
        let new_rhs: Vec<Symbol> = rhs
            .iter()
            .enumerate()
            .filter(|(i, _)| !to_remove.contains(i))
            .map(|(_, s)| *s)
            .collect();
        if !new_rhs.is_empty() {
            results.push(new_rhs);
        }
    }
    results
}

pub(crate) fn run(grammar: &mut Grammar, nullable_tail_whitelist: &HashSet<String>) -> Result<()> {
    let nullable = compute_nullable(grammar);

    let mut sorted: Vec<Symbol> = nullable.iter().copied().collect();
    grammar.table().sort_by_name(&mut sorted);
    log::info!(
        "stage 4: nullable nonterminals = {{{}}}",
        sorted
            .iter()
            .map(|s| grammar.table().display(*s).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut new_productions: HashMap<Symbol, Vec<Production>> = HashMap::new();

    for nt in grammar.nonterminals() {
        let originals = grammar.productions_of(*nt);
        let had_epsilon = originals.iter().any(Production::is_epsilon);

        let mut bodies: Vec<Vec<Symbol>> = Vec::new();
        let mut seen: HashSet<Vec<Symbol>> = HashSet::new();

        for production in originals.iter().filter(|p| !p.is_epsilon()) {
            if seen.insert(production.rhs.clone()) {
                bodies.push(production.rhs.clone());
            }

            let nullable_positions: Vec<usize> = production
                .rhs
                .iter()
                .enumerate()
                .filter(|(_, s)| nullable.contains(s))
                .map(|(i, _)| i)
                .collect();

            for combo in nullable_combinations(&production.rhs, &nullable_positions) {
                if seen.insert(combo.clone()) {
                    bodies.push(combo);
                }
            }
        }

        let is_start = *nt == grammar.start();
        let whitelisted = nullable_tail_whitelist.contains(grammar.table().name(nt.id().unwrap()));

        if (is_start && nullable.contains(nt)) || (had_epsilon && whitelisted) {
            bodies.push(Vec::new());
        }

        new_productions.insert(
            *nt,
            bodies.into_iter().map(|rhs| Production::new(*nt, rhs)).collect(),
        );
    }

    let nonterminals = grammar.nonterminals().clone();
    grammar.replace_all(nonterminals, new_productions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarDescriptor;

    #[test]
    fn right_recursive_star_keeps_start_epsilon() {
        // S -> a S | ε
        let d = GrammarDescriptor {
            nonterminals: vec!["S".into()],
            terminals: vec!["a".into()],
            start_symbol: "S".into(),
            productions: vec![("S".into(), vec![vec!["a".into(), "S".into()], vec![]])],
        };
        let mut g = Grammar::from_descriptor(&d).unwrap();
        run(&mut g, &HashSet::new()).unwrap();
        let prods = g.productions_of(g.start());
        assert!(prods.iter().any(Production::is_epsilon));
        assert!(prods.iter().all(|p| p.is_epsilon() || !p.rhs.is_empty()));
    }

    #[test]
    fn non_start_epsilon_is_stripped_by_default() {
        // S -> A b ; A -> a | ε
        let d = GrammarDescriptor {
            nonterminals: vec!["S".into(), "A".into()],
            terminals: vec!["a".into(), "b".into()],
            start_symbol: "S".into(),
            productions: vec![
                ("S".into(), vec![vec!["A".into(), "b".into()]]),
                ("A".into(), vec![vec!["a".into()], vec![]]),
            ],
        };
        let mut g = Grammar::from_descriptor(&d).unwrap();
        run(&mut g, &HashSet::new()).unwrap();
        for nt in g.nonterminals() {
            if *nt != g.start() {
                assert!(g.productions_of(*nt).iter().all(|p| !p.is_epsilon()));
            }
        }
        // S must now also offer "b" alone, since A was nullable.
        assert!(g.productions_of(g.start()).iter().any(|p| p.rhs.len() == 1));
    }

    #[test]
    fn indirectly_nullable_start_keeps_epsilon() {
        // S -> A B ; A -> ε ; B -> ε  (S is nullable only through A and B,
        // not via a direct S -> ε alternative)
        let d = GrammarDescriptor {
            nonterminals: vec!["S".into(), "A".into(), "B".into()],
            terminals: vec![],
            start_symbol: "S".into(),
            productions: vec![
                ("S".into(), vec![vec!["A".into(), "B".into()]]),
                ("A".into(), vec![vec![]]),
                ("B".into(), vec![vec![]]),
            ],
        };
        let mut g = Grammar::from_descriptor(&d).unwrap();
        run(&mut g, &HashSet::new()).unwrap();
        assert!(g.productions_of(g.start()).iter().any(Production::is_epsilon));
    }

    #[test]
    fn whitelisted_tail_keeps_explicit_epsilon() {
        let d = GrammarDescriptor {
            nonterminals: vec!["S".into(), "tail".into()],
            terminals: vec!["a".into()],
            start_symbol: "S".into(),
            productions: vec![
                ("S".into(), vec![vec!["a".into(), "tail".into()]]),
                ("tail".into(), vec![vec!["a".into(), "tail".into()], vec![]]),
            ],
        };
        let mut g = Grammar::from_descriptor(&d).unwrap();
        let mut whitelist = HashSet::new();
        whitelist.insert("tail".to_string());
        run(&mut g, &whitelist).unwrap();
        let tail = Symbol::Nonterminal(g.table().lookup("tail").unwrap());
        assert!(g.productions_of(tail).iter().any(Production::is_epsilon));
    }
}
