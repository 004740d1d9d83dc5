//! Integration tests for FIRST and FOLLOW set computation.

use llparse::first_follow::*;
use llparse::grammar::{Grammar, GrammarDescriptor};
use llparse::symbol::Symbol;

fn grammar(start: &str, nts: &[&str], ts: &[&str], prods: &[(&str, &[&[&str]])]) -> Grammar {
    let d = GrammarDescriptor {
        nonterminals: nts.iter().map(|s| s.to_string()).collect(),
        terminals: ts.iter().map(|s| s.to_string()).collect(),
        start_symbol: start.to_string(),
        productions: prods
            .iter()
            .map(|(lhs, alts)| {
                (
                    lhs.to_string(),
                    alts.iter().map(|alt| alt.iter().map(|s| s.to_string()).collect()).collect(),
                )
            })
            .collect(),
    };
    Grammar::from_descriptor(&d).unwrap()
}

fn nt(g: &Grammar, name: &str) -> Symbol {
    Symbol::Nonterminal(g.table().lookup(name).unwrap())
}

fn t(g: &Grammar, name: &str) -> Symbol {
    Symbol::Terminal(g.table().lookup(name).unwrap())
}

#[test]
fn first_sets_simple() {
    let g = grammar("S", &["S", "A"], &["a"], &[("S", &[&["A"]]), ("A", &[&["a"]])]);
    let first_sets = compute_first_sets(&g);
    let first_a = first_sets.get(&nt(&g, "A")).unwrap();
    assert!(first_a.contains(&t(&g, "a")));
}

#[test]
fn follow_sets_simple() {
    let g = grammar("S", &["S", "A"], &["a"], &[("S", &[&["A"]]), ("A", &[&["a"]])]);
    let first_sets = compute_first_sets(&g);
    let follow_sets = compute_follow_sets(&g, &first_sets);
    let follow_s = follow_sets.get(&nt(&g, "S")).unwrap();
    assert!(follow_s.contains(&Symbol::EndMarker));
}

#[test]
fn first_with_epsilon() {
    let g = grammar("S", &["S", "A"], &["a"], &[("S", &[&["A"]]), ("A", &[&["a"], &[]])]);
    let first_sets = compute_first_sets(&g);
    let first_a = first_sets.get(&nt(&g, "A")).unwrap();
    assert!(first_a.contains(&t(&g, "a")));
    assert!(first_a.contains(&Symbol::Epsilon));
}

#[test]
fn first_of_string_over_a_sequence() {
    let g = grammar("S", &["S", "A", "B"], &["a", "b"], &[
        ("S", &[&["A", "B"]]),
        ("A", &[&["a"]]),
        ("B", &[&["b"]]),
    ]);
    let first_sets = compute_first_sets(&g);
    let symbols = vec![nt(&g, "A"), nt(&g, "B")];
    let first = first_of_string(&first_sets, &symbols);
    assert!(first.contains(&t(&g, "a")));
}

#[test]
fn follow_propagates_across_a_sibling() {
    let g = grammar("S", &["S", "A", "B"], &["a", "b"], &[
        ("S", &[&["A", "B"]]),
        ("A", &[&["a"]]),
        ("B", &[&["b"]]),
    ]);
    let first_sets = compute_first_sets(&g);
    let follow_sets = compute_follow_sets(&g, &first_sets);
    let follow_a = follow_sets.get(&nt(&g, "A")).unwrap();
    assert!(follow_a.contains(&t(&g, "b")));
}

#[test]
fn first_and_follow_on_a_right_recursive_pair() {
    let g = grammar("S", &["S", "A", "B"], &["a", "b", "c", "d", "e"], &[
        ("S", &[&["A", "B"]]),
        ("A", &[&["a", "A"], &["d"]]),
        ("B", &[&["b", "B", "c"], &["e"]]),
    ]);
    let first_sets = compute_first_sets(&g);
    let follow_sets = compute_follow_sets(&g, &first_sets);

    let first_s = first_sets.get(&nt(&g, "S")).unwrap();
    assert!(first_s.contains(&t(&g, "a")));
    assert!(first_s.contains(&t(&g, "d")));

    let follow_a = follow_sets.get(&nt(&g, "A")).unwrap();
    assert!(follow_a.contains(&t(&g, "b")));
    assert!(follow_a.contains(&t(&g, "e")));
}
