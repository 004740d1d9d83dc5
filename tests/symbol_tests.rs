//! Integration tests for symbol interning and display.

use llparse::symbol::{Symbol, SymbolTable};

#[test]
fn terminal_and_nonterminal_handles_stay_distinct_even_for_the_same_name() {
    let mut table = SymbolTable::new();
    let id = table.intern("x");
    let terminal = Symbol::Terminal(id);
    let nonterminal = Symbol::Nonterminal(id);
    assert_ne!(terminal, nonterminal);
    assert!(terminal.is_terminal());
    assert!(nonterminal.is_nonterminal());
}

#[test]
fn epsilon_and_end_marker_have_no_interner_handle() {
    assert_eq!(Symbol::Epsilon.id(), None);
    assert_eq!(Symbol::EndMarker.id(), None);
}

#[test]
fn display_renders_epsilon_and_end_marker_as_their_symbols() {
    let table = SymbolTable::new();
    assert_eq!(table.display(Symbol::Epsilon).to_string(), "ε");
    assert_eq!(table.display(Symbol::EndMarker).to_string(), "$");
}

#[test]
fn display_seq_of_an_empty_sequence_is_epsilon() {
    let table = SymbolTable::new();
    assert_eq!(table.display_seq(&[]).to_string(), "ε");
}

#[test]
fn cyrillic_identifiers_round_trip_through_the_interner() {
    let mut table = SymbolTable::new();
    let id = table.intern("идентификатор");
    assert_eq!(table.name(id), "идентификатор");
    assert_eq!(table.lookup("идентификатор"), Some(id));
    assert_eq!(table.lookup("unrelated"), None);
}
