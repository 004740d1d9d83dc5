//! Symbol types and the string interner backing them.
//!
//! This module defines the core [`Symbol`] type and the [`SymbolTable`]
//! interner used throughout the crate. Grammar symbols in the teaching
//! language this crate parses are multi-character, and occasionally
//! Cyrillic, identifiers (`идентификатор`, `программа`) rather than single
//! characters, so symbols are interned to small integer handles instead of
//! stored inline as characters.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Handle into a [`SymbolTable`].
pub type SymbolId = u32;

/// Represents a symbol in a context-free grammar.
///
/// Whether a handle denotes a terminal or a nonterminal is carried by the
/// variant, not by any property of the interned string itself — the same
/// name could in principle be interned once and referenced as either, but
/// grammar construction rejects that (terminals and nonterminals are
/// disjoint sets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal symbol.
    Terminal(SymbolId),
    /// A nonterminal symbol.
    Nonterminal(SymbolId),
    /// The empty string (ε).
    Epsilon,
    /// The end-of-input marker ($), used only during LL(1) analysis.
    EndMarker,
}

impl Symbol {
    /// Checks if this symbol is a terminal.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks if this symbol is a nonterminal.
    #[inline]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    /// Checks if this symbol is epsilon (ε).
    #[inline]
    pub const fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Checks if this symbol is the end marker ($).
    #[inline]
    pub const fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::EndMarker)
    }

    /// Returns the interner handle of this symbol, if it has one.
    pub const fn id(&self) -> Option<SymbolId> {
        match self {
            Symbol::Terminal(id) | Symbol::Nonterminal(id) => Some(*id),
            Symbol::Epsilon | Symbol::EndMarker => None,
        }
    }
}

/// A bidirectional string interner for grammar symbol names.
///
/// A `SymbolTable` is the sole owner of symbol name strings once a grammar
/// has been constructed; every other component works with [`Symbol`]
/// handles and consults the table only to render output.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, SymbolId>,
}

impl SymbolTable {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, returning its handle. Interning the same name twice
    /// returns the same handle.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as SymbolId;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Looks up the handle already assigned to `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.ids.get(name).copied()
    }

    /// Returns the name a handle was interned from.
    ///
    /// Panics if `id` was never produced by [`SymbolTable::intern`] on this
    /// table — handles do not outlive the table that minted them.
    pub fn name(&self, id: SymbolId) -> &str {
        &self.names[id as usize]
    }

    /// Mints a fresh name that does not already exist in this table,
    /// starting from `base` and a monotonically increasing counter, per the
    /// fresh-name discipline normalization stages use when they introduce
    /// new nonterminals (`{base}{counter}`, retried on collision).
    pub fn fresh_name(&self, base: &str, counter: &mut u32) -> String {
        loop {
            let candidate = format!("{base}{counter}");
            *counter += 1;
            if !self.ids.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    /// Orders `symbols` by interned name for deterministic diagnostic
    /// output. `Epsilon` sorts before all named symbols and `EndMarker`
    /// after.
    pub fn sort_by_name(&self, symbols: &mut [Symbol]) {
        symbols.sort_by(|a, b| self.compare(*a, *b));
    }

    /// Total order over symbols for deterministic output: `Epsilon` <
    /// terminals/nonterminals (by name) < `EndMarker`.
    pub fn compare(&self, a: Symbol, b: Symbol) -> Ordering {
        match (a, b) {
            (Symbol::Epsilon, Symbol::Epsilon) => Ordering::Equal,
            (Symbol::Epsilon, _) => Ordering::Less,
            (_, Symbol::Epsilon) => Ordering::Greater,
            (Symbol::EndMarker, Symbol::EndMarker) => Ordering::Equal,
            (Symbol::EndMarker, _) => Ordering::Greater,
            (_, Symbol::EndMarker) => Ordering::Less,
            _ => {
                let (Some(ida), Some(idb)) = (a.id(), b.id()) else {
                    unreachable!("named symbol variants always carry an id")
                };
                self.name(ida).cmp(self.name(idb))
            }
        }
    }

    /// Renders a symbol for display/diagnostics.
    pub fn display(&self, symbol: Symbol) -> SymbolDisplay<'_> {
        SymbolDisplay {
            table: self,
            symbol,
        }
    }

    /// Renders a sequence of symbols, space-separated, `ε` for the empty
    /// sequence.
    pub fn display_seq<'a>(&'a self, symbols: &'a [Symbol]) -> SeqDisplay<'a> {
        SeqDisplay {
            table: self,
            symbols,
        }
    }
}

/// `Display` wrapper for a single [`Symbol`]; symbols cannot implement
/// `Display` on their own since rendering a terminal/nonterminal requires
/// the owning [`SymbolTable`].
pub struct SymbolDisplay<'a> {
    table: &'a SymbolTable,
    symbol: Symbol,
}

impl fmt::Display for SymbolDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol {
            Symbol::Terminal(id) | Symbol::Nonterminal(id) => write!(f, "{}", self.table.name(id)),
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::EndMarker => write!(f, "$"),
        }
    }
}

/// `Display` wrapper for a symbol sequence (a production's right-hand side).
pub struct SeqDisplay<'a> {
    table: &'a SymbolTable,
    symbols: &'a [Symbol],
}

impl fmt::Display for SeqDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbols.is_empty() {
            return write!(f, "ε");
        }
        for (i, sym) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.table.display(*sym))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_stable_and_deduplicates() {
        let mut table = SymbolTable::new();
        let a = table.intern("программа");
        let b = table.intern("идентификатор");
        let a2 = table.intern("программа");
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(table.name(a), "программа");
        assert_eq!(table.name(b), "идентификатор");
    }

    #[test]
    fn fresh_name_avoids_collisions() {
        let mut table = SymbolTable::new();
        table.intern("S_fact0");
        let mut counter = 0;
        let name = table.fresh_name("S_fact", &mut counter);
        assert_eq!(name, "S_fact1");
    }

    #[test]
    fn sort_places_epsilon_first_and_end_marker_last() {
        let mut table = SymbolTable::new();
        let z = Symbol::Nonterminal(table.intern("Z"));
        let a = Symbol::Terminal(table.intern("a"));
        let mut symbols = vec![Symbol::EndMarker, z, Symbol::Epsilon, a];
        table.sort_by_name(&mut symbols);
        assert_eq!(symbols, vec![Symbol::Epsilon, a, z, Symbol::EndMarker]);
    }
}
