//! The mutable grammar data model.
//!
//! A [`Grammar`] is constructed once from a [`GrammarDescriptor`], mutated
//! in place by the normalization pipeline (`crate::normalize`), and then
//! treated as read-only by the LL(1) table builder and parser.

use crate::error::{GrammarError, Result};
use crate::symbol::{Symbol, SymbolId, SymbolTable};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A production rule `lhs -> rhs`. An empty `rhs` denotes ε.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    /// Left-hand side (always a nonterminal).
    pub lhs: Symbol,
    /// Right-hand side (sequence of symbols; empty means ε).
    pub rhs: Vec<Symbol>,
}

impl Production {
    /// Creates a new production.
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }

    /// Whether this production's body is ε (the empty sequence).
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }

    /// Renders this production using `table` for symbol names.
    pub fn display<'a>(&'a self, table: &'a SymbolTable) -> ProductionDisplay<'a> {
        ProductionDisplay { prod: self, table }
    }
}

/// `Display` wrapper for a [`Production`]; requires the owning
/// [`SymbolTable`] to resolve symbol names.
pub struct ProductionDisplay<'a> {
    prod: &'a Production,
    table: &'a SymbolTable,
}

impl fmt::Display for ProductionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.table.display(self.prod.lhs),
            self.table.display_seq(&self.prod.rhs)
        )
    }
}

/// The raw, textual description of a grammar, as read from a grammar source
/// file or constructed programmatically by a caller/test. `productions`
/// preserves insertion order: each entry is one nonterminal together with
/// its ordered list of alternative right-hand sides (an empty inner `Vec`
/// denotes ε).
#[derive(Debug, Clone, Default)]
pub struct GrammarDescriptor {
    pub nonterminals: Vec<String>,
    pub terminals: Vec<String>,
    pub start_symbol: String,
    pub productions: Vec<(String, Vec<Vec<String>>)>,
}

/// A context-free grammar: the mutable data model targeted by every
/// normalization stage.
#[derive(Debug, Clone)]
pub struct Grammar {
    table: SymbolTable,
    nonterminals: HashSet<Symbol>,
    terminals: HashSet<Symbol>,
    start: Symbol,
    productions: HashMap<Symbol, Vec<Production>>,
}

impl Grammar {
    /// Builds a grammar from a descriptor, interning every symbol name and
    /// checking that every RHS symbol is declared, `start` is a
    /// nonterminal, and no nonterminal's production list repeats a
    /// production.
    pub fn from_descriptor(descriptor: &GrammarDescriptor) -> Result<Self> {
        let mut table = SymbolTable::new();

        let nonterminal_ids: HashSet<SymbolId> = descriptor
            .nonterminals
            .iter()
            .map(|name| table.intern(name))
            .collect();
        let terminal_ids: HashSet<SymbolId> = descriptor
            .terminals
            .iter()
            .map(|name| table.intern(name))
            .collect();

        let nonterminals: HashSet<Symbol> = nonterminal_ids.iter().map(|&id| Symbol::Nonterminal(id)).collect();
        let terminals: HashSet<Symbol> = terminal_ids.iter().map(|&id| Symbol::Terminal(id)).collect();

        let start_id = table.intern(&descriptor.start_symbol);
        let start = Symbol::Nonterminal(start_id);
        if !nonterminals.contains(&start) {
            return Err(GrammarError::StartSymbolMissing(descriptor.start_symbol.clone()));
        }

        let mut productions: HashMap<Symbol, Vec<Production>> = HashMap::new();
        for nt in &nonterminals {
            productions.entry(*nt).or_default();
        }

        for (lhs_name, alternatives) in &descriptor.productions {
            let lhs_id = table.intern(lhs_name);
            let lhs = Symbol::Nonterminal(lhs_id);
            if !nonterminals.contains(&lhs) {
                return Err(GrammarError::UndefinedSymbol {
                    lhs: lhs_name.clone(),
                    symbol: lhs_name.clone(),
                });
            }

            for alt in alternatives {
                let mut rhs = Vec::with_capacity(alt.len());
                for sym_name in alt {
                    let id = table.intern(sym_name);
                    let symbol = if nonterminal_ids.contains(&id) {
                        Symbol::Nonterminal(id)
                    } else if terminal_ids.contains(&id) {
                        Symbol::Terminal(id)
                    } else {
                        return Err(GrammarError::UndefinedSymbol {
                            lhs: lhs_name.clone(),
                            symbol: sym_name.clone(),
                        });
                    };
                    rhs.push(symbol);
                }

                let production = Production::new(lhs, rhs);
                let bucket = productions.entry(lhs).or_default();
                if bucket.contains(&production) {
                    return Err(GrammarError::DuplicateProduction {
                        nonterminal: lhs_name.clone(),
                        production: production.display(&table).to_string(),
                    });
                }
                bucket.push(production);
            }
        }

        Ok(Self {
            table,
            nonterminals,
            terminals,
            start,
            productions,
        })
    }

    /// The interner backing this grammar's symbols.
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Mutable access to the interner, for stages that mint fresh
    /// nonterminal names.
    pub(crate) fn table_mut(&mut self) -> &mut SymbolTable {
        &mut self.table
    }

    /// The grammar's start symbol.
    pub fn start(&self) -> Symbol {
        self.start
    }

    /// All nonterminals currently in the grammar.
    pub fn nonterminals(&self) -> &HashSet<Symbol> {
        &self.nonterminals
    }

    /// All terminals currently in the grammar.
    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    /// Whether `symbol` is a terminal of this grammar.
    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        self.terminals.contains(&symbol)
    }

    /// Whether `symbol` is a nonterminal of this grammar.
    pub fn is_nonterminal(&self, symbol: Symbol) -> bool {
        self.nonterminals.contains(&symbol)
    }

    /// Returns the productions for `nonterminal`, in insertion order.
    pub fn productions_of(&self, nonterminal: Symbol) -> &[Production] {
        self.productions
            .get(&nonterminal)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates every production in the grammar in unspecified (hashmap)
    /// order. Fixed-point algorithms over the grammar don't depend on
    /// iteration order for their final result, so this is the form the
    /// normalizer and FIRST/FOLLOW computations use internally.
    pub fn all_productions(&self) -> impl Iterator<Item = &Production> {
        self.productions.values().flatten()
    }

    /// Iterates every production in deterministic order: nonterminals
    /// sorted by name, then each nonterminal's productions in their
    /// original insertion order. Used for diagnostic and final output.
    pub fn all_productions_sorted(&self) -> Vec<&Production> {
        let mut nts: Vec<Symbol> = self.nonterminals.iter().copied().collect();
        self.table.sort_by_name(&mut nts);
        nts.into_iter()
            .flat_map(|nt| self.productions_of(nt).iter())
            .collect()
    }

    /// Atomically replaces `nonterminal`'s production list, checking for
    /// intra-list duplicates. Does not change the nonterminal set; callers
    /// adding an altogether new nonterminal use
    /// [`Grammar::add_fresh_nonterminal`].
    pub fn replace_productions(&mut self, nonterminal: Symbol, new_list: Vec<Production>) -> Result<()> {
        let mut seen: Vec<&Production> = Vec::with_capacity(new_list.len());
        for prod in &new_list {
            if seen.contains(&prod) {
                return Err(GrammarError::DuplicateProduction {
                    nonterminal: self.table.display(nonterminal).to_string(),
                    production: prod.display(&self.table).to_string(),
                });
            }
            seen.push(prod);
        }
        self.productions.insert(nonterminal, new_list);
        Ok(())
    }

    /// Mints a fresh nonterminal named `{base}{counter}` (retrying on
    /// collision, per the fresh-name discipline) and adds it to the
    /// grammar with the given production list.
    pub fn add_fresh_nonterminal(
        &mut self,
        base: &str,
        counter: &mut u32,
        productions_builder: impl FnOnce(Symbol) -> Vec<Production>,
    ) -> Result<Symbol> {
        let name = self.table.fresh_name(base, counter);
        let id = self.table.intern(&name);
        let symbol = Symbol::Nonterminal(id);
        self.nonterminals.insert(symbol);
        let productions = productions_builder(symbol);
        self.replace_productions(symbol, productions)?;
        Ok(symbol)
    }

    /// Wholesale replacement of the nonterminal set and every production
    /// list, used by normalization stages (non-generating/unreachable
    /// elimination, ε-elimination, chain-rule elimination) that rewrite
    /// many left-hand sides in one pass rather than one nonterminal at a
    /// time.
    pub(crate) fn replace_all(
        &mut self,
        nonterminals: HashSet<Symbol>,
        productions: HashMap<Symbol, Vec<Production>>,
    ) -> Result<()> {
        for (nt, list) in &productions {
            let mut seen: Vec<&Production> = Vec::with_capacity(list.len());
            for prod in list {
                if seen.contains(&prod) {
                    return Err(GrammarError::DuplicateProduction {
                        nonterminal: self.table.display(*nt).to_string(),
                        production: prod.display(&self.table).to_string(),
                    });
                }
                seen.push(prod);
            }
        }
        self.nonterminals = nonterminals;
        self.productions = productions;
        self.recompute_terminals();
        Ok(())
    }

    /// Recomputes `terminals` from the symbols actually appearing in
    /// current production bodies. Normalization stages that drop
    /// productions can leave terminals that no longer appear anywhere;
    /// callers that care about a minimal terminal set call this after such
    /// a stage.
    pub fn recompute_terminals(&mut self) {
        let mut terminals = HashSet::new();
        for production in self.productions.values().flatten() {
            for symbol in &production.rhs {
                if symbol.is_terminal() {
                    terminals.insert(*symbol);
                }
            }
        }
        self.terminals = terminals;
    }

    /// Checks whether the start symbol still has at least one production
    /// (normalization stages can strip every rule for a nonterminal).
    pub fn start_has_productions(&self) -> bool {
        !self.productions_of(self.start).is_empty()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for production in self.all_productions_sorted() {
            writeln!(f, "{}", production.display(&self.table))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(start: &str, nts: &[&str], ts: &[&str], prods: &[(&str, &[&[&str]])]) -> GrammarDescriptor {
        GrammarDescriptor {
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
        }
    }

    #[test]
    fn builds_from_descriptor() {
        let d = descriptor(
            "S",
            &["S", "A"],
            &["a", "b"],
            &[("S", &[&["A", "b"]]), ("A", &[&["a"]])],
        );
        let g = Grammar::from_descriptor(&d).unwrap();
        assert_eq!(g.nonterminals().len(), 2);
        assert_eq!(g.terminals().len(), 2);
        assert!(g.is_nonterminal(g.start()));
    }

    #[test]
    fn rejects_start_not_in_nonterminals() {
        let d = descriptor("Z", &["S"], &["a"], &[("S", &[&["a"]])]);
        let err = Grammar::from_descriptor(&d).unwrap_err();
        assert!(matches!(err, GrammarError::StartSymbolMissing(_)));
    }

    #[test]
    fn rejects_undefined_symbol() {
        let d = descriptor("S", &["S"], &["a"], &[("S", &[&["b"]])]);
        let err = Grammar::from_descriptor(&d).unwrap_err();
        assert!(matches!(err, GrammarError::UndefinedSymbol { .. }));
    }

    #[test]
    fn rejects_duplicate_production() {
        let d = descriptor("S", &["S"], &["a"], &[("S", &[&["a"], &["a"]])]);
        let err = Grammar::from_descriptor(&d).unwrap_err();
        assert!(matches!(err, GrammarError::DuplicateProduction { .. }));
    }

    #[test]
    fn epsilon_production_has_empty_rhs() {
        let d = descriptor("S", &["S"], &["a"], &[("S", &[&["a"], &[]])]);
        let g = Grammar::from_descriptor(&d).unwrap();
        assert!(g.productions_of(g.start()).iter().any(|p| p.is_epsilon()));
    }
}
