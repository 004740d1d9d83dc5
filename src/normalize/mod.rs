//! The grammar-normalization pipeline: seven in-place transformations run
//! in a fixed order, each relying on invariants the previous stage
//! established.
//!
//! ```text
//! 1/2. generating-set check + non-generating elimination
//! 3.   unreachable-symbol elimination
//! 4.   ε-elimination
//! 5.   chain-rule elimination
//! 6.   left factoring
//! 7.   direct left-recursion elimination (+ indirect-recursion pre-check)
//! ```

mod chain;
mod epsilon;
mod generating;
mod left_factor;
mod left_recursion;
mod reachable;

use crate::error::Result;
use crate::grammar::Grammar;
use std::collections::HashSet;

/// Runs the seven-stage normalization pipeline over a [`Grammar`] in place.
///
/// A fresh `Normalizer` applies strict ε-elimination (no relaxation).
/// Nonterminals named in [`Normalizer::whitelist_nullable_tail`]
/// additionally keep an explicit ε-production after stage 4 even though
/// they are otherwise nullable, for list-tail nonterminals where that
/// shape is wanted; opt-in, so the default pipeline stays strictly
/// ε-free.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    nullable_tail_whitelist: HashSet<String>,
}

impl Normalizer {
    /// A normalizer with no relaxations: strict ε-freeness after stage 4.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `name` as a nonterminal allowed to keep an explicit
    /// ε-production after stage 4 when it is nullable.
    pub fn whitelist_nullable_tail(&mut self, name: impl Into<String>) -> &mut Self {
        self.nullable_tail_whitelist.insert(name.into());
        self
    }

    /// Runs all seven stages in order, mutating `grammar` in place.
    pub fn normalize(&self, grammar: &mut Grammar) -> Result<()> {
        generating::run(grammar)?;
        reachable::run(grammar)?;
        epsilon::run(grammar, &self.nullable_tail_whitelist)?;
        chain::run(grammar)?;
        left_factor::run(grammar)?;
        left_recursion::run(grammar)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarDescriptor;

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
    fn full_pipeline_on_right_recursive_star() {
        // S -> a S | ε
        let d = descriptor("S", &["S"], &["a"], &[("S", &[&["a", "S"], &[]])]);
        let mut g = Grammar::from_descriptor(&d).unwrap();
        Normalizer::new().normalize(&mut g).unwrap();
        assert!(g.is_nonterminal(g.start()));
        assert!(g.start_has_productions());
    }

    #[test]
    fn full_pipeline_on_left_recursive_sum() {
        // E -> E + T | T ; T -> id
        let d = descriptor(
            "E",
            &["E", "T"],
            &["+", "id"],
            &[("E", &[&["E", "+", "T"], &["T"]]), ("T", &[&["id"]])],
        );
        let mut g = Grammar::from_descriptor(&d).unwrap();
        Normalizer::new().normalize(&mut g).unwrap();
        // No production of any nonterminal may begin with that same nonterminal.
        for nt in g.nonterminals() {
            for prod in g.productions_of(*nt) {
                if let Some(first) = prod.rhs.first() {
                    assert_ne!(*first, *nt);
                }
            }
        }
    }
}
