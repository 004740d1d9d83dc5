//! Table-driven predictive parsing: a pushdown stack initialized to `[$,
//! start]`, matching terminals against a [`TokenStream`] and expanding
//! nonterminals via an [`LL1Table`], producing a full leftmost-derivation
//! trace.

use crate::error::{GrammarError, Result};
use crate::grammar::{Grammar, Production};
use crate::ll1::LL1Table;
use crate::symbol::Symbol;
use crate::token::TokenStream;

/// One step of the leftmost derivation: the nonterminal expanded and the
/// production used to expand it.
pub type DerivationStep = (Symbol, Production);

/// Drives a [`LL1Table`] over a [`TokenStream`], predicting one production
/// at a time from a pushdown stack initialized to `[$, start]`.
pub struct PredictiveParser<'a> {
    grammar: &'a Grammar,
    table: &'a LL1Table,
}

impl<'a> PredictiveParser<'a> {
    pub fn new(grammar: &'a Grammar, table: &'a LL1Table) -> Self {
        Self { grammar, table }
    }

    /// Parses `tokens` to completion, returning the leftmost derivation.
    ///
    /// Fails with [`GrammarError::UnexpectedToken`] if a terminal on the
    /// stack doesn't match the current token, [`GrammarError::NoProduction`]
    /// if a nonterminal on the stack has no table entry for the current
    /// lookahead, and [`GrammarError::TrailingInput`] if the stack empties
    /// before the token stream does (or vice versa).
    pub fn parse(&self, tokens: &mut TokenStream) -> Result<Vec<DerivationStep>> {
        let mut stack: Vec<Symbol> = vec![Symbol::EndMarker, self.grammar.start()];
        let mut derivation = Vec::new();

        loop {
            let top = *stack.last().expect("stack never empties without returning");
            let lookahead = self.lookahead_symbol(tokens)?;

            if top.is_end_marker() {
                if lookahead.is_end_marker() {
                    return Ok(derivation);
                }
                return Err(GrammarError::TrailingInput(tokens.position()));
            }

            if top.is_terminal() {
                if top == lookahead {
                    stack.pop();
                    tokens.advance();
                    continue;
                }
                return Err(GrammarError::UnexpectedToken {
                    expected: self.grammar.table().display(top).to_string(),
                    got: self.grammar.table().display(lookahead).to_string(),
                    position: tokens.position(),
                });
            }

            // top is a nonterminal: consult the table.
            match self.table.get(top, lookahead) {
                Some(production) => {
                    stack.pop();
                    for symbol in production.rhs.iter().rev() {
                        stack.push(*symbol);
                    }
                    derivation.push((top, production.clone()));
                }
                None => {
                    let expected = self.expected_lookaheads(top);
                    return Err(GrammarError::NoProduction {
                        nonterminal: self.grammar.table().display(top).to_string(),
                        lookahead: self.grammar.table().display(lookahead).to_string(),
                        expected,
                        position: tokens.position(),
                    });
                }
            }
        }
    }

    fn lookahead_symbol(&self, tokens: &TokenStream) -> Result<Symbol> {
        match tokens.peek() {
            None => Ok(Symbol::EndMarker),
            Some(name) => match self.grammar.table().lookup(name) {
                Some(id) if self.grammar.is_terminal(Symbol::Terminal(id)) => Ok(Symbol::Terminal(id)),
                _ => Err(GrammarError::InvalidSource(format!(
                    "token terminal '{name}' is not in this grammar's terminal alphabet"
                ))),
            },
        }
    }

    /// The terminals (by display name) this table would have accepted for
    /// `nonterminal`, used to build a helpful [`GrammarError::NoProduction`].
    fn expected_lookaheads(&self, nonterminal: Symbol) -> Vec<String> {
        let mut names: Vec<String> = self
            .grammar
            .terminals()
            .iter()
            .chain(std::iter::once(&Symbol::EndMarker))
            .filter(|&&t| self.table.get(nonterminal, t).is_some())
            .map(|t| self.grammar.table().display(*t).to_string())
            .collect();
        names.sort();
        names
    }
}
