//! Error types for the grammar-normalization and LL(1) parsing pipeline.

use thiserror::Error;

/// Errors that can occur while constructing, normalizing, or driving a
/// grammar through LL(1) table construction and predictive parsing.
#[derive(Error, Debug)]
pub enum GrammarError {
    /// A production references a symbol that is in neither `terminals` nor
    /// `nonterminals`.
    #[error("symbol '{symbol}' used in a production for '{lhs}' is neither a terminal nor a nonterminal")]
    UndefinedSymbol { lhs: String, symbol: String },

    /// `start` is not a member of `nonterminals`, either at construction
    /// time or after normalization removed its last production.
    #[error("start symbol '{0}' is not a nonterminal with at least one production")]
    StartSymbolMissing(String),

    /// A nonterminal's production list contained the same production twice.
    #[error("nonterminal '{nonterminal}' has a duplicate production: {production}")]
    DuplicateProduction {
        nonterminal: String,
        production: String,
    },

    /// Stage 4.1 found that the start symbol derives no terminal string.
    #[error("grammar generates no terminal strings (start symbol '{0}' is non-generating)")]
    EmptyLanguage(String),

    /// Stage 4.7's pre-check found left recursion that is not direct
    /// (a cycle through more than one nonterminal in the "begins with"
    /// relation); out of scope for this pipeline.
    #[error("grammar contains indirect left recursion through: {0:?}")]
    IndirectLeftRecursion(Vec<String>),

    /// The fresh-name discipline exhausted a counter without finding an
    /// unused name — only reachable if the caller pre-seeded an adversarial
    /// number of colliding nonterminal names.
    #[error("could not mint a fresh nonterminal name from base '{0}'")]
    FreshNameExhausted(String),

    /// Table construction found two productions that would occupy the same
    /// `TABLE[nonterminal][lookahead]` cell.
    #[error("grammar is not LL(1): conflict at M[{nonterminal}, {lookahead}]:\n  {prod_a}\n  {prod_b}")]
    NotLL1 {
        nonterminal: String,
        lookahead: String,
        prod_a: String,
        prod_b: String,
    },

    /// The parser's stack top was a terminal that did not match the current
    /// input token.
    #[error("unexpected token at position {position}: expected '{expected}', got '{got}'")]
    UnexpectedToken {
        expected: String,
        got: String,
        position: usize,
    },

    /// The parser's stack top was a nonterminal with no table entry for the
    /// current lookahead.
    #[error("no production for '{nonterminal}' on lookahead '{lookahead}' at position {position} (expected one of {expected:?})")]
    NoProduction {
        nonterminal: String,
        lookahead: String,
        expected: Vec<String>,
        position: usize,
    },

    /// The parser reached its accept condition with unconsumed input, or
    /// exhausted input with symbols remaining above `$` on the stack.
    #[error("trailing input at position {0}")]
    TrailingInput(usize),

    /// A grammar-descriptor text file could not be parsed.
    #[error("invalid grammar source: {0}")]
    InvalidSource(String),

    /// Surfaced I/O errors (reading a grammar or token-stream file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for `Result`s in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;
