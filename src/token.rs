//! The token stream contract the predictive parser consumes.
//!
//! Lexing itself happens elsewhere: this module only pins the shape a
//! scanner is expected to produce, named constants for the teaching
//! language's terminal alphabet, and a small in-memory cursor so tests and
//! the CLI can hand the parser a pre-lexed stream directly.

/// One lexed token: the grammar terminal it stands for (by name, matching a
/// string interned into a [`crate::symbol::SymbolTable`]) plus the source
/// lexeme that produced it, when the terminal class covers more than one
/// literal string (e.g. `идентификатор`, `число`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub terminal: String,
    pub lexeme: Option<String>,
}

impl Token {
    pub fn new(terminal: impl Into<String>, lexeme: Option<String>) -> Self {
        Self {
            terminal: terminal.into(),
            lexeme,
        }
    }

    /// A token whose lexeme is identical to its terminal name (keywords,
    /// delimiters, single- and double-character operators).
    pub fn literal(terminal: impl Into<String>) -> Self {
        let terminal = terminal.into();
        Self {
            lexeme: Some(terminal.clone()),
            terminal,
        }
    }
}

/// A cursor over a pre-lexed [`Token`] sequence. The predictive parser reads
/// it one token at a time and never rewinds.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, position: 0 }
    }

    /// The terminal name of the token at `position`, or `None` past the end
    /// of input (the parser treats that as the end marker).
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.position).map(|t| t.terminal.as_str())
    }

    pub fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.position).cloned();
        if tok.is_some() {
            self.position += 1;
        }
        tok
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

/// Keywords of the teaching language's statement and declaration forms.
pub mod keywords {
    pub const IF: &str = "if";
    pub const THEN: &str = "then";
    pub const ELSE: &str = "else";
    pub const FOR: &str = "for";
    pub const TO: &str = "to";
    pub const DO: &str = "do";
    pub const WHILE: &str = "while";
    pub const READ: &str = "read";
    pub const WRITE: &str = "write";
    pub const ASS: &str = "ass";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
}

/// Delimiters and compound-statement punctuation.
pub mod delimiters {
    pub const LBRACE: &str = "{";
    pub const RBRACE: &str = "}";
    pub const LPAREN: &str = "(";
    pub const RPAREN: &str = ")";
    pub const SEMICOLON: &str = ";";
    pub const COLON: &str = ":";
    pub const COMMA: &str = ",";
}

/// Type markers, one character each: `%` integer, `!` real, `$` boolean.
pub mod type_markers {
    pub const INTEGER: &str = "%";
    pub const REAL: &str = "!";
    pub const BOOLEAN: &str = "$";
}

/// Relational operators (`операция_отношения`).
pub const RELATIONSHIP_OPS: &[&str] = &["<", "<=", ">", ">=", "=", "<>"];

/// Additive operators (`операция_сложения`), including the word operator
/// `or`.
pub const ADDITION_OPS: &[&str] = &["+", "-", "or"];

/// Multiplicative operators (`операция_умножения`), including `and`.
pub const MULTIPLICATION_OPS: &[&str] = &["*", "/", "and"];

/// Unary operators (`унарная_операция`): arithmetic negation and logical
/// negation (`not`).
pub const UNARY_OPS: &[&str] = &["-", "not"];

/// The two lexical classes the grammar treats as opaque terminals; the
/// lexer (out of scope) is responsible for recognizing identifiers and
/// numeric literals and handing the parser a `Token` tagged with one of
/// these terminal names.
pub const IDENTIFIER: &str = "идентификатор";
pub const NUMBER: &str = "число";
