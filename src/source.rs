//! The line-oriented grammar-descriptor text format read by the CLI.
//!
//! Whitespace-delimited multi-character symbols and `|`-delimited
//! alternatives: an empty alternative (nothing between two `|`, or after
//! the last one) denotes an epsilon production.
//!
//! ```text
//! start: программа
//! программа -> program описание ; тело .
//! описание -> var идентификатор описание_хвост : тип
//! описание_хвост -> , идентификатор описание_хвост |
//! тип -> % | ! | $
//! ```

use crate::error::GrammarError;
use crate::grammar::GrammarDescriptor;
use std::collections::HashSet;

/// Parses `text` into a [`GrammarDescriptor`]. Does not validate the result
/// as a grammar (undefined symbols, missing start production, etc); that
/// happens in [`crate::grammar::Grammar::from_descriptor`].
pub fn parse(text: &str) -> Result<GrammarDescriptor, GrammarError> {
    let mut start_symbol: Option<String> = None;
    let mut nonterminal_order: Vec<String> = Vec::new();
    let mut nonterminal_set: HashSet<String> = HashSet::new();
    let mut productions: Vec<(String, Vec<Vec<String>>)> = Vec::new();
    let mut all_rhs_symbols: HashSet<String> = HashSet::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix("start:") {
            if start_symbol.is_some() {
                return Err(GrammarError::InvalidSource(format!(
                    "line {}: duplicate 'start:' declaration",
                    line_no + 1
                )));
            }
            start_symbol = Some(name.trim().to_string());
            continue;
        }

        let Some((lhs, rhs)) = line.split_once("->") else {
            return Err(GrammarError::InvalidSource(format!(
                "line {}: expected 'LHS -> alternatives', got '{line}'",
                line_no + 1
            )));
        };
        let lhs = lhs.trim().to_string();
        if lhs.is_empty() {
            return Err(GrammarError::InvalidSource(format!(
                "line {}: empty left-hand side",
                line_no + 1
            )));
        }

        if nonterminal_set.insert(lhs.clone()) {
            nonterminal_order.push(lhs.clone());
        }

        let mut alternatives: Vec<Vec<String>> = Vec::new();
        for alt in rhs.split('|') {
            let symbols: Vec<String> = alt.split_whitespace().map(str::to_string).collect();
            for sym in &symbols {
                all_rhs_symbols.insert(sym.clone());
            }
            alternatives.push(symbols);
        }

        match productions.iter_mut().find(|(name, _)| *name == lhs) {
            Some((_, existing)) => existing.extend(alternatives),
            None => productions.push((lhs, alternatives)),
        }
    }

    let start_symbol = start_symbol
        .ok_or_else(|| GrammarError::InvalidSource("missing 'start: <name>' declaration".to_string()))?;

    let mut terminals: Vec<String> = all_rhs_symbols
        .into_iter()
        .filter(|s| !nonterminal_set.contains(s))
        .collect();
    terminals.sort();

    Ok(GrammarDescriptor {
        nonterminals: nonterminal_order,
        terminals,
        start_symbol,
        productions,
    })
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}
