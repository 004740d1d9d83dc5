//! The sample teaching-language grammar: a small Pascal-shaped imperative
//! language (`program ... var ... begin ... end .`) with comma-tailed
//! declaration and argument lists, an expression grammar with relational,
//! additive, and multiplicative precedence layers, and `if`/`for`/`while`/
//! `read`/`write` statement forms.
//!
//! `идентификатор`/`число` stand in for spelled-out letter-and-digit
//! productions, since recognizing identifiers and numeric literals is the
//! (out-of-scope) lexer's job.

use crate::grammar::GrammarDescriptor;
use crate::normalize::Normalizer;
use crate::token::{ADDITION_OPS, IDENTIFIER, MULTIPLICATION_OPS, NUMBER, RELATIONSHIP_OPS, UNARY_OPS};

fn alt(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

fn op_alternatives(ops: &[&str]) -> Vec<Vec<String>> {
    ops.iter().map(|op| vec![op.to_string()]).collect()
}

/// Builds the teaching-language grammar descriptor used by the worked
/// integration scenario and available to CLI users as a worked example.
pub fn teaching_language_grammar() -> GrammarDescriptor {
    let productions: Vec<(String, Vec<Vec<String>>)> = vec![
        ("программа".into(), vec![alt(&["program", "описание", ";", "тело", "."])]),
        ("описание".into(), vec![alt(&["var", IDENTIFIER, "описание_хвост", ":", "тип"])]),
        (
            "описание_хвост".into(),
            vec![alt(&[",", IDENTIFIER, "описание_хвост"]), alt(&[])],
        ),
        ("тип".into(), vec![alt(&["%"]), alt(&["!"]), alt(&["$"])]),
        ("тело".into(), vec![alt(&["begin", "оператор_список", "end"])]),
        (
            "оператор_список".into(),
            vec![alt(&["оператор", ";", "оператор_список"]), alt(&["оператор"])],
        ),
        (
            "оператор".into(),
            vec![
                alt(&["составной"]),
                alt(&["присваивания"]),
                alt(&["условный"]),
                alt(&["фиксированного_цикла"]),
                alt(&["условного_цикла"]),
                alt(&["ввода"]),
                alt(&["вывода"]),
            ],
        ),
        ("составной".into(), vec![alt(&["begin", "оператор_список", "end"])]),
        ("присваивания".into(), vec![alt(&[IDENTIFIER, "ass", "выражение"])]),
        (
            "условный".into(),
            vec![
                alt(&["if", "выражение", "then", "оператор", "else", "оператор"]),
                alt(&["if", "выражение", "then", "оператор"]),
            ],
        ),
        (
            "фиксированного_цикла".into(),
            vec![alt(&["for", "присваивания", "to", "выражение", "do", "оператор"])],
        ),
        ("условного_цикла".into(), vec![alt(&["while", "выражение", "do", "оператор"])]),
        ("ввода".into(), vec![alt(&["read", "(", IDENTIFIER, "ввода_хвост", ")"])]),
        ("ввода_хвост".into(), vec![alt(&[",", IDENTIFIER, "ввода_хвост"]), alt(&[])]),
        ("вывода".into(), vec![alt(&["write", "(", "выражение", "вывода_хвост", ")"])]),
        ("вывода_хвост".into(), vec![alt(&[",", "выражение", "вывода_хвост"]), alt(&[])]),
        ("выражение".into(), vec![alt(&["операнд", "операции_отношения"])]),
        (
            "операции_отношения".into(),
            vec![alt(&["операция_отношения", "операнд", "операции_отношения"]), alt(&[])],
        ),
        ("операнд".into(), vec![alt(&["слагаемое", "операции_сложения"])]),
        (
            "операции_сложения".into(),
            vec![alt(&["операция_сложения", "слагаемое", "операции_сложения"]), alt(&[])],
        ),
        ("слагаемое".into(), vec![alt(&["множитель", "операции_умножения"])]),
        (
            "операции_умножения".into(),
            vec![alt(&["операция_умножения", "множитель", "операции_умножения"]), alt(&[])],
        ),
        (
            "множитель".into(),
            vec![
                alt(&[IDENTIFIER]),
                alt(&[NUMBER]),
                alt(&["логическая_константа"]),
                alt(&["унарная_операция", "множитель"]),
                alt(&["(", "выражение", ")"]),
            ],
        ),
        ("логическая_константа".into(), vec![alt(&["true"]), alt(&["false"])]),
        ("операция_отношения".into(), op_alternatives(RELATIONSHIP_OPS)),
        ("операция_сложения".into(), op_alternatives(ADDITION_OPS)),
        ("операция_умножения".into(), op_alternatives(MULTIPLICATION_OPS)),
        ("унарная_операция".into(), op_alternatives(UNARY_OPS)),
    ];

    let nonterminals: Vec<String> = productions.iter().map(|(name, _)| name.clone()).collect();

    let mut terminal_set = std::collections::HashSet::new();
    for (_, alts) in &productions {
        for rhs in alts {
            for sym in rhs {
                if !nonterminals.contains(sym) {
                    terminal_set.insert(sym.clone());
                }
            }
        }
    }
    let mut terminals: Vec<String> = terminal_set.into_iter().collect();
    terminals.sort();

    GrammarDescriptor {
        nonterminals,
        terminals,
        start_symbol: "программа".to_string(),
        productions,
    }
}

/// A [`Normalizer`] preconfigured for [`teaching_language_grammar`]: the
/// comma-tailed list nonterminals and the right-recursive operator-tail
/// nonterminals keep an explicit ε-production after stage 4, via the
/// nullable-tail relaxation, instead of being stripped down to their
/// combinatorial non-ε alternatives alone.
pub fn teaching_language_normalizer() -> Normalizer {
    let mut normalizer = Normalizer::new();
    for tail in [
        "описание_хвост",
        "ввода_хвост",
        "вывода_хвост",
        "операции_отношения",
        "операции_сложения",
        "операции_умножения",
    ] {
        normalizer.whitelist_nullable_tail(tail);
    }
    normalizer
}
