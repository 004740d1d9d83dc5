//! Command-line entry points: `check`/`table`/`parse` subcommands over a
//! grammar-descriptor file, with `-v`/`-vv` verbosity flags feeding `log`.

use crate::error::Result;
use crate::first_follow::{compute_first_sets, compute_follow_sets};
use crate::grammar::Grammar;
use crate::ll1::{LL1BuildMode, LL1Table};
use crate::normalize::Normalizer;
use crate::parser::PredictiveParser;
use crate::source;
use crate::token::{Token, TokenStream};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

/// A grammar-normalization and LL(1) parsing toolkit.
#[derive(Parser)]
#[command(name = "llparse", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the normalization pipeline and print the resulting rule set.
    Check {
        /// Path to a grammar-descriptor text file.
        grammar_file: PathBuf,
    },
    /// Normalize, then build and print the LL(1) parse table.
    Table {
        grammar_file: PathBuf,
        /// Record every table conflict instead of aborting on the first.
        #[arg(long)]
        diagnostic_ll1: bool,
    },
    /// Normalize, build the table, and parse a token stream.
    Parse {
        grammar_file: PathBuf,
        /// One token per line: `terminal` or `terminal lexeme`.
        tokens_file: PathBuf,
        #[arg(long)]
        diagnostic_ll1: bool,
    },
}

/// Configures `env_logger` from `-v`/`-vv`.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Check { grammar_file } => check(&grammar_file),
        Command::Table {
            grammar_file,
            diagnostic_ll1,
        } => table(&grammar_file, diagnostic_ll1),
        Command::Parse {
            grammar_file,
            tokens_file,
            diagnostic_ll1,
        } => parse(&grammar_file, &tokens_file, diagnostic_ll1),
    }
}

fn load_grammar(path: &PathBuf) -> Result<Grammar> {
    let text = fs::read_to_string(path)?;
    let descriptor = source::parse(&text)?;
    Grammar::from_descriptor(&descriptor)
}

fn normalize(grammar: &mut Grammar) -> Result<()> {
    let normalizer = Normalizer::new();
    normalizer.normalize(grammar)
}

fn check(grammar_file: &PathBuf) -> Result<()> {
    let mut grammar = load_grammar(grammar_file)?;
    normalize(&mut grammar)?;
    println!("{grammar}");
    Ok(())
}

fn build_table(grammar_file: &PathBuf, diagnostic_ll1: bool) -> Result<(Grammar, LL1Table)> {
    let mut grammar = load_grammar(grammar_file)?;
    normalize(&mut grammar)?;

    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);
    let mode = if diagnostic_ll1 {
        LL1BuildMode::Diagnostic
    } else {
        LL1BuildMode::Abort
    };
    let table = LL1Table::build(&grammar, &first_sets, &follow_sets, mode)?;
    Ok((grammar, table))
}

fn table(grammar_file: &PathBuf, diagnostic_ll1: bool) -> Result<()> {
    let (grammar, table) = build_table(grammar_file, diagnostic_ll1)?;

    if let Some(conflicts) = table.conflicts() {
        for conflict in conflicts {
            println!(
                "conflict at M[{}, {}]: kept {}, discarded {}",
                grammar.table().display(conflict.nonterminal),
                grammar.table().display(conflict.lookahead),
                conflict.kept.display(grammar.table()),
                conflict.discarded.display(grammar.table()),
            );
        }
    }
    print!("{}", table.render(grammar.table()));
    Ok(())
}

fn parse(grammar_file: &PathBuf, tokens_file: &PathBuf, diagnostic_ll1: bool) -> Result<()> {
    let (grammar, table) = build_table(grammar_file, diagnostic_ll1)?;

    let text = fs::read_to_string(tokens_file)?;
    let tokens = read_tokens(&text);
    let mut stream = TokenStream::new(tokens);

    let parser = PredictiveParser::new(&grammar, &table);
    let derivation = parser.parse(&mut stream)?;

    for (nonterminal, production) in derivation {
        println!(
            "{} -> {}",
            grammar.table().display(nonterminal),
            production.display(grammar.table())
        );
    }
    Ok(())
}

fn read_tokens(text: &str) -> Vec<Token> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((terminal, lexeme)) => Token::new(terminal.to_string(), Some(lexeme.trim().to_string())),
            None => Token::literal(line.to_string()),
        })
        .collect()
}
