//! llparse: a grammar-normalization and LL(1) parsing toolkit for a small
//! imperative teaching language.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools"
//! (2nd Edition). Addison-Wesley, 2006.

mod cli;
mod error;
mod first_follow;
mod fixtures;
mod grammar;
mod ll1;
mod normalize;
mod parser;
mod source;
mod symbol;
mod token;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    cli::init_logging(args.verbose);

    if let Err(e) = cli::run(args) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
