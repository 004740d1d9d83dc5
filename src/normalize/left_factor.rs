//! Stage 6: left factoring.

use crate::error::Result;
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;

fn longest_common_prefix(sequences: &[Vec<Symbol>]) -> Vec<Symbol> {
    let Some(first) = sequences.first() else {
        return Vec::new();
    };
    let mut prefix = first.clone();
    for seq in &sequences[1..] {
        let mut i = 0;
        while i < prefix.len().min(seq.len()) && prefix[i] == seq[i] {
            i += 1;
        }
        prefix.truncate(i);
        if prefix.is_empty() {
            break;
        }
    }
    prefix
}

/// Groups `bodies` by leading symbol (`None` for ε), preserving first-seen
/// order so the scan below is deterministic.
fn group_by_prefix_symbol(bodies: &[Vec<Symbol>]) -> Vec<(Option<Symbol>, Vec<Vec<Symbol>>)> {
    let mut groups: Vec<(Option<Symbol>, Vec<Vec<Symbol>>)> = Vec::new();
    for body in bodies {
        let key = body.first().copied();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.push(body.clone()),
            None => groups.push((key, vec![body.clone()])),
        }
    }
    groups
}

pub(crate) fn run(grammar: &mut Grammar) -> Result<()> {
    let mut counter: u32 = 0;
    let mut total_factored = 0usize;

    loop {
        let mut nonterminals: Vec<Symbol> = grammar.nonterminals().iter().copied().collect();
        grammar.table().sort_by_name(&mut nonterminals);

        let mut changed = false;
        for a in nonterminals {
            let bodies: Vec<Vec<Symbol>> = grammar.productions_of(a).iter().map(|p| p.rhs.clone()).collect();
            if bodies.len() < 2 {
                continue;
            }

            for (_, group) in group_by_prefix_symbol(&bodies) {
                if group.len() < 2 {
                    continue;
                }
                let prefix = longest_common_prefix(&group);
                if prefix.is_empty() {
                    continue;
                }

                let base_name = format!("{}_fact", grammar.table().name(a.id().unwrap()));
                let plen = prefix.len();
                let suffixes: Vec<Vec<Symbol>> = group.iter().map(|body| body[plen..].to_vec()).collect();

                let new_nt = grammar.add_fresh_nonterminal(&base_name, &mut counter, |sym| {
                    suffixes
                        .iter()
                        .map(|suffix| Production::new(sym, suffix.clone()))
                        .collect()
                })?;

                let mut new_a_bodies: Vec<Vec<Symbol>> =
                    bodies.iter().filter(|body| !group.contains(body)).cloned().collect();
                let mut factored_prefix = prefix;
                factored_prefix.push(new_nt);
                new_a_bodies.push(factored_prefix);

                grammar.replace_productions(
                    a,
                    new_a_bodies.into_iter().map(|rhs| Production::new(a, rhs)).collect(),
                )?;

                changed = true;
                total_factored += 1;
                break;
            }
            if changed {
                break;
            }
        }

        if !changed {
            break;
        }
    }

    log::info!("stage 6: introduced {total_factored} left-factoring nonterminal(s)");
    Ok(())
}
