//! FIRST and FOLLOW sets.
//!
//! Both are computed by monotone fixed-point iteration over the grammar's
//! productions: every pass only adds symbols, and iteration stops after the
//! first pass in which no set grew. Since every set is a subset of the finite
//! alphabet, this terminates.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use indexmap::IndexMap;
use smartstring::alias::String;
use std::collections::BTreeSet;

/// A set of grammar symbols, ordered for deterministic iteration.
pub type SymbolSet = BTreeSet<Symbol>;

type SetMap = IndexMap<String, SymbolSet>;

/// FIRST and FOLLOW sets of every nonterminal of a grammar.
///
/// FIRST sets hold terminals and possibly [`Symbol::Epsilon`]; FOLLOW sets
/// hold terminals and possibly [`Symbol::EndMarker`]. Built once by
/// [`FirstFollow::compute`], immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirstFollow {
    first: SetMap,
    follow: SetMap,
    first_passes: usize,
    follow_passes: usize,
}

/// Computes FIRST and FOLLOW for `grammar`.
pub fn compute_first_follow(grammar: &Grammar) -> FirstFollow {
    FirstFollow::compute(grammar)
}

impl FirstFollow {
    pub fn compute(grammar: &Grammar) -> Self {
        let mut first = empty_sets(grammar);
        let mut first_passes = 1;
        while first_pass(grammar, &mut first) {
            first_passes += 1;
        }

        let mut follow = empty_sets(grammar);
        if let Some(set) = follow.get_mut(grammar.start()) {
            set.insert(Symbol::EndMarker);
        }
        let mut follow_passes = 1;
        while follow_pass(grammar, &first, &mut follow) {
            follow_passes += 1;
        }

        log::debug!(
            "FIRST converged after {} passes, FOLLOW after {} passes ({} nonterminals)",
            first_passes,
            follow_passes,
            first.len()
        );

        FirstFollow {
            first,
            follow,
            first_passes,
            follow_passes,
        }
    }

    /// FIRST of an arbitrary symbol sequence; `{ε}` for the empty sequence.
    pub fn first(&self, symbols: &[Symbol]) -> SymbolSet {
        sequence_first(&self.first, symbols)
    }

    /// The cached FIRST set of `nonterminal`.
    pub fn first_of(&self, nonterminal: &str) -> Option<&SymbolSet> {
        self.first.get(nonterminal)
    }

    /// The FOLLOW set of `nonterminal`.
    pub fn follow(&self, nonterminal: &str) -> Option<&SymbolSet> {
        self.follow.get(nonterminal)
    }

    /// Whether `nonterminal` derives the empty string.
    pub fn nullable(&self, nonterminal: &str) -> bool {
        self.first_of(nonterminal)
            .is_some_and(|set| set.contains(&Symbol::Epsilon))
    }

    /// All FIRST sets in nonterminal declaration order.
    pub fn first_sets(&self) -> impl Iterator<Item = (&str, &SymbolSet)> {
        self.first.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All FOLLOW sets in nonterminal declaration order.
    pub fn follow_sets(&self) -> impl Iterator<Item = (&str, &SymbolSet)> {
        self.follow.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of passes the FIRST and FOLLOW fixed points took, counting the
    /// final pass that changed nothing.
    pub fn passes(&self) -> (usize, usize) {
        (self.first_passes, self.follow_passes)
    }
}

fn empty_sets(grammar: &Grammar) -> SetMap {
    grammar
        .nonterminals()
        .iter()
        .map(|nt| (nt.clone(), SymbolSet::new()))
        .collect()
}

/// Walks `symbols` left to right. A terminal contributes itself and stops the
/// walk; a nonterminal contributes its FIRST set minus ε and lets the walk
/// continue only if it is nullable. A walk that is never stopped adds ε.
fn sequence_first(first: &SetMap, symbols: &[Symbol]) -> SymbolSet {
    let mut out = SymbolSet::new();
    for sym in symbols {
        match sym {
            Symbol::Terminal(_) | Symbol::EndMarker => {
                out.insert(sym.clone());
                return out;
            }
            Symbol::Epsilon => {}
            Symbol::Nonterminal(name) => {
                let Some(set) = first.get(name.as_str()) else {
                    return out;
                };
                out.extend(set.iter().filter(|s| !s.is_epsilon()).cloned());
                if !set.contains(&Symbol::Epsilon) {
                    return out;
                }
            }
        }
    }
    out.insert(Symbol::Epsilon);
    out
}

fn merge(into: &mut SymbolSet, from: impl IntoIterator<Item = Symbol>) -> bool {
    let mut changed = false;
    for sym in from {
        changed |= into.insert(sym);
    }
    changed
}

/// One pass of the FIRST fixed point. Returns `true` if any set grew.
fn first_pass(grammar: &Grammar, first: &mut SetMap) -> bool {
    let mut changed = false;
    for prod in grammar.productions() {
        let f = sequence_first(first, prod.rhs());
        if let Some(set) = first.get_mut(prod.lhs()) {
            changed |= merge(set, f);
        }
    }
    changed
}

/// One pass of the FOLLOW fixed point. Returns `true` if any set grew.
fn follow_pass(grammar: &Grammar, first: &SetMap, follow: &mut SetMap) -> bool {
    let mut changed = false;
    for prod in grammar.productions() {
        let body = prod.body();
        for (i, sym) in body.iter().enumerate() {
            let Symbol::Nonterminal(x) = sym else {
                continue;
            };
            let beta = sequence_first(first, &body[i + 1..]);
            let beta_nullable = beta.contains(&Symbol::Epsilon);
            let mut add: SymbolSet = beta.into_iter().filter(|s| !s.is_epsilon()).collect();
            if beta_nullable {
                if let Some(lhs_follow) = follow.get(prod.lhs()) {
                    add.extend(lhs_follow.iter().cloned());
                }
            }
            if let Some(set) = follow.get_mut(x.as_str()) {
                changed |= merge(set, add);
            }
        }
    }
    changed
}
