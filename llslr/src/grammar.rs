//! The grammar model: productions, symbol classification and validation.
//!
//! A [`Grammar`] is assembled with [`Grammar::add_production`], checked once
//! with [`Grammar::validate`] and then treated as frozen by every analysis in
//! this crate. The LR(0) path works on an [`AugmentedGrammar`], a separate
//! view that adds the synthetic start production without touching the
//! original grammar.

use crate::error::GrammarError;
use crate::symbol::{Symbol, SymbolKind, display_sequence};
use indexmap::{IndexMap, IndexSet};
use smartstring::alias::String;
use std::fmt;

/// A single production `lhs -> rhs`.
///
/// The right-hand side is kept in normal form: epsilon markers inside a
/// longer sequence are dropped, and an empty sequence becomes the one-element
/// epsilon alternative `[ε]`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Production {
    lhs: String,
    rhs: Vec<Symbol>,
}

impl Production {
    pub fn new(lhs: impl AsRef<str>, rhs: Vec<Symbol>) -> Self {
        let mut rhs: Vec<Symbol> = rhs.into_iter().filter(|s| !s.is_epsilon()).collect();
        if rhs.is_empty() {
            rhs.push(Symbol::Epsilon);
        }
        Production {
            lhs: String::from(lhs.as_ref()),
            rhs,
        }
    }

    /// Builds the epsilon alternative `lhs -> ε`.
    pub fn epsilon(lhs: impl AsRef<str>) -> Self {
        Production::new(lhs, Vec::new())
    }

    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    /// The right-hand side as written, `[ε]` for the epsilon alternative.
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self.rhs.as_slice(), [Symbol::Epsilon])
    }

    /// The symbols a parser actually consumes or pushes: empty for the
    /// epsilon alternative, `rhs()` otherwise.
    pub fn body(&self) -> &[Symbol] {
        if self.is_epsilon() { &[] } else { &self.rhs }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, display_sequence(&self.rhs))
    }
}

/// A context-free grammar.
///
/// Productions are grouped by left-hand side in insertion order; the
/// terminal set is recomputed from the right-hand sides on every change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    start: String,
    nonterminals: IndexSet<String>,
    terminals: IndexSet<String>,
    productions: IndexMap<String, Vec<Production>>,
}

impl Grammar {
    /// Creates an empty grammar with the given start symbol.
    pub fn new(start: impl AsRef<str>) -> Self {
        let start = String::from(start.as_ref());
        let mut nonterminals = IndexSet::new();
        nonterminals.insert(start.clone());
        Grammar {
            start,
            nonterminals,
            terminals: IndexSet::new(),
            productions: IndexMap::new(),
        }
    }

    /// Registers all alternatives of `lhs`, replacing any earlier ones.
    ///
    /// `lhs` and every nonterminal occurring in the alternatives join the
    /// nonterminal set. Duplicate alternatives are kept once.
    pub fn add_production<A>(&mut self, lhs: impl AsRef<str>, alternatives: A)
    where
        A: IntoIterator<Item = Vec<Symbol>>,
    {
        let lhs = String::from(lhs.as_ref());
        let mut prods: Vec<Production> = Vec::new();
        for rhs in alternatives {
            let prod = Production::new(&lhs, rhs);
            if !prods.contains(&prod) {
                prods.push(prod);
            }
        }
        self.nonterminals.insert(lhs.clone());
        for prod in &prods {
            for sym in prod.rhs() {
                if let Symbol::Nonterminal(name) = sym {
                    self.nonterminals.insert(name.clone());
                }
            }
        }
        self.productions.insert(lhs, prods);
        self.recompute_terminals();
    }

    fn recompute_terminals(&mut self) {
        self.terminals = self
            .productions
            .values()
            .flatten()
            .flat_map(|p| p.rhs().iter())
            .filter_map(|sym| match sym {
                Symbol::Terminal(name) if !self.nonterminals.contains(name.as_str()) => {
                    Some(name.clone())
                }
                _ => None,
            })
            .collect();
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// The start symbol as a [`Symbol`].
    pub fn start_symbol(&self) -> Symbol {
        Symbol::Nonterminal(self.start.clone())
    }

    pub fn nonterminals(&self) -> &IndexSet<String> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &IndexSet<String> {
        &self.terminals
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.nonterminals.contains(name)
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    /// Classifies a symbol against this grammar's nonterminal set.
    ///
    /// A named symbol is a nonterminal only if it is tagged as one and
    /// declared; anything else that is not a marker is a terminal.
    pub fn classify(&self, symbol: &Symbol) -> SymbolKind {
        match symbol {
            Symbol::Nonterminal(name) if self.nonterminals.contains(name.as_str()) => {
                SymbolKind::Nonterminal
            }
            Symbol::Nonterminal(_) | Symbol::Terminal(_) => SymbolKind::Terminal,
            Symbol::Epsilon => SymbolKind::Epsilon,
            Symbol::EndMarker => SymbolKind::EndMarker,
        }
    }

    /// The alternatives of `nonterminal`, empty if it has none.
    pub fn alternatives(&self, nonterminal: &str) -> &[Production] {
        self.productions
            .get(nonterminal)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_productions(&self, nonterminal: &str) -> bool {
        !self.alternatives(nonterminal).is_empty()
    }

    /// All productions, grouped by left-hand side in insertion order.
    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.productions.values().flatten()
    }

    /// Checks that the grammar can be analysed.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if !self.has_productions(&self.start) {
            return Err(GrammarError::MissingStart {
                start: self.start.clone(),
            });
        }
        for prod in self.productions() {
            for sym in prod.rhs() {
                match sym {
                    Symbol::EndMarker => {
                        return Err(GrammarError::ReservedSymbol {
                            symbol: sym.clone(),
                            production: prod.clone(),
                        });
                    }
                    Symbol::Terminal(name) if self.nonterminals.contains(name.as_str()) => {
                        return Err(GrammarError::AmbiguousSymbol { name: name.clone() });
                    }
                    Symbol::Nonterminal(name) if !self.has_productions(name) => {
                        return Err(GrammarError::UndefinedNonterminal {
                            nonterminal: name.clone(),
                            production: prod.clone(),
                        });
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Builds the augmented view used by the LR(0) automaton.
    pub fn augment(&self) -> AugmentedGrammar<'_> {
        AugmentedGrammar::new(self)
    }
}

/// A grammar extended with the synthetic production `Z -> S`.
///
/// The original grammar is borrowed, never modified. Productions get stable
/// indices: index `0` is always the synthetic start production, the rest
/// follow the grammar's own order.
#[derive(Debug)]
pub struct AugmentedGrammar<'g> {
    grammar: &'g Grammar,
    start: String,
    productions: IndexSet<Production>,
    by_lhs: IndexMap<String, Vec<usize>>,
}

impl<'g> AugmentedGrammar<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        let mut start = String::from("Z");
        while grammar.is_nonterminal(&start) || grammar.is_terminal(&start) {
            start.push('\'');
        }

        let mut productions = IndexSet::new();
        productions.insert(Production::new(&start, vec![grammar.start_symbol()]));
        productions.extend(grammar.productions().cloned());

        let mut by_lhs: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (i, prod) in productions.iter().enumerate() {
            by_lhs.entry(String::from(prod.lhs())).or_default().push(i);
        }

        AugmentedGrammar {
            grammar,
            start,
            productions,
            by_lhs,
        }
    }

    /// The original grammar.
    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Name of the synthetic start nonterminal.
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn productions(&self) -> &IndexSet<Production> {
        &self.productions
    }

    /// The production with index `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range; indices come from this view.
    pub fn production(&self, index: usize) -> &Production {
        &self.productions[index]
    }

    /// Indices of the productions of `nonterminal`.
    pub fn productions_of(&self, nonterminal: &str) -> &[usize] {
        self.by_lhs
            .get(nonterminal)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The symbols the automaton transitions on, in traversal order:
    /// terminals, the end-marker, then nonterminals.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.grammar
            .terminals()
            .iter()
            .map(|t| Symbol::Terminal(t.clone()))
            .chain(std::iter::once(Symbol::EndMarker))
            .chain(
                self.grammar
                    .nonterminals()
                    .iter()
                    .map(|n| Symbol::Nonterminal(n.clone())),
            )
            .collect()
    }
}
