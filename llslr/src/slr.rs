//! SLR(1) ACTION and GOTO tables.
//!
//! The tables combine the LR(0) automaton with FOLLOW sets. Building them is
//! the SLR(1) test: a grammar is SLR(1) iff no ACTION cell receives two
//! different actions.

use crate::error::{ConflictKind, SlrConflict, SlrError};
use crate::first_follow::FirstFollow;
use crate::grammar::{AugmentedGrammar, Grammar, Production};
use crate::lr0::{Automaton, Item};
use crate::shift_reduce::ShiftReduceParser;
use crate::symbol::Symbol;
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use smartstring::alias::String;
use std::fmt;

/// An ACTION table entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Consume the lookahead and push the given state.
    Shift(usize),
    /// Pop the production body and take GOTO on its left-hand side.
    Reduce(Production),
    /// Stop with success.
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "shift {}", state),
            Action::Reduce(prod) => write!(f, "reduce {}", prod),
            Action::Accept => f.write_str("accept"),
        }
    }
}

/// What to do when a cell that already holds `existing` receives `incoming`.
#[derive(Debug, PartialEq, Eq)]
enum Resolution {
    Keep,
    Replace,
    Conflict(ConflictKind),
}

/// Accept is never overwritten and silently beats a competing reduce, in
/// either order. Any other pair of distinct actions is a conflict.
fn resolve(existing: &Action, incoming: &Action) -> Resolution {
    if existing == incoming {
        return Resolution::Keep;
    }
    match (existing, incoming) {
        (Action::Accept, Action::Reduce(_)) => Resolution::Keep,
        (Action::Reduce(_), Action::Accept) => Resolution::Replace,
        _ => Resolution::Conflict(ConflictKind::between(existing, incoming)),
    }
}

/// Conflict-free SLR(1) tables together with the states they index.
#[derive(Clone, Debug)]
pub struct SlrTables {
    start: String,
    terminals: IndexSet<String>,
    nonterminals: IndexSet<String>,
    productions: Vec<Production>,
    automaton: Automaton,
    action: IndexMap<(usize, Symbol), Action>,
    goto: IndexMap<(usize, String), usize>,
}

/// Builds SLR(1) tables, stopping at the first conflict.
pub fn build_slr1_tables(grammar: &Grammar, ff: &FirstFollow) -> Result<SlrTables, SlrError> {
    SlrTables::build(grammar, ff)
}

/// Runs the same construction as [`build_slr1_tables`] but records every
/// conflict instead of stopping. An empty list means the grammar is SLR(1).
///
/// Internal inconsistencies are still returned as errors.
pub fn collect_slr1_conflicts(
    grammar: &Grammar,
    ff: &FirstFollow,
) -> Result<Vec<SlrConflict>, SlrError> {
    let automaton = Automaton::build(&grammar.augment());
    collect_slr1_conflicts_in(grammar, &automaton, ff)
}

/// [`collect_slr1_conflicts`] over an already built canonical collection of
/// `grammar`.
pub fn collect_slr1_conflicts_in(
    grammar: &Grammar,
    automaton: &Automaton,
    ff: &FirstFollow,
) -> Result<Vec<SlrConflict>, SlrError> {
    let aug = grammar.augment();
    let mut builder = TableBuilder::new(&aug, automaton, ff, true);
    builder.run()?;
    Ok(builder.conflicts)
}

impl SlrTables {
    pub fn build(grammar: &Grammar, ff: &FirstFollow) -> Result<Self, SlrError> {
        let automaton = Automaton::build(&grammar.augment());
        Self::with_automaton(grammar, automaton, ff)
    }

    /// Builds the tables over `automaton`, which must be the canonical
    /// collection of `grammar`.
    pub fn with_automaton(
        grammar: &Grammar,
        automaton: Automaton,
        ff: &FirstFollow,
    ) -> Result<Self, SlrError> {
        let aug = grammar.augment();
        let mut builder = TableBuilder::new(&aug, &automaton, ff, false);
        builder.run()?;
        let TableBuilder { action, goto, .. } = builder;

        log::debug!(
            "SLR(1) tables: {} states, {} ACTION entries, {} GOTO entries",
            automaton.len(),
            action.len(),
            goto.len()
        );
        Ok(SlrTables {
            start: String::from(aug.start()),
            terminals: grammar.terminals().clone(),
            nonterminals: grammar.nonterminals().clone(),
            productions: aug.productions().iter().cloned().collect(),
            automaton,
            action,
            goto,
        })
    }

    /// Name of the synthetic start nonterminal.
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn terminals(&self) -> &IndexSet<String> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &IndexSet<String> {
        &self.nonterminals
    }

    /// Whether `symbol` may appear in the input: a declared terminal or the
    /// end-marker.
    pub fn accepts_symbol(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Terminal(name) => self.terminals.contains(name.as_str()),
            Symbol::EndMarker => true,
            _ => false,
        }
    }

    /// Productions of the augmented grammar; index 0 is `Z -> S`.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// The LR(0) states the tables are indexed by.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn state_count(&self) -> usize {
        self.automaton.len()
    }

    pub fn action(&self, state: usize, symbol: &Symbol) -> Option<&Action> {
        self.action.get(&(state, symbol.clone()))
    }

    pub fn goto(&self, state: usize, nonterminal: &str) -> Option<usize> {
        self.goto.get(&(state, String::from(nonterminal))).copied()
    }

    /// ACTION entries in construction order.
    pub fn actions(&self) -> impl Iterator<Item = (usize, &Symbol, &Action)> {
        self.action.iter().map(|((s, sym), act)| (*s, sym, act))
    }

    /// GOTO entries in construction order.
    pub fn gotos(&self) -> impl Iterator<Item = (usize, &str, usize)> {
        self.goto.iter().map(|((s, nt), to)| (*s, nt.as_str(), *to))
    }

    /// Renders an item of one of the states as `A -> x . y`.
    pub fn display_item(&self, item: &Item) -> std::string::String {
        item.display_in(&self.productions[item.prod])
    }

    /// A shift-reduce recognizer driven by these tables.
    pub fn parser(&self) -> ShiftReduceParser<'_> {
        ShiftReduceParser::new(self)
    }
}

struct TableBuilder<'a, 'g> {
    aug: &'a AugmentedGrammar<'g>,
    automaton: &'a Automaton,
    ff: &'a FirstFollow,
    collect: bool,
    conflicts: Vec<SlrConflict>,
    action: IndexMap<(usize, Symbol), Action>,
    goto: IndexMap<(usize, String), usize>,
}

impl<'a, 'g> TableBuilder<'a, 'g> {
    fn new(
        aug: &'a AugmentedGrammar<'g>,
        automaton: &'a Automaton,
        ff: &'a FirstFollow,
        collect: bool,
    ) -> Self {
        TableBuilder {
            aug,
            automaton,
            ff,
            collect,
            conflicts: Vec::new(),
            action: IndexMap::new(),
            goto: IndexMap::new(),
        }
    }

    fn run(&mut self) -> Result<(), SlrError> {
        let aug = self.aug;
        let automaton = self.automaton;
        for (state, items) in automaton.states().enumerate() {
            for item in items {
                self.item_actions(state, item)?;
            }
            for nt in aug.grammar().nonterminals() {
                let symbol = Symbol::Nonterminal(nt.clone());
                if let Some(target) = automaton.transition(state, &symbol) {
                    self.set_goto(state, nt, target)?;
                }
            }
        }
        Ok(())
    }

    fn item_actions(&mut self, state: usize, item: &Item) -> Result<(), SlrError> {
        let aug = self.aug;
        let ff = self.ff;
        let automaton = self.automaton;
        let prod = aug.production(item.prod);
        match item.next_symbol(aug) {
            None if item.prod == 0 => self.set_action(state, Symbol::EndMarker, Action::Accept),
            None => {
                let Some(follow) = ff.follow(prod.lhs()) else {
                    return Ok(());
                };
                for t in follow {
                    self.set_action(state, t.clone(), Action::Reduce(prod.clone()))?;
                }
                Ok(())
            }
            Some(sym) if sym.is_lookahead() => {
                let target = automaton.transition(state, sym).ok_or_else(|| {
                    SlrError::MissingState {
                        state,
                        symbol: sym.clone(),
                    }
                })?;
                self.set_action(state, sym.clone(), Action::Shift(target))
            }
            Some(_) => Ok(()),
        }
    }

    fn set_action(&mut self, state: usize, symbol: Symbol, incoming: Action) -> Result<(), SlrError> {
        match self.action.entry((state, symbol)) {
            Entry::Vacant(v) => {
                v.insert(incoming);
                Ok(())
            }
            Entry::Occupied(mut o) => match resolve(o.get(), &incoming) {
                Resolution::Keep => Ok(()),
                Resolution::Replace => {
                    o.insert(incoming);
                    Ok(())
                }
                Resolution::Conflict(kind) => {
                    let conflict = SlrConflict {
                        kind,
                        state,
                        symbol: o.key().1.clone(),
                        existing: o.get().clone(),
                        incoming,
                    };
                    log::debug!("{}", conflict);
                    if self.collect {
                        self.conflicts.push(conflict);
                        Ok(())
                    } else {
                        Err(conflict.into())
                    }
                }
            },
        }
    }

    fn set_goto(&mut self, state: usize, nonterminal: &str, target: usize) -> Result<(), SlrError> {
        match self.goto.entry((state, String::from(nonterminal))) {
            Entry::Vacant(v) => {
                v.insert(target);
                Ok(())
            }
            Entry::Occupied(o) if *o.get() == target => Ok(()),
            Entry::Occupied(o) => Err(SlrError::GotoMismatch {
                state,
                nonterminal: String::from(nonterminal),
                existing: *o.get(),
                incoming: target,
            }),
        }
    }
}
