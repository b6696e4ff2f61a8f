//! One-stop analysis of a validated grammar.
//!
//! [`Analysis`] owns the grammar and its FIRST/FOLLOW sets and builds the
//! LR(0) automaton, each parsing table and each conflict list at most once,
//! on first use. All cached state is read-only
//! afterwards, so an `Analysis` can be shared by reference between threads
//! and any number of parsers.

use crate::error::{GrammarError, Ll1Conflict, SlrConflict, SlrError};
use crate::first_follow::FirstFollow;
use crate::grammar::Grammar;
use crate::ll1::{Ll1Table, collect_ll1_conflicts};
use crate::lr0::Automaton;
use crate::predictive::PredictiveParser;
use crate::shift_reduce::ShiftReduceParser;
use crate::slr::{SlrTables, collect_slr1_conflicts_in};
use once_cell::sync::OnceCell;

/// Which deterministic parsing methods a grammar admits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Classification {
    pub ll1: bool,
    pub slr1: bool,
}

impl Classification {
    pub fn is_deterministic(&self) -> bool {
        self.ll1 || self.slr1
    }
}

#[derive(Debug)]
pub struct Analysis {
    grammar: Grammar,
    first_follow: FirstFollow,
    automaton: OnceCell<Automaton>,
    ll1: OnceCell<Result<Ll1Table, Ll1Conflict>>,
    slr: OnceCell<Result<SlrTables, SlrError>>,
    ll1_conflicts: OnceCell<Vec<Ll1Conflict>>,
    slr1_conflicts: OnceCell<Result<Vec<SlrConflict>, SlrError>>,
}

impl Analysis {
    /// Validates `grammar` and computes its FIRST and FOLLOW sets.
    pub fn new(grammar: Grammar) -> Result<Self, GrammarError> {
        grammar.validate()?;
        let first_follow = FirstFollow::compute(&grammar);
        Ok(Analysis {
            grammar,
            first_follow,
            automaton: OnceCell::new(),
            ll1: OnceCell::new(),
            slr: OnceCell::new(),
            ll1_conflicts: OnceCell::new(),
            slr1_conflicts: OnceCell::new(),
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn first_follow(&self) -> &FirstFollow {
        &self.first_follow
    }

    /// The canonical LR(0) collection of the augmented grammar.
    pub fn automaton(&self) -> &Automaton {
        self.automaton
            .get_or_init(|| Automaton::build(&self.grammar.augment()))
    }

    /// The LL(1) table, or the first conflict that prevents it.
    pub fn ll1_table(&self) -> Result<&Ll1Table, Ll1Conflict> {
        self.ll1
            .get_or_init(|| Ll1Table::build(&self.grammar, &self.first_follow))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The SLR(1) tables, or the first conflict that prevents them.
    pub fn slr_tables(&self) -> Result<&SlrTables, SlrError> {
        self.slr
            .get_or_init(|| {
                SlrTables::with_automaton(&self.grammar, self.automaton().clone(), &self.first_follow)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn classification(&self) -> Classification {
        let ll1 = self.ll1_table().is_ok();
        let slr1 = match self.slr_tables() {
            Ok(_) => true,
            Err(SlrError::Conflict(_)) => false,
            Err(e) => {
                log::error!("{}", e);
                false
            }
        };
        log::debug!("classification: LL(1) {}, SLR(1) {}", ll1, slr1);
        Classification { ll1, slr1 }
    }

    pub fn predictive_parser(&self) -> Result<PredictiveParser<'_>, Ll1Conflict> {
        self.ll1_table().map(Ll1Table::parser)
    }

    pub fn shift_reduce_parser(&self) -> Result<ShiftReduceParser<'_>, SlrError> {
        self.slr_tables().map(SlrTables::parser)
    }

    /// Every LL(1) conflict of the grammar.
    pub fn ll1_conflicts(&self) -> &[Ll1Conflict] {
        self.ll1_conflicts.get_or_init(|| match self.ll1_table() {
            Ok(_) => Vec::new(),
            Err(_) => collect_ll1_conflicts(&self.grammar, &self.first_follow),
        })
    }

    /// Every SLR(1) conflict of the grammar.
    pub fn slr1_conflicts(&self) -> Result<&[SlrConflict], SlrError> {
        self.slr1_conflicts
            .get_or_init(|| match self.slr_tables() {
                Ok(_) => Ok(Vec::new()),
                Err(SlrError::Conflict(_)) => {
                    collect_slr1_conflicts_in(&self.grammar, self.automaton(), &self.first_follow)
                }
                Err(e) => Err(e),
            })
            .as_deref()
            .map_err(Clone::clone)
    }
}
