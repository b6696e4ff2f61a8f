//! Error types reported by grammar validation, table construction and the
//! shift-reduce engine.
//!
//! None of these are process-fatal. A conflict is the *answer* to "is this
//! grammar LL(1) / SLR(1)?", and a rejected input string is not an error at
//! all: the engines simply return `false`.

use crate::grammar::Production;
use crate::slr::Action;
use crate::symbol::Symbol;
use smartstring::alias::String;
use thiserror::Error;

/// Reasons a grammar is rejected before any table is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A nonterminal occurs in some right-hand side but has no productions.
    #[error("nonterminal `{nonterminal}` is used in `{production}` but has no productions")]
    UndefinedNonterminal {
        nonterminal: String,
        production: Production,
    },

    /// The declared start symbol has no productions.
    #[error("start symbol `{start}` has no productions")]
    MissingStart { start: String },

    /// The end-marker was written inside a right-hand side.
    #[error("reserved symbol `{symbol}` may not appear in `{production}`")]
    ReservedSymbol {
        symbol: Symbol,
        production: Production,
    },

    /// The same name is used both as a terminal and as a nonterminal.
    #[error("`{name}` is used both as a terminal and as a nonterminal")]
    AmbiguousSymbol { name: String },
}

/// Two alternatives of one nonterminal claim the same LL(1) table cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "LL(1) conflict at [{nonterminal}, {lookahead}]: `{existing}` versus `{incoming}`"
)]
pub struct Ll1Conflict {
    pub nonterminal: String,
    pub lookahead: Symbol,
    /// The alternative already in the cell.
    pub existing: Production,
    /// The alternative that tried to claim it.
    pub incoming: Production,
}

/// Kinds of SLR(1) ACTION-table conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
    /// Two shifts on the same cell leading to different states.
    ShiftShift,
}

impl ConflictKind {
    /// Classifies a clash between two distinct actions.
    pub fn between(existing: &Action, incoming: &Action) -> Self {
        match (existing, incoming) {
            (Action::Shift(_), Action::Shift(_)) => ConflictKind::ShiftShift,
            (Action::Reduce(_), Action::Reduce(_)) => ConflictKind::ReduceReduce,
            _ => ConflictKind::ShiftReduce,
        }
    }

    pub fn to_str(self) -> &'static str {
        match self {
            ConflictKind::ShiftReduce => "shift/reduce",
            ConflictKind::ReduceReduce => "reduce/reduce",
            ConflictKind::ShiftShift => "shift/shift",
        }
    }
}

/// Two different actions claim the same ACTION cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{} conflict in state {state} on `{symbol}`: {existing} versus {incoming}",
    .kind.to_str()
)]
pub struct SlrConflict {
    pub kind: ConflictKind,
    pub state: usize,
    pub symbol: Symbol,
    pub existing: Action,
    pub incoming: Action,
}

/// Failure of an SLR(1) table build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlrError {
    /// The grammar is not SLR(1).
    #[error(transparent)]
    Conflict(#[from] SlrConflict),

    /// GOTO received two different targets for the same cell. This cannot
    /// happen for a deterministic LR(0) automaton and points at a defect in
    /// the builder, not at the grammar.
    #[error("GOTO[{state}, {nonterminal}] set to both {existing} and {incoming}")]
    GotoMismatch {
        state: usize,
        nonterminal: String,
        existing: usize,
        incoming: usize,
    },

    /// A transition target is missing from the canonical collection.
    #[error("state {state} has no registered successor on `{symbol}`")]
    MissingState { state: usize, symbol: Symbol },
}

impl SlrError {
    /// Returns the conflict if this error is a grammar property rather than
    /// an internal inconsistency.
    pub fn conflict(&self) -> Option<&SlrConflict> {
        match self {
            SlrError::Conflict(conflict) => Some(conflict),
            _ => None,
        }
    }
}

/// Internal errors raised while driving the shift-reduce engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A reduction tried to pop past the base state.
    #[error("stack underflow reducing `{production}`: need {needed} states, have {available}")]
    StackUnderflow {
        production: Production,
        needed: usize,
        available: usize,
    },

    /// Reductions on one lookahead came back to a configuration they had
    /// already passed through, so they would repeat forever.
    #[error("reductions on `{lookahead}` loop back to state {state} without consuming input")]
    ReductionLoop { state: usize, lookahead: Symbol },
}
