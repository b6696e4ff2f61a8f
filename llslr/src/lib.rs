//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! LL(1) and SLR(1) grammar analysis.
//!
//! `llslr` decides whether a context-free grammar is LL(1), SLR(1), both or
//! neither, and recognizes strings with the matching table-driven engine:
//!  * **[`PredictiveParser`]**: top-down, driven by the LL(1) table
//!  * **[`ShiftReduceParser`]**: bottom-up, driven by the SLR(1) ACTION/GOTO
//!    tables built over the canonical LR(0) collection
//!
//! The core works on explicitly tagged [`Symbol`]s and never parses text; the
//! `llslr-repl` crate maps a one-character-per-symbol notation onto them.
//!
//! # Example
//! ```
//! use llslr::{Analysis, Grammar, Symbol};
//!
//! let mut g = Grammar::new("S");
//! g.add_production("S", [vec![Symbol::t("a"), Symbol::nt("S"), Symbol::t("b")], vec![]]);
//! let analysis = Analysis::new(g).unwrap();
//! let class = analysis.classification();
//! assert!(class.ll1 && class.slr1);
//!
//! let ab = [Symbol::t("a"), Symbol::t("b")];
//! assert!(analysis.predictive_parser().unwrap().parse(&ab));
//! assert!(analysis.shift_reduce_parser().unwrap().parse(&ab));
//! ```

pub mod analysis;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod ll1;
pub mod lr0;
pub mod predictive;
pub mod recognizer;
pub mod report;
pub mod shift_reduce;
pub mod slr;
pub mod symbol;

pub use analysis::{Analysis, Classification};
pub use error::{ConflictKind, EngineError, GrammarError, Ll1Conflict, SlrConflict, SlrError};
pub use first_follow::{FirstFollow, SymbolSet, compute_first_follow};
pub use grammar::{AugmentedGrammar, Grammar, Production};
pub use ll1::{Ll1Table, build_ll1_table, collect_ll1_conflicts};
pub use lr0::{Automaton, Item, ItemSet};
pub use predictive::PredictiveParser;
pub use recognizer::Recognizer;
pub use shift_reduce::{ParseStats, ShiftReduceParser, Trace, TraceStep};
pub use slr::{
    Action, SlrTables, build_slr1_tables, collect_slr1_conflicts, collect_slr1_conflicts_in,
};
pub use symbol::{Symbol, SymbolKind};
