//! Table-driven top-down recognizer for LL(1) grammars.

use crate::ll1::Ll1Table;
use crate::recognizer::Recognizer;
use crate::symbol::{Symbol, display_sequence};

/// Recognizes strings with a stack of grammar symbols and one symbol of
/// lookahead. Borrows its table; any number of parsers may share one.
#[derive(Clone, Copy, Debug)]
pub struct PredictiveParser<'t> {
    table: &'t Ll1Table,
}

impl<'t> PredictiveParser<'t> {
    pub fn new(table: &'t Ll1Table) -> Self {
        PredictiveParser { table }
    }

    pub fn table(&self) -> &'t Ll1Table {
        self.table
    }

    /// Returns `true` iff `input` is a sentence of the grammar.
    ///
    /// `input` holds terminals only; the end-marker is appended here. Any
    /// other symbol in the input rejects it.
    pub fn parse(&self, input: &[Symbol]) -> bool {
        if let Some(bad) = input.iter().find(|s| !s.is_terminal()) {
            log::trace!("`{}` is not an input symbol", bad);
            return false;
        }
        let input: Vec<Symbol> = input
            .iter()
            .cloned()
            .chain(std::iter::once(Symbol::EndMarker))
            .collect();

        let mut stack = vec![Symbol::EndMarker, Symbol::nt(self.table.start())];
        let mut cursor = 0;
        while let Some(top) = stack.pop() {
            let current = &input[cursor];
            if log::log_enabled!(log::Level::Trace) {
                dump_state(&stack, &top, &input[cursor..]);
            }
            match top {
                Symbol::EndMarker => return current.is_end_marker(),
                Symbol::Terminal(_) => {
                    if &top != current {
                        log::trace!("expected `{}`, found `{}`", top, current);
                        return false;
                    }
                    cursor += 1;
                }
                Symbol::Nonterminal(ref name) => {
                    let Some(prod) = self.table.entry(name, current) else {
                        log::trace!("no entry for [{}, {}]", name, current);
                        return false;
                    };
                    log::trace!("Expand {}", prod);
                    stack.extend(prod.body().iter().rev().cloned());
                }
                // Never pushed: epsilon alternatives have an empty body.
                Symbol::Epsilon => {}
            }
        }
        false
    }
}

impl Recognizer for PredictiveParser<'_> {
    fn parse(&self, input: &[Symbol]) -> bool {
        PredictiveParser::parse(self, input)
    }
}

fn dump_state(stack: &[Symbol], top: &Symbol, remaining: &[Symbol]) {
    log::trace!(
        "[{} <- {}]  {}",
        display_sequence(stack),
        top,
        display_sequence(remaining)
    );
}
