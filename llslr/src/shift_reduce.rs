//! Table-driven bottom-up recognizer for SLR(1) grammars.

use crate::error::EngineError;
use crate::recognizer::Recognizer;
use crate::slr::{Action, SlrTables};
use crate::symbol::{Symbol, display_sequence};

/// Counters collected during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub steps: usize,
    pub shifts: usize,
    pub reductions: usize,
}

/// One step of a traced parse: the configuration before the step and the
/// action taken from it. `action` is `None` for the step that rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub stack: Vec<usize>,
    pub remaining: Vec<Symbol>,
    pub action: Option<Action>,
}

/// The steps of a parse together with its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
    pub accepted: bool,
    pub stats: ParseStats,
}

/// Recognizes strings with a stack of LR(0) state ids and the SLR(1)
/// ACTION/GOTO tables. Borrows its tables; any number of parsers may share
/// them.
#[derive(Clone, Copy, Debug)]
pub struct ShiftReduceParser<'t> {
    tables: &'t SlrTables,
}

impl<'t> ShiftReduceParser<'t> {
    pub fn new(tables: &'t SlrTables) -> Self {
        ShiftReduceParser { tables }
    }

    pub fn tables(&self) -> &'t SlrTables {
        self.tables
    }

    /// Returns `true` iff `input` is a sentence of the grammar.
    ///
    /// An internal engine error is logged and counts as rejection.
    pub fn parse(&self, input: &[Symbol]) -> bool {
        match self.try_parse(input) {
            Ok(accepted) => accepted,
            Err(e) => {
                log::error!("{}", e);
                false
            }
        }
    }

    /// Like [`parse`](Self::parse) but surfaces internal errors.
    pub fn try_parse(&self, input: &[Symbol]) -> Result<bool, EngineError> {
        let mut stats = ParseStats::default();
        self.run(input, &mut stats, None)
    }

    /// Parses `input` and records every step. The verdict is the one
    /// [`try_parse`](Self::try_parse) returns.
    pub fn trace(&self, input: &[Symbol]) -> Result<Trace, EngineError> {
        let mut trace = Trace::default();
        trace.accepted = self.run(input, &mut trace.stats, Some(&mut trace.steps))?;
        Ok(trace)
    }

    fn run(
        &self,
        input: &[Symbol],
        stats: &mut ParseStats,
        mut steps: Option<&mut Vec<TraceStep>>,
    ) -> Result<bool, EngineError> {
        if let Some(bad) = input.iter().find(|s| !s.is_terminal()) {
            log::trace!("`{}` is not an input symbol", bad);
            return Ok(false);
        }
        let input: Vec<Symbol> = input
            .iter()
            .cloned()
            .chain(std::iter::once(Symbol::EndMarker))
            .collect();
        let mut stack: Vec<usize> = vec![0];
        let mut cursor = 0;
        // (depth, exposed state, GOTO target) of every reduction since the
        // last shift whose exposed state is still on the stack.
        let mut exposed: Vec<(usize, usize, usize)> = Vec::new();

        loop {
            // Never empty: reductions keep the base state.
            let state = stack[stack.len() - 1];
            let Some(current) = input.get(cursor) else {
                return Ok(false);
            };
            stats.steps += 1;
            if log::log_enabled!(log::Level::Trace) {
                dump_state(&stack, &input[cursor..]);
            }

            let action = if self.tables.accepts_symbol(current) {
                self.tables.action(state, current)
            } else {
                None
            };
            if let Some(steps) = steps.as_deref_mut() {
                steps.push(TraceStep {
                    stack: stack.clone(),
                    remaining: input[cursor..].to_vec(),
                    action: action.cloned(),
                });
            }
            let Some(action) = action else {
                log::trace!("Error on `{}` in state {}", current, state);
                return Ok(false);
            };

            match action {
                Action::Shift(next) => {
                    log::trace!("Shift {}", next);
                    stack.push(*next);
                    cursor += 1;
                    stats.shifts += 1;
                    exposed.clear();
                }
                Action::Reduce(prod) => {
                    log::trace!("Reduce {}", prod);
                    let n = prod.body().len();
                    if n >= stack.len() {
                        return Err(EngineError::StackUnderflow {
                            production: prod.clone(),
                            needed: n,
                            available: stack.len() - 1,
                        });
                    }
                    stack.truncate(stack.len() - n);
                    let depth = stack.len();
                    let top = stack[depth - 1];
                    let Some(next) = self.tables.goto(top, prod.lhs()) else {
                        log::trace!("no GOTO[{}, {}]", top, prod.lhs());
                        return Ok(false);
                    };
                    // Entries deeper than `depth` were popped. A surviving
                    // match has stayed on the stack since, so the same
                    // reductions would replay from here forever.
                    exposed.retain(|&(d, _, _)| d <= depth);
                    if exposed.iter().any(|&(_, s, to)| s == top && to == next) {
                        return Err(EngineError::ReductionLoop {
                            state: top,
                            lookahead: current.clone(),
                        });
                    }
                    exposed.push((depth, top, next));
                    stack.push(next);
                    stats.reductions += 1;
                }
                Action::Accept => {
                    log::trace!("Accept");
                    return Ok(true);
                }
            }
        }
    }
}

impl Recognizer for ShiftReduceParser<'_> {
    fn parse(&self, input: &[Symbol]) -> bool {
        ShiftReduceParser::parse(self, input)
    }
}

fn dump_state(stack: &[usize], remaining: &[Symbol]) {
    let states: Vec<std::string::String> = stack.iter().map(|s| format!("<{}>", s)).collect();
    log::trace!("{}  <-  {}", states.join(" "), display_sequence(remaining));
}
