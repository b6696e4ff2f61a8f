use crate::symbol::Symbol;

/// A membership test for the language of a grammar.
///
/// Implemented by [`PredictiveParser`](crate::PredictiveParser) and
/// [`ShiftReduceParser`](crate::ShiftReduceParser). Rejection is an ordinary
/// answer, not an error.
pub trait Recognizer {
    /// Returns `true` iff `input`, a string of terminals without the
    /// end-marker, is in the language.
    fn parse(&self, input: &[Symbol]) -> bool;

    /// Parses every input in turn.
    fn parse_all<'a, I>(&self, inputs: I) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a [Symbol]>,
        Self: Sized,
    {
        inputs.into_iter().map(|input| self.parse(input)).collect()
    }
}
