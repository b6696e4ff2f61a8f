//! Grammar symbols.
//!
//! A [`Symbol`] is an explicitly tagged grammar token. The core never looks at
//! the spelling of a name to decide what a symbol is: the text front-end (see
//! the `llslr-repl` crate) maps its own convention onto these variants.

use smartstring::alias::String;
use std::fmt;

/// A grammar symbol.
///
/// The derived ordering puts terminals first, then nonterminals, then the two
/// reserved markers. Sets of symbols (`BTreeSet<Symbol>`) therefore iterate in
/// a stable order, which keeps table construction and reports deterministic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A leaf symbol consumed from the input.
    Terminal(String),
    /// A symbol expanded through the grammar's productions.
    Nonterminal(String),
    /// The empty-string marker. Only ever appears as the sole symbol of an
    /// epsilon alternative, or inside FIRST sets.
    Epsilon,
    /// The end-of-input marker `$`.
    EndMarker,
}

/// Classification of a [`Symbol`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
    Epsilon,
    EndMarker,
}

impl Symbol {
    /// Shorthand for [`Symbol::Terminal`].
    pub fn t(name: impl AsRef<str>) -> Self {
        Symbol::Terminal(String::from(name.as_ref()))
    }

    /// Shorthand for [`Symbol::Nonterminal`].
    pub fn nt(name: impl AsRef<str>) -> Self {
        Symbol::Nonterminal(String::from(name.as_ref()))
    }

    /// Returns the variant tag of this symbol.
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Terminal(_) => SymbolKind::Terminal,
            Symbol::Nonterminal(_) => SymbolKind::Nonterminal,
            Symbol::Epsilon => SymbolKind::Epsilon,
            Symbol::EndMarker => SymbolKind::EndMarker,
        }
    }

    /// Returns the name of a terminal or nonterminal, `None` for the markers.
    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => Some(name.as_str()),
            Symbol::Epsilon | Symbol::EndMarker => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    pub fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::EndMarker)
    }

    /// True for symbols that may label an ACTION column or an LL(1) lookahead:
    /// terminals and the end-marker.
    pub fn is_lookahead(&self) -> bool {
        matches!(self, Symbol::Terminal(_) | Symbol::EndMarker)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => f.write_str(name),
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::EndMarker => f.write_str("$"),
        }
    }
}

/// Formats a symbol sequence as space-separated names.
pub(crate) fn display_sequence(symbols: &[Symbol]) -> std::string::String {
    symbols
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn kinds_follow_tags() {
        assert_eq!(Symbol::t("a").kind(), SymbolKind::Terminal);
        assert_eq!(Symbol::nt("S").kind(), SymbolKind::Nonterminal);
        assert_eq!(Symbol::Epsilon.kind(), SymbolKind::Epsilon);
        assert_eq!(Symbol::EndMarker.kind(), SymbolKind::EndMarker);
    }

    #[test]
    fn display_uses_reserved_spellings() {
        assert_eq!(Symbol::t("id").to_string(), "id");
        assert_eq!(Symbol::Epsilon.to_string(), "ε");
        assert_eq!(Symbol::EndMarker.to_string(), "$");
        assert_eq!(
            display_sequence(&[Symbol::nt("E"), Symbol::t("+"), Symbol::nt("T")]),
            "E + T"
        );
    }

    #[test]
    fn ordering_puts_terminals_first_and_markers_last() {
        let set: BTreeSet<Symbol> = [
            Symbol::EndMarker,
            Symbol::nt("A"),
            Symbol::Epsilon,
            Symbol::t("b"),
            Symbol::t("a"),
        ]
        .into_iter()
        .collect();
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                Symbol::t("a"),
                Symbol::t("b"),
                Symbol::nt("A"),
                Symbol::Epsilon,
                Symbol::EndMarker,
            ]
        );
    }

    #[test]
    fn same_name_different_tag_is_different_symbol() {
        assert_ne!(Symbol::t("x"), Symbol::nt("x"));
        assert_eq!(Symbol::t("x").name(), Symbol::nt("x").name());
        assert_eq!(Symbol::Epsilon.name(), None);
    }
}
