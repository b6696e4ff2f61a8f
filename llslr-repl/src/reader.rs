//! Reading grammars written one character per symbol.
//!
//! A grammar is a count line `n` followed by `n` rule lines
//! `A -> alt1 alt2 ...`. Each alternative is a run of non-blank characters;
//! every character is one symbol:
//!  * an uppercase ASCII letter is a nonterminal,
//!  * the epsilon character (by default `e`) is ε,
//!  * `$` is reserved for the end-marker,
//!  * anything else is a terminal.
//!
//! A later rule for the same nonterminal replaces the earlier one.

use chumsky::prelude::*;
use llslr::{Grammar, Symbol};
use std::io;
use thiserror::Error;

/// One rule line before its characters are classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub lhs: char,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("line {line}: expected the number of rules, found `{text}`")]
    Count { line: usize, text: String },

    #[error("expected {expected} rules, input ended after {found}")]
    UnexpectedEof { expected: usize, found: usize },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: `$` is reserved for the end-marker")]
    Reserved { line: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parser for a single rule line; whitespace around `->` is optional.
pub fn rule_parser<'a>() -> impl Parser<'a, &'a str, Rule, extra::Err<Rich<'a, char>>> {
    let blank = one_of(" \t").repeated();

    let lhs = any()
        .filter(|c: &char| c.is_ascii_uppercase())
        .labelled("nonterminal");

    let alternative = any()
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .labelled("alternative");

    let alternatives = alternative
        .separated_by(one_of(" \t").repeated().at_least(1))
        .allow_trailing()
        .at_least(1)
        .collect::<Vec<_>>();

    blank
        .clone()
        .ignore_then(lhs)
        .then_ignore(blank.clone())
        .then_ignore(just("->"))
        .then_ignore(blank.clone())
        .then(alternatives)
        .then_ignore(blank)
        .then_ignore(end())
        .map(|(lhs, alternatives)| Rule { lhs, alternatives })
}

/// Maps characters to [`Symbol`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notation {
    pub epsilon: char,
}

impl Default for Notation {
    fn default() -> Self {
        Notation { epsilon: 'e' }
    }
}

impl Notation {
    pub fn new(epsilon: char) -> Self {
        Notation { epsilon }
    }

    /// Classifies one grammar character; `None` for the reserved `$`.
    pub fn symbol(&self, c: char) -> Option<Symbol> {
        match c {
            '$' => None,
            c if c == self.epsilon => Some(Symbol::Epsilon),
            c if c.is_ascii_uppercase() => Some(Symbol::nt(c.to_string())),
            c => Some(Symbol::t(c.to_string())),
        }
    }

    /// Converts an input string to symbols for the recognizers.
    ///
    /// A single trailing `$` is dropped; any other `$` becomes the
    /// end-marker, which the recognizers reject like every non-terminal
    /// symbol.
    pub fn input(&self, text: &str) -> Vec<Symbol> {
        let text = text.strip_suffix('$').unwrap_or(text);
        text.chars()
            .map(|c| self.symbol(c).unwrap_or(Symbol::EndMarker))
            .collect()
    }

    /// Parses and classifies one rule line. `line` is used in errors only.
    pub fn rule(&self, text: &str, line: usize) -> Result<(String, Vec<Vec<Symbol>>), ReadError> {
        let rule = rule_parser()
            .parse(text)
            .into_result()
            .map_err(|errs| ReadError::Syntax {
                line,
                message: errs
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            })?;

        let mut alternatives = Vec::with_capacity(rule.alternatives.len());
        for alt in &rule.alternatives {
            let symbols = alt
                .chars()
                .map(|c| self.symbol(c).ok_or(ReadError::Reserved { line }))
                .collect::<Result<Vec<_>, _>>()?;
            alternatives.push(symbols);
        }
        Ok((rule.lhs.to_string(), alternatives))
    }

    /// Reads the count line and that many rules from `lines`.
    ///
    /// Blank lines before a rule are skipped.
    pub fn read_grammar<I>(&self, lines: &mut I, start: char) -> Result<Grammar, ReadError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let mut line_no = 0;
        let count = loop {
            let Some(text) = lines.next().transpose()? else {
                return Err(ReadError::UnexpectedEof {
                    expected: 1,
                    found: 0,
                });
            };
            line_no += 1;
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            break text.parse::<usize>().map_err(|_| ReadError::Count {
                line: line_no,
                text: text.to_string(),
            })?;
        };

        let mut grammar = Grammar::new(start.to_string());
        let mut found = 0;
        while found < count {
            let Some(text) = lines.next().transpose()? else {
                return Err(ReadError::UnexpectedEof {
                    expected: count,
                    found,
                });
            };
            line_no += 1;
            if text.trim().is_empty() {
                continue;
            }
            let (lhs, alternatives) = self.rule(&text, line_no)?;
            log::debug!("rule {}: {} with {} alternatives", found, lhs, alternatives.len());
            grammar.add_production(lhs, alternatives);
            found += 1;
        }
        Ok(grammar)
    }
}
