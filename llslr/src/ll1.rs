//! The LL(1) predictive parsing table.
//!
//! Each cell `[A, t]` names the alternative of `A` to expand when `t` is the
//! next input symbol. A grammar is LL(1) iff no cell is claimed by two
//! different alternatives.

use crate::error::Ll1Conflict;
use crate::first_follow::FirstFollow;
use crate::grammar::{Grammar, Production};
use crate::predictive::PredictiveParser;
use crate::symbol::Symbol;
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use smartstring::alias::String;

/// A conflict-free LL(1) table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ll1Table {
    start: String,
    terminals: IndexSet<String>,
    entries: IndexMap<(String, Symbol), Production>,
}

/// Builds the LL(1) table, stopping at the first conflict.
pub fn build_ll1_table(grammar: &Grammar, ff: &FirstFollow) -> Result<Ll1Table, Ll1Conflict> {
    Ll1Table::build(grammar, ff)
}

/// Runs the same construction as [`build_ll1_table`] but records every
/// conflict. An empty list means the grammar is LL(1).
pub fn collect_ll1_conflicts(grammar: &Grammar, ff: &FirstFollow) -> Vec<Ll1Conflict> {
    let mut builder = TableBuilder::new(true);
    builder.run(grammar, ff);
    builder.conflicts
}

impl Ll1Table {
    pub fn build(grammar: &Grammar, ff: &FirstFollow) -> Result<Self, Ll1Conflict> {
        let mut builder = TableBuilder::new(false);
        builder.run(grammar, ff);
        if let Some(conflict) = builder.conflicts.pop() {
            return Err(conflict);
        }
        log::debug!("LL(1) table: {} entries", builder.entries.len());
        Ok(Ll1Table {
            start: String::from(grammar.start()),
            terminals: grammar.terminals().clone(),
            entries: builder.entries,
        })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn terminals(&self) -> &IndexSet<String> {
        &self.terminals
    }

    /// The alternative to expand for `nonterminal` on `lookahead`.
    pub fn entry(&self, nonterminal: &str, lookahead: &Symbol) -> Option<&Production> {
        self.entries
            .get(&(String::from(nonterminal), lookahead.clone()))
    }

    /// Table cells in construction order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Symbol, &Production)> {
        self.entries
            .iter()
            .map(|((nt, la), prod)| (nt.as_str(), la, prod))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A predictive recognizer driven by this table.
    pub fn parser(&self) -> PredictiveParser<'_> {
        PredictiveParser::new(self)
    }
}

/// Fills the table cell by cell. Every conflict is recorded; unless
/// `collect` is set, filling stops after the first one.
struct TableBuilder {
    collect: bool,
    conflicts: Vec<Ll1Conflict>,
    entries: IndexMap<(String, Symbol), Production>,
}

impl TableBuilder {
    fn new(collect: bool) -> Self {
        TableBuilder {
            collect,
            conflicts: Vec::new(),
            entries: IndexMap::new(),
        }
    }

    fn stopped(&self) -> bool {
        !self.collect && !self.conflicts.is_empty()
    }

    fn run(&mut self, grammar: &Grammar, ff: &FirstFollow) {
        for nt in grammar.nonterminals() {
            for prod in grammar.alternatives(nt) {
                let first = ff.first(prod.rhs());
                let follow = if first.contains(&Symbol::Epsilon) {
                    ff.follow(nt)
                } else {
                    None
                };
                let lookaheads = first
                    .iter()
                    .filter(|s| s.is_lookahead())
                    .chain(follow.into_iter().flatten());
                for la in lookaheads {
                    self.set(nt, la, prod);
                    if self.stopped() {
                        return;
                    }
                }
            }
        }
    }

    fn set(&mut self, nt: &str, lookahead: &Symbol, prod: &Production) {
        match self.entries.entry((String::from(nt), lookahead.clone())) {
            Entry::Vacant(v) => {
                v.insert(prod.clone());
            }
            Entry::Occupied(o) if o.get() == prod => {}
            Entry::Occupied(o) => {
                let conflict = Ll1Conflict {
                    nonterminal: String::from(nt),
                    lookahead: lookahead.clone(),
                    existing: o.get().clone(),
                    incoming: prod.clone(),
                };
                log::debug!("{}", conflict);
                self.conflicts.push(conflict);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Symbol {
        Symbol::t(s)
    }

    fn nt(s: &str) -> Symbol {
        Symbol::nt(s)
    }

    fn expr_left_recursive() -> Grammar {
        let mut g = Grammar::new("E");
        g.add_production("E", [vec![nt("E"), t("+"), nt("T")], vec![nt("T")]]);
        g.add_production("T", [vec![nt("T"), t("*"), nt("F")], vec![nt("F")]]);
        g.add_production("F", [vec![t("("), nt("E"), t(")")], vec![t("i")]]);
        g
    }

    fn expr_ll() -> Grammar {
        let mut g = Grammar::new("E");
        g.add_production("E", [vec![nt("T"), nt("E'")]]);
        g.add_production("E'", [vec![t("+"), nt("T"), nt("E'")], vec![]]);
        g.add_production("T", [vec![nt("F"), nt("T'")]]);
        g.add_production("T'", [vec![t("*"), nt("F"), nt("T'")], vec![]]);
        g.add_production("F", [vec![t("("), nt("E"), t(")")], vec![t("i")]]);
        g
    }

    #[test]
    fn left_recursion_is_not_ll1() {
        let g = expr_left_recursive();
        let ff = FirstFollow::compute(&g);
        let err = build_ll1_table(&g, &ff).unwrap_err();
        assert_eq!(err.nonterminal, "E");
        assert_eq!(err.lookahead, t("("));
        assert_eq!(err.existing.to_string(), "E -> E + T");
        assert_eq!(err.incoming.to_string(), "E -> T");

        let all = collect_ll1_conflicts(&g, &ff);
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], err);
        let cells: Vec<(&str, &Symbol)> = all
            .iter()
            .map(|c| (c.nonterminal.as_str(), &c.lookahead))
            .collect();
        assert_eq!(
            cells,
            vec![("E", &t("(")), ("E", &t("i")), ("T", &t("(")), ("T", &t("i"))]
        );
    }

    #[test]
    fn aborting_builder_stops_after_one_conflict() {
        let g = expr_left_recursive();
        let ff = FirstFollow::compute(&g);

        let mut builder = TableBuilder::new(false);
        builder.run(&g, &ff);
        assert!(builder.stopped());
        assert_eq!(builder.conflicts.len(), 1);

        let mut builder = TableBuilder::new(true);
        builder.run(&g, &ff);
        assert!(!builder.stopped());
        assert_eq!(builder.conflicts.len(), 4);
    }

    #[test]
    fn factored_expression_grammar_is_ll1() {
        let g = expr_ll();
        let ff = FirstFollow::compute(&g);
        let table = build_ll1_table(&g, &ff).unwrap();
        assert!(collect_ll1_conflicts(&g, &ff).is_empty());
        assert_eq!(table.len(), 13);
        assert_eq!(table.start(), "E");
        assert_eq!(
            table.entry("E", &t("i")).map(|p| p.to_string()),
            Some("E -> T E'".to_string())
        );
        assert_eq!(
            table.entry("E'", &t("+")).map(|p| p.to_string()),
            Some("E' -> + T E'".to_string())
        );
        assert!(table.entry("E'", &t(")")).unwrap().is_epsilon());
        assert!(table.entry("E'", &Symbol::EndMarker).unwrap().is_epsilon());
        assert!(table.entry("T'", &t("+")).unwrap().is_epsilon());
        assert_eq!(table.entry("E", &t("+")), None);
        assert_eq!(table.entry("F", &Symbol::EndMarker), None);
    }

    #[test]
    fn balanced_grammar_uses_follow_for_epsilon() {
        let mut g = Grammar::new("S");
        g.add_production("S", [vec![t("a"), nt("S"), t("b")], vec![]]);
        let ff = FirstFollow::compute(&g);
        let table = build_ll1_table(&g, &ff).unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.entry("S", &t("a")).unwrap().is_epsilon());
        assert!(table.entry("S", &t("b")).unwrap().is_epsilon());
        assert!(table.entry("S", &Symbol::EndMarker).unwrap().is_epsilon());
    }

    #[test]
    fn two_nullable_alternatives_conflict_on_follow() {
        // S -> A | B   A -> a | ε   B -> b | ε
        let mut g = Grammar::new("S");
        g.add_production("S", [vec![nt("A")], vec![nt("B")]]);
        g.add_production("A", [vec![t("a")], vec![]]);
        g.add_production("B", [vec![t("b")], vec![]]);
        let ff = FirstFollow::compute(&g);
        let err = build_ll1_table(&g, &ff).unwrap_err();
        assert_eq!(err.nonterminal, "S");
        assert_eq!(err.lookahead, Symbol::EndMarker);
        assert_eq!(err.existing.to_string(), "S -> A");
        assert_eq!(err.incoming.to_string(), "S -> B");
    }

    #[test]
    fn first_first_overlap_through_nullable_prefix() {
        // S -> A a | a   A -> ε
        let mut g = Grammar::new("S");
        g.add_production("S", [vec![nt("A"), t("a")], vec![t("a")]]);
        g.add_production("A", [vec![]]);
        let ff = FirstFollow::compute(&g);
        let err = build_ll1_table(&g, &ff).unwrap_err();
        assert_eq!(err.lookahead, t("a"));
        assert_eq!(collect_ll1_conflicts(&g, &ff), vec![err]);
    }
}
