//! LR(0) items and the canonical collection of item sets.
//!
//! The automaton is built over an [`AugmentedGrammar`]. States are item sets
//! closed under [`closure`]; two states are the same state iff their item sets
//! are equal. Item sets are `BTreeSet`s, so their iteration order (and hash)
//! is canonical, and the collection is an `IndexSet` that maps an item set to
//! its state id without scanning.

use crate::grammar::{AugmentedGrammar, Production};
use crate::symbol::Symbol;
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;

/// An LR(0) item: a production of the augmented grammar with a dot.
///
/// Productions in an [`AugmentedGrammar`] are deduplicated, so comparing
/// production indices is the same as comparing `(lhs, rhs)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Item {
    /// Index of the production in the augmented grammar.
    pub prod: usize,
    /// Position of the dot within the production body, `0..=body.len()`.
    pub dot: usize,
}

/// A set of LR(0) items.
pub type ItemSet = BTreeSet<Item>;

impl Item {
    pub const fn new(prod: usize, dot: usize) -> Self {
        Item { prod, dot }
    }

    /// The symbol right after the dot, or `None` for a reduce item.
    pub fn next_symbol<'a>(&self, aug: &'a AugmentedGrammar<'_>) -> Option<&'a Symbol> {
        aug.production(self.prod).body().get(self.dot)
    }

    pub fn is_reduce(&self, aug: &AugmentedGrammar<'_>) -> bool {
        self.dot == aug.production(self.prod).body().len()
    }

    /// The same item with the dot moved one symbol to the right.
    pub fn advance(&self) -> Item {
        Item::new(self.prod, self.dot + 1)
    }

    /// Renders the item as `A -> x . y`.
    pub fn display(&self, aug: &AugmentedGrammar<'_>) -> String {
        self.display_in(aug.production(self.prod))
    }

    /// Renders the item over `prod`, which must be the production it indexes.
    pub fn display_in(&self, prod: &Production) -> String {
        let mut out = format!("{} ->", prod.lhs());
        for (i, sym) in prod.body().iter().enumerate() {
            if i == self.dot {
                out.push_str(" .");
            }
            out.push(' ');
            out.push_str(&sym.to_string());
        }
        if self.dot == prod.body().len() {
            out.push_str(" .");
        }
        out
    }
}

/// Computes the LR(0) closure of `items`.
///
/// Every item whose next symbol is a nonterminal `N` pulls in `N -> . γ` for
/// each production of `N`; newly added items are expanded in turn until
/// nothing is added.
pub fn closure(items: &ItemSet, aug: &AugmentedGrammar<'_>) -> ItemSet {
    let mut out = items.clone();
    let mut work: Vec<Item> = items.iter().copied().collect();
    while let Some(item) = work.pop() {
        let Some(Symbol::Nonterminal(name)) = item.next_symbol(aug) else {
            continue;
        };
        for &prod in aug.productions_of(name) {
            let new_item = Item::new(prod, 0);
            if out.insert(new_item) {
                work.push(new_item);
            }
        }
    }
    out
}

/// Computes the LR(0) goto of `items` on `symbol`.
///
/// Advances every item whose next symbol is `symbol` and closes the result.
/// Returns an empty set if no item can advance.
pub fn goto(items: &ItemSet, symbol: &Symbol, aug: &AugmentedGrammar<'_>) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.next_symbol(aug) == Some(symbol))
        .map(Item::advance)
        .collect();
    if moved.is_empty() {
        return moved;
    }
    closure(&moved, aug)
}

/// The canonical collection of LR(0) item sets with its transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    states: IndexSet<ItemSet>,
    transitions: IndexMap<(usize, Symbol), usize>,
}

impl Automaton {
    /// Builds the canonical collection.
    ///
    /// State 0 is `closure({Z -> . S})`. States are processed in discovery
    /// order and, for each, every symbol of [`AugmentedGrammar::symbols`] is
    /// tried in turn, so ids depend only on the grammar.
    pub fn build(aug: &AugmentedGrammar<'_>) -> Self {
        let mut states = IndexSet::new();
        states.insert(closure(&ItemSet::from([Item::new(0, 0)]), aug));

        let symbols = aug.symbols();
        let mut transitions = IndexMap::new();
        let mut next = 0;
        while next < states.len() {
            for sym in &symbols {
                let target = goto(&states[next], sym, aug);
                if target.is_empty() {
                    continue;
                }
                let (id, _) = states.insert_full(target);
                transitions.insert((next, sym.clone()), id);
            }
            next += 1;
        }

        log::debug!(
            "LR(0) automaton: {} states, {} transitions",
            states.len(),
            transitions.len()
        );
        Automaton {
            states,
            transitions,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, id: usize) -> Option<&ItemSet> {
        self.states.get_index(id)
    }

    /// States in id order.
    pub fn states(&self) -> impl Iterator<Item = &ItemSet> {
        self.states.iter()
    }

    /// The id of the state with exactly these items.
    pub fn index_of(&self, items: &ItemSet) -> Option<usize> {
        self.states.get_index_of(items)
    }

    /// The successor of `state` on `symbol`.
    pub fn transition(&self, state: usize, symbol: &Symbol) -> Option<usize> {
        self.transitions.get(&(state, symbol.clone())).copied()
    }

    /// All transitions `((from, symbol), to)` in discovery order.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, &Symbol, usize)> {
        self.transitions
            .iter()
            .map(|((from, sym), to)| (*from, sym, *to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    fn t(s: &str) -> Symbol {
        Symbol::t(s)
    }

    fn nt(s: &str) -> Symbol {
        Symbol::nt(s)
    }

    fn expr() -> Grammar {
        let mut g = Grammar::new("E");
        g.add_production("E", [vec![nt("E"), t("+"), nt("T")], vec![nt("T")]]);
        g.add_production("T", [vec![nt("T"), t("*"), nt("F")], vec![nt("F")]]);
        g.add_production("F", [vec![t("("), nt("E"), t(")")], vec![t("i")]]);
        g
    }

    fn rendered(set: &ItemSet, aug: &AugmentedGrammar<'_>) -> Vec<String> {
        let mut items: Vec<String> = set.iter().map(|i| i.display(aug)).collect();
        items.sort();
        items
    }

    #[test]
    fn closure_of_start_item() {
        let g = expr();
        let aug = g.augment();
        let c = closure(&ItemSet::from([Item::new(0, 0)]), &aug);
        assert_eq!(
            rendered(&c, &aug),
            vec![
                "E -> . E + T",
                "E -> . T",
                "F -> . ( E )",
                "F -> . i",
                "T -> . F",
                "T -> . T * F",
                "Z -> . E",
            ]
        );
    }

    #[test]
    fn goto_advances_and_closes() {
        let g = expr();
        let aug = g.augment();
        let i0 = closure(&ItemSet::from([Item::new(0, 0)]), &aug);

        let on_e = goto(&i0, &nt("E"), &aug);
        assert_eq!(rendered(&on_e, &aug), vec!["E -> E . + T", "Z -> E ."]);

        let on_paren = goto(&i0, &t("("), &aug);
        assert!(on_paren.contains(&Item::new(5, 1)));
        assert_eq!(on_paren.len(), 7);

        assert!(goto(&i0, &t(")"), &aug).is_empty());
        assert!(goto(&i0, &Symbol::EndMarker, &aug).is_empty());
    }

    #[test]
    fn expression_automaton_has_twelve_states() {
        let g = expr();
        let aug = g.augment();
        let a = Automaton::build(&aug);
        assert_eq!(a.len(), 12);
        assert_eq!(a.state(0), Some(&closure(&ItemSet::from([Item::new(0, 0)]), &aug)));
        let s1 = a.transition(0, &nt("E")).unwrap();
        assert_eq!(a.index_of(&goto(a.state(0).unwrap(), &nt("E"), &aug)), Some(s1));
    }

    #[test]
    fn epsilon_items_are_reduce_items() {
        // S -> a S b | ε
        let mut g = Grammar::new("S");
        g.add_production("S", [vec![t("a"), nt("S"), t("b")], vec![]]);
        let aug = g.augment();
        let eps = Item::new(2, 0);
        assert!(eps.is_reduce(&aug));
        assert_eq!(eps.next_symbol(&aug), None);
        assert_eq!(eps.display(&aug), "S -> .");

        let a = Automaton::build(&aug);
        assert_eq!(a.len(), 5);
        assert_eq!(a.transition(0, &t("a")), Some(1));
        assert_eq!(a.transition(0, &nt("S")), Some(2));
        assert_eq!(a.transition(1, &t("a")), Some(1));
        assert_eq!(a.transition(1, &nt("S")), Some(3));
        assert_eq!(a.transition(3, &t("b")), Some(4));
        assert_eq!(a.transition(2, &t("b")), None);
    }

    #[test]
    fn rebuilding_yields_identical_states() {
        let g = expr();
        let first = Automaton::build(&g.augment());
        let second = Automaton::build(&g.augment());
        assert_eq!(first.len(), second.len());
        for (a, b) in first.states().zip(second.states()) {
            assert_eq!(a, b);
        }
        assert_eq!(first, second);
    }

    #[test]
    fn states_are_distinct() {
        let g = expr();
        let a = Automaton::build(&g.augment());
        let unique: BTreeSet<&ItemSet> = a.states().collect();
        assert_eq!(unique.len(), a.len());
    }
}
