//! Plain-text dumps of grammars, sets and tables.
//!
//! Every writer emits one record per line, comma-separated, starting with a
//! short tag (`P`, `FIRST`, `C`, `A`, `G`, `LL`), so the output can be read
//! by eye or grepped.

use crate::first_follow::{FirstFollow, SymbolSet};
use crate::grammar::Grammar;
use crate::ll1::Ll1Table;
use crate::slr::SlrTables;
use std::io::{self, Write};

/// Writes the grammar productions, one numbered alternative per line.
///
/// # Example
/// ```text
/// PS,3
///
/// P,0,S -> a S b
/// P,1,S -> ε
/// ```
pub fn write_productions<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    let prods: Vec<_> = grammar.productions().collect();
    writeln!(out, "PS,{}\n", prods.len())?;
    for (i, prod) in prods.iter().enumerate() {
        writeln!(out, "P,{},{}", i, prod)?;
    }
    Ok(())
}

fn write_set<W: Write>(out: &mut W, label: &str, name: &str, set: &SymbolSet) -> io::Result<()> {
    write!(out, "{},{},{{", label, name)?;
    for sym in set {
        write!(out, "{}, ", sym)?;
    }
    writeln!(out, "}}")
}

/// Writes the FIRST sets followed by the FOLLOW sets.
pub fn write_first_follow<W: Write>(out: &mut W, ff: &FirstFollow) -> io::Result<()> {
    for (nt, set) in ff.first_sets() {
        write_set(out, "FIRST", nt, set)?;
    }
    writeln!(out)?;
    for (nt, set) in ff.follow_sets() {
        write_set(out, "FOLLOW", nt, set)?;
    }
    Ok(())
}

/// Writes the LR(0) states as their items, one item per line.
pub fn write_states<W: Write>(out: &mut W, tables: &SlrTables) -> io::Result<()> {
    writeln!(out, "CS,{}\n", tables.state_count())?;
    for (i, state) in tables.automaton().states().enumerate() {
        for item in state {
            writeln!(out, "C,{},{}", i, tables.display_item(item))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the ACTION entries followed by the GOTO entries.
pub fn write_action_goto<W: Write>(out: &mut W, tables: &SlrTables) -> io::Result<()> {
    for (state, sym, action) in tables.actions() {
        writeln!(out, "A,{},{},{}", state, sym, action)?;
    }
    writeln!(out)?;
    for (state, nt, to) in tables.gotos() {
        writeln!(out, "G,{},{},{}", state, nt, to)?;
    }
    Ok(())
}

pub fn write_ll1_table<W: Write>(out: &mut W, table: &Ll1Table) -> io::Result<()> {
    for (nt, la, prod) in table.entries() {
        writeln!(out, "LL,{},{},{}", nt, la, prod)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    fn balanced() -> Grammar {
        let mut g = Grammar::new("S");
        g.add_production(
            "S",
            [vec![Symbol::t("a"), Symbol::nt("S"), Symbol::t("b")], vec![]],
        );
        g
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn productions_and_sets() {
        let g = balanced();
        let ff = FirstFollow::compute(&g);
        assert_eq!(
            render(|out| write_productions(out, &g)),
            "PS,2\n\nP,0,S -> a S b\nP,1,S -> ε\n"
        );
        assert_eq!(
            render(|out| write_first_follow(out, &ff)),
            "FIRST,S,{a, ε, }\n\nFOLLOW,S,{b, $, }\n"
        );
    }

    #[test]
    fn tables() {
        let g = balanced();
        let ff = FirstFollow::compute(&g);
        let ll1 = Ll1Table::build(&g, &ff).unwrap();
        assert_eq!(
            render(|out| write_ll1_table(out, &ll1)),
            "LL,S,a,S -> a S b\nLL,S,b,S -> ε\nLL,S,$,S -> ε\n"
        );

        let slr = SlrTables::build(&g, &ff).unwrap();
        let states = render(|out| write_states(out, &slr));
        assert!(states.starts_with("CS,5\n\n"));
        assert!(states.contains("C,0,Z -> . S\n"));
        assert!(states.contains("C,0,S -> .\n"));

        let actions = render(|out| write_action_goto(out, &slr));
        assert!(actions.contains("A,0,a,shift 1\n"));
        assert!(actions.contains("A,0,$,reduce S -> ε\n"));
        assert!(actions.contains("G,0,S,2\n"));
    }
}
