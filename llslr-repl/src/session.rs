//! The interactive question-and-answer loop.
//!
//! After the grammar has been read the session reports which parsers apply
//! and then answers `yes` or `no` for every input string, one per line, until
//! a blank line or the end of input.

use crate::reader::Notation;
use anyhow::{Context, Result};
use llslr::{Analysis, Recognizer, report};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Select a parser(T: for LL(1), B: for SLR(1), Q: quit):";
pub const LL1_ONLY: &str = "Grammar is LL(1).";
pub const SLR1_ONLY: &str = "Grammar is SLR(1).";
pub const NEITHER: &str = "Grammar is neither LL(1) nor SLR(1).";

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Start symbol of the grammar.
    pub start: char,
    pub notation: Notation,
    /// Write the analysis reports before answering.
    pub dump: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start: 'S',
            notation: Notation::default(),
            dump: false,
        }
    }
}

/// Reads the grammar and then the session from `input`.
///
/// Answers go to `out`; reports requested with [`Config::dump`] go to `diag`.
pub fn run<R, W, D>(config: &Config, input: R, out: &mut W, diag: &mut D) -> Result<()>
where
    R: BufRead,
    W: Write,
    D: Write,
{
    let mut lines = input.lines();
    let grammar = config
        .notation
        .read_grammar(&mut lines, config.start)
        .context("cannot read grammar")?;
    let analysis = Analysis::new(grammar).context("grammar is ill-formed")?;
    if config.dump {
        write_reports(&analysis, diag)?;
    }
    answer(&analysis, &config.notation, &mut lines, out)?;
    Ok(())
}

/// Announces the classification and answers the input strings in `lines`.
pub fn answer<I, W>(analysis: &Analysis, notation: &Notation, lines: &mut I, out: &mut W) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    match (analysis.predictive_parser(), analysis.shift_reduce_parser()) {
        (Ok(ll), Ok(lr)) => {
            writeln!(out, "{}", PROMPT)?;
            out.flush()?;
            while let Some(choice) = lines.next().transpose()? {
                match choice.trim() {
                    "Q" => break,
                    "T" => answer_strings(&ll, notation, lines, out)?,
                    "B" => answer_strings(&lr, notation, lines, out)?,
                    other => log::debug!("ignoring choice `{}`", other),
                }
            }
        }
        (Ok(ll), Err(_)) => {
            writeln!(out, "{}", LL1_ONLY)?;
            answer_strings(&ll, notation, lines, out)?;
        }
        (Err(_), Ok(lr)) => {
            writeln!(out, "{}", SLR1_ONLY)?;
            answer_strings(&lr, notation, lines, out)?;
        }
        (Err(_), Err(_)) => writeln!(out, "{}", NEITHER)?,
    }
    Ok(())
}

fn answer_strings<I, W>(
    engine: &dyn Recognizer,
    notation: &Notation,
    lines: &mut I,
    out: &mut W,
) -> io::Result<()>
where
    I: Iterator<Item = io::Result<String>>,
    W: Write,
{
    while let Some(line) = lines.next().transpose()? {
        let text = line.trim();
        if text.is_empty() {
            break;
        }
        let verdict = engine.parse(&notation.input(text));
        log::debug!("`{}`: {}", text, verdict);
        writeln!(out, "{}", if verdict { "yes" } else { "no" })?;
        out.flush()?;
    }
    Ok(())
}

/// Writes productions, FIRST/FOLLOW, and whichever tables could be built or
/// the conflicts that prevented them.
pub fn write_reports<W: Write>(analysis: &Analysis, out: &mut W) -> Result<()> {
    report::write_productions(out, analysis.grammar())?;
    writeln!(out)?;
    report::write_first_follow(out, analysis.first_follow())?;
    writeln!(out)?;

    match analysis.ll1_table() {
        Ok(table) => report::write_ll1_table(out, table)?,
        Err(_) => {
            for conflict in analysis.ll1_conflicts() {
                writeln!(out, "{}", conflict)?;
            }
        }
    }
    writeln!(out)?;

    match analysis.slr_tables() {
        Ok(tables) => {
            report::write_states(out, tables)?;
            report::write_action_goto(out, tables)?;
        }
        Err(_) => {
            for conflict in analysis.slr1_conflicts()? {
                writeln!(out, "{}", conflict)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn session(config: &Config, input: &str) -> String {
        let mut out = Vec::new();
        run(config, input.as_bytes(), &mut out, &mut io::sink()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn both_parsers_available() {
        init_logger();
        let input = "1\nS -> aSb e\nT\nab\naabb\naab\n\nB\nab\nba\n\nQ\n";
        assert_eq!(
            session(&Config::default(), input),
            format!("{}\nyes\nyes\nno\nyes\nno\n", PROMPT)
        );
    }

    #[test]
    fn unknown_choices_are_ignored_and_eof_quits() {
        let input = "1\nS -> aSb e\nX\nT\nab\n";
        assert_eq!(
            session(&Config::default(), input),
            format!("{}\nyes\n", PROMPT)
        );
    }

    #[test]
    fn slr1_only_grammar() {
        let input = "3\nS -> S+T T\nT -> T*F F\nF -> (S) i\ni+i*i\n(i)+i\ni+\n(i+i\n\nignored\n";
        assert_eq!(
            session(&Config::default(), input),
            format!("{}\nyes\nyes\nno\nno\n", SLR1_ONLY)
        );
    }

    #[test]
    fn ll1_only_grammar() {
        // S -> A a A b | B b B a   A -> ε   B -> ε
        // State 0 reduces both A -> ε and B -> ε on `a` and `b`.
        let input = "3\nS -> AaAb BbBa\nA -> e\nB -> e\nab\nba\naa\n\n";
        assert_eq!(
            session(&Config::default(), input),
            format!("{}\nyes\nyes\nno\n", LL1_ONLY)
        );
    }

    #[test]
    fn looping_reductions_answer_no() {
        // S -> S | c, with `a` in FOLLOW(S) only through the unreachable A
        let input = "2\nS -> S c\nA -> Sa\nc\nca\ncc\n\n";
        assert_eq!(
            session(&Config::default(), input),
            format!("{}\nyes\nno\nno\n", SLR1_ONLY)
        );
    }

    #[test]
    fn neither() {
        let input = "1\nS -> SS a\naa\n";
        assert_eq!(session(&Config::default(), input), format!("{}\n", NEITHER));
    }

    #[test]
    fn custom_start_and_epsilon() {
        let config = Config {
            start: 'E',
            notation: Notation::new('#'),
            dump: false,
        };
        let input = "5\nE -> TX\nX -> +TX #\nT -> FY\nY -> *FY #\nF -> (E) e\nB\ne+e*e\ne+\n\nQ\n";
        assert_eq!(session(&config, input), format!("{}\nyes\nno\n", PROMPT));
    }

    #[test]
    fn ill_formed_grammar_is_an_error() {
        let mut out = Vec::new();
        let err = run(
            &Config::default(),
            "1\nS -> aB\n".as_bytes(),
            &mut out,
            &mut io::sink(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("`B`"));
        assert!(out.is_empty());
    }

    #[test]
    fn dump_writes_reports() {
        let config = Config {
            dump: true,
            ..Config::default()
        };
        let mut out = Vec::new();
        let mut diag = Vec::new();
        run(&config, "1\nS -> SS a\n".as_bytes(), &mut out, &mut diag).unwrap();
        let diag = String::from_utf8(diag).unwrap();
        assert!(diag.contains("P,0,S -> S S"));
        assert!(diag.contains("FIRST,S,{a, }"));
        assert!(diag.contains("LL(1) conflict"));
        assert!(diag.contains("shift/reduce conflict"));
    }
}
