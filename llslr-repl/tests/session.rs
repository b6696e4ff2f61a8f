use llslr::Analysis;
use llslr_repl::session::{self, Config, PROMPT};
use llslr_repl::{Notation, run};
use std::io::{self, BufRead};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn grammar_and_session_from_separate_sources() {
    init_logger();
    let notation = Notation::default();
    let text = "3\nS -> (L) a\nL -> SM\nM -> ,SM e\n";
    let grammar = notation.read_grammar(&mut text.as_bytes().lines(), 'S').unwrap();
    let analysis = Analysis::new(grammar).unwrap();

    let mut out = Vec::new();
    let answers = "T\na\n(a)\n(a,(a,a))\n(a,)\n()\n\nQ\n";
    session::answer(&analysis, &notation, &mut answers.as_bytes().lines(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\nyes\nyes\nyes\nno\nno\n", PROMPT)
    );
}

#[test]
fn explicit_end_marker_in_answers() {
    let mut out = Vec::new();
    run(
        &Config::default(),
        "1\nS -> aSb e\nB\naabb$\na$b\n".as_bytes(),
        &mut out,
        &mut io::sink(),
    )
    .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), format!("{}\nyes\nno\n", PROMPT));
}
