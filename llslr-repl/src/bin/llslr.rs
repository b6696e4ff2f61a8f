//! Command-line interface for the `llslr` grammar analyzer.
//!
//! Reads the grammar from `--grammar` or from standard input, then runs the
//! interactive session on standard input.

#[cfg(feature = "cli")]
mod real {
    use anyhow::Context;
    use clap::Parser;
    use llslr::Analysis;
    use llslr_repl::session::{self, Config};
    use llslr_repl::Notation;
    use std::fs::File;
    use std::io::{self, BufRead, BufReader};
    use std::path::PathBuf;

    #[derive(Parser)]
    #[command(version, about = "Classify a grammar as LL(1)/SLR(1) and recognize strings")]
    struct Args {
        /// Path to the grammar file (count line followed by rules); standard
        /// input if omitted
        #[arg(short = 'g', long)]
        grammar: Option<PathBuf>,

        /// Start symbol
        #[arg(short = 's', long, default_value_t = 'S')]
        start: char,

        /// Character that denotes the empty alternative
        #[arg(short = 'e', long, default_value_t = 'e')]
        epsilon: char,

        /// Write productions, FIRST/FOLLOW sets and tables to stderr.
        #[arg(long)]
        dump: bool,

        /// Enable debug logging (off by default).
        #[arg(short = 'd', long)]
        debug: bool,
    }

    pub fn main() -> anyhow::Result<()> {
        let args = Args::parse();

        let mut logger = env_logger::Builder::from_default_env();
        if args.debug {
            logger.filter_level(log::LevelFilter::Debug);
        }
        logger.init();

        let config = Config {
            start: args.start,
            notation: Notation::new(args.epsilon),
            dump: args.dump,
        };
        let stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        let mut stderr = io::stderr().lock();

        let Some(path) = args.grammar else {
            return session::run(&config, stdin, &mut stdout, &mut stderr);
        };

        let file = File::open(&path).with_context(|| format!("can't open {:?}", path))?;
        let grammar = config
            .notation
            .read_grammar(&mut BufReader::new(file).lines(), config.start)
            .with_context(|| format!("cannot read grammar from {:?}", path))?;
        let analysis = Analysis::new(grammar).context("grammar is ill-formed")?;
        if config.dump {
            session::write_reports(&analysis, &mut stderr)?;
        }
        session::answer(&analysis, &config.notation, &mut stdin.lines(), &mut stdout)
    }
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    real::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("llslr disabled (compiled without `cli` feature)");
}
