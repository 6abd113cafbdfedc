mod assist;
mod session;
mod solver;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::session::Session;
use crate::solver::{load_word_list, Objective, PruneIndex, SolverError};

#[derive(Parser)]
#[command(name = "wordle", version, about = "Adversarial five-letter word game solver")]
struct Cli {
    /// Wordlist file: one five-letter lowercase word per line.
    wordlist: PathBuf,

    /// Serialized prune index. Loaded when present, otherwise built from
    /// the wordlist and written here.
    prune_index: Option<PathBuf>,

    /// How the search scores a guess against the adversary.
    #[arg(long, value_enum, default_value = "worst")]
    objective: ObjectiveArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ObjectiveArg {
    /// Minimize the worst-case guess count.
    Worst,
    /// Minimize the class-size-weighted path sum.
    Mean,
}

impl From<ObjectiveArg> for Objective {
    fn from(arg: ObjectiveArg) -> Objective {
        match arg {
            ObjectiveArg::Worst => Objective::WorstCase,
            ObjectiveArg::Mean => Objective::MeanWeighted,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    run(cli)
}

fn run(cli: Cli) -> ExitCode {
    let words = match load_word_list(&cli.wordlist) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("failed to load wordlist {}: {e}", cli.wordlist.display());
            return ExitCode::from(1);
        }
    };

    let index = match cli.prune_index {
        Some(path) => match PruneIndex::load_or_build(&path, &words) {
            Ok(index) => index,
            Err(e @ SolverError::CorruptIndex(_)) => {
                eprintln!("{}: {e}", path.display());
                eprintln!("delete the file to regenerate it from the wordlist");
                return ExitCode::from(2);
            }
            Err(e) => {
                eprintln!("failed to open prune index {}: {e}", path.display());
                return ExitCode::from(1);
            }
        },
        None => PruneIndex::build(&words),
    };

    let session = Session::new(words, index, cli.objective.into());
    match assist::run(session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("I/O error: {e}");
            ExitCode::from(1)
        }
    }
}
