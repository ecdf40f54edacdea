use std::env;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::Error;
use clap::{App, Arg};
use env_logger::{fmt, Builder, Target};
use log::{error, info, Level, LevelFilter, Record};

use dpllsat::Solver;

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging(verbosity: i64) {
    let format = |buf: &mut fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let default_level = match verbosity {
        i64::MIN..=-1 => LevelFilter::Error,
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(format)
        .filter(None, default_level);

    if let Ok(ref env_var) = env::var("DPLLSAT_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn main_with_err() -> Result<i32, Error> {
    let matches = App::new("dpllsat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A DPLL SAT solver with two-watched-literal propagation")
        .arg_from_usage("[INPUT] 'The DIMACS CNF file to solve (stdin if omitted)'")
        .arg_from_usage("--naive 'Use the naive (non-watched-literal) search engine'")
        .arg(
            Arg::from_usage("-v --verbose 'Increase log verbosity (can be repeated)'")
                .multiple(true),
        )
        .arg_from_usage("-q --quiet 'Only log errors'")
        .get_matches();

    let verbosity = matches.occurrences_of("verbose") as i64 - matches.is_present("quiet") as i64;
    init_logging(verbosity);

    let stdin = io::stdin();

    let mut locked_stdin;
    let mut opened_file;

    let file: &mut dyn Read = match matches.value_of("INPUT") {
        Some(path) => {
            info!("Reading file '{}'", path);
            opened_file = fs::File::open(path)?;
            &mut opened_file
        }
        None => {
            info!("Reading from stdin");
            locked_stdin = stdin.lock();
            &mut locked_stdin
        }
    };

    let mut solver = Solver::new();
    solver.add_dimacs_cnf(file)?;

    let solution = if matches.is_present("naive") {
        solver.solve_naive()?
    } else {
        solver.solve()?
    };

    match solution {
        Some(model) => {
            println!("{}", model);
            Ok(0)
        }
        None => {
            println!("UNSAT");
            Ok(0)
        }
    }
}
