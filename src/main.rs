#![warn(rust_2018_idioms)]

//! CLI entry point: parses a problem file (or stdin), runs the search
//! engine to exhaustion or to the requested target length, and writes
//! the emission stream in the requested output format (§9.3).

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use symprefix::{
    cli::{CommandLineOptions, Settings},
    engine::{Emission, SearchEngine},
    labeler,
    output,
    parser::parse_problem,
    statistics::Statistics,
    time, Error,
};

fn read_input(options: &CommandLineOptions) -> Result<String, Error> {
    match &options.file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn open_output(options: &CommandLineOptions) -> Result<Box<dyn Write>, Error> {
    match &options.output {
        Some(path) => Ok(Box::new(fs::File::create(path)?)),
        None => Ok(Box::new(io::stdout())),
    }
}

fn drain_engine(engine: &mut SearchEngine, statistics: &mut Statistics) -> Result<Vec<Emission>, Error> {
    let mut emissions = Vec::new();
    while let Some(emission) = engine.next_assignment()? {
        statistics.log_emission();
        emissions.push(emission);
    }
    Ok(emissions)
}

fn run() -> Result<(), Error> {
    let options = CommandLineOptions::parse();
    let settings = Settings::from(&options);

    let input = read_input(&options)?;
    time!(parse_elapsed, parsed, parse_problem(&input));
    let mut problem = parsed?;
    if settings.verbose {
        eprintln!("parsing took {:?}", parse_elapsed);
    }

    if settings.require_explicit_graph && !problem.explicit_graph {
        return Err(Error::ParseError(vec![nom::error::VerboseErrorKind::Context(
            "an explicit symmetry graph was required (-g) but none was supplied",
        )]));
    }
    if settings.no_cnf {
        problem.cnf = None;
    }

    problem.validate()?;

    let mut writer = open_output(&options)?;

    if settings.symmetry_only {
        let mut g0 = problem.graph.clone();
        let analyzed = labeler::analyze(&mut g0);
        writeln!(writer, "{:?}", analyzed.orbits)?;
        return Ok(());
    }

    let cnf_mode = problem.cnf.is_some();
    let mut statistics = Statistics::start();
    let mut engine = SearchEngine::new(problem.clone(), settings.target_length, settings.threshold)?;

    time!(search_elapsed, emissions, drain_engine(&mut engine, &mut statistics));
    let emissions = emissions?;
    statistics.finish(engine.level_statistics());
    if settings.verbose {
        eprintln!("search took {:?}", search_elapsed);
    }

    if settings.incremental {
        output::write_incremental_cubes(&problem, emissions.into_iter(), &mut writer)?;
    } else if cnf_mode {
        output::write_cnf_reemission(&problem, emissions.into_iter(), &mut writer)?;
    } else {
        output::write_textual(&problem, emissions.into_iter(), &mut writer)?;
    }

    if settings.verbose {
        statistics.report();
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
