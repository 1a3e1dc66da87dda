//! Argument parsing and dispatch matching §6's reference CLI table,
//! wiring the input layer, search engine and output layer together.
use std::path::PathBuf;

use clap::Parser;

use crate::graph::VertexIndex;

#[derive(Parser, Debug)]
#[clap(name = "symprefix", about = "Adaptive prefix-assignment symmetry reduction")]
pub struct CommandLineOptions {
    /// Enable diagnostic prints.
    #[clap(short, long)]
    pub verbose: bool,
    /// Expect an explicit symmetry graph (`p edge`) rather than
    /// deriving one from the CNF.
    #[clap(short, long)]
    pub graph: bool,
    /// Skip the CNF: re-emission falls back to the textual format even
    /// when a CNF was supplied.
    #[clap(short, long = "no-cnf")]
    pub no_cnf: bool,
    /// Run initialization only: print G₀'s orbits and exit.
    #[clap(short, long = "symmetry-only")]
    pub symmetry_only: bool,
    /// Emit the incremental cube format instead of the default.
    #[clap(short, long)]
    pub incremental: bool,
    /// Threshold t: emit as soon as |Aut(H)| drops to or below this.
    #[clap(short, long, default_value_t = 0)]
    pub threshold: u64,
    /// Target prefix length K.
    #[clap(short = 'l', long = "length")]
    pub length: usize,
    /// Supply an initial prefix on the command line (1-indexed graph
    /// vertices, like the `f` records of §6).
    #[clap(short, long, multiple_values = true)]
    pub prefix: Vec<VertexIndex>,
    /// Read the problem from this file instead of stdin.
    #[clap(short, long)]
    pub file: Option<PathBuf>,
    /// Write output to this file instead of stdout.
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

/// Threads the parsed CLI flags relevant to the engine and output layer
/// through to `main`, mirroring the teacher's own `Settings`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub threshold: u64,
    pub target_length: usize,
    pub verbose: bool,
    pub incremental: bool,
    pub no_cnf: bool,
    pub symmetry_only: bool,
    pub require_explicit_graph: bool,
}

impl From<&CommandLineOptions> for Settings {
    fn from(options: &CommandLineOptions) -> Self {
        Settings {
            threshold: options.threshold,
            target_length: options.length,
            verbose: options.verbose,
            incremental: options.incremental,
            no_cnf: options.no_cnf,
            symmetry_only: options.symmetry_only,
            require_explicit_graph: options.graph,
        }
    }
}
