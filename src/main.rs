mod cli;
mod error_handling;
mod grammar;
mod parser;
mod generator;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::Cli;
use generator::chooser::{Chooser, ConsoleChooser, RandomChooser};
use generator::Generator;
use grammar::Grammar;

fn derive(grammar: &Grammar, chooser: impl Chooser, cli: &Cli, path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    Generator::new(grammar, chooser, io::stdout())
        .with_max_steps(cli.max_steps)
        .generate(path)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let path = cli::resolve_path(&cli.file)?;
    let grammar = parser::parse_file(&path)?;

    if cli.show_grammar {
        println!("{}\n", grammar);
    }

    if cli.random {
        let rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };
        derive(&grammar, RandomChooser::new(rng), cli, path)
    } else {
        derive(&grammar, ConsoleChooser::new(io::stdin().lock(), io::stdout()), cli, path)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(&cli) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
