use clap::Parser;

use prolog_cli::cli::{Cli, Command};
use prolog_cli::commands::{consult, dump, query, repl};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Consult { source, resolve } => consult::run(consult::ConsultArgs { source, resolve }),
        Command::Query { source, query: text, resolve } => {
            query::run(query::QueryArgs { source, query: text, resolve })
        }
        Command::Repl { file, resolve } => repl::run(repl::ReplArgs { file, resolve }),
        Command::Dump { source } => dump::run(dump::DumpArgs { source }),
    }
}
