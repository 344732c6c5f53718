//! Command-line surface: one subcommand per way of driving the engine.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prolog", bin_name = "prolog")]
#[command(about = "VAM2P/VAMAI resolution engine for a Prolog-style logic language")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load facts and rules from a file and run its trailing query, if any
    #[command(after_help = r#"EXAMPLES:
  prolog consult family.pl
  prolog consult family.pl --all
  prolog consult -e 'f(x). f(y). ?- f(X).'"#)]
    Consult {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        resolve: ResolveArgs,
    },

    /// Load a file, then run an additional query against it
    #[command(after_help = r#"EXAMPLES:
  prolog query family.pl 'parent(tom, X)'
  prolog query family.pl 'parent(tom, X)' --all"#)]
    Query {
        #[command(flatten)]
        source: SourceArgs,

        /// Query text, e.g. "f(X), g(X)" (no leading "?-", no trailing '.')
        query: String,

        #[command(flatten)]
        resolve: ResolveArgs,
    },

    /// Consult a file, then read queries interactively from stdin
    #[command(after_help = r#"EXAMPLES:
  prolog repl family.pl
  prolog repl"#)]
    Repl {
        /// Facts/rules file to consult before the first prompt
        file: Option<PathBuf>,

        #[command(flatten)]
        resolve: ResolveArgs,
    },

    /// Print the compiled bytecode for every loaded predicate
    #[command(after_help = r#"EXAMPLES:
  prolog dump family.pl"#)]
    Dump {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
#[group(id = "source_input", required = true, multiple = false)]
pub struct SourceArgs {
    /// Source file to consult
    pub file: Option<PathBuf>,

    /// Inline source text
    #[arg(short = 'e', long = "eval", value_name = "TEXT")]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Report every solution instead of stopping at the first
    #[arg(long)]
    pub all: bool,

    /// Dispatched-instruction budget per solution search (0 = unlimited)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub max_steps: u32,

    /// Treat an undefined predicate call as a compile error instead of
    /// ordinary search failure
    #[arg(long)]
    pub strict: bool,

    /// A built-in's type/instantiation error is a hard error instead of
    /// an ordinary failed goal
    #[arg(long)]
    pub strict_errors: bool,

    /// Print each goal call/redo and each cut as it is dispatched
    #[arg(long)]
    pub trace: bool,
}
