use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use prolog_compiler::LinkageMode;
use prolog_vm::ResolverConfig;

use crate::cli::ResolveArgs;
use crate::engine::Engine;
use crate::util::{format_solution, read_file};

pub struct ReplArgs {
    pub file: Option<PathBuf>,
    pub resolve: ResolveArgs,
}

/// A simple read-clause-run-query loop: every line is fed to the engine
/// verbatim, so `f(x).` adds a fact and `?- f(X).` runs a query against
/// everything consulted so far, in the spirit of a Prolog top level.
pub fn run(args: ReplArgs) {
    let linkage = if args.resolve.strict {
        LinkageMode::Strict
    } else {
        LinkageMode::Lenient
    };
    let config = ResolverConfig::default()
        .max_steps(args.resolve.max_steps)
        .strict_errors(args.resolve.strict_errors);

    let mut engine = Engine::new(config, linkage);

    if let Some(path) = &args.file {
        let source = read_file(path);
        if let Err(e) = engine.consult(&source) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("?- ");
        let _ = stdout.flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match engine.consult(line) {
            Ok(Some(compiled)) => {
                let mut query_run = engine.query(&compiled);
                if args.resolve.trace {
                    query_run.set_tracer(Box::new(prolog_vm::PrintTracer));
                }
                match query_run.next() {
                    Some(Ok(solution)) => println!("{}", format_solution(&solution)),
                    Some(Err(e)) => eprintln!("error: {}", e),
                    None => println!("false."),
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("error: {}", e),
        }
    }
}
