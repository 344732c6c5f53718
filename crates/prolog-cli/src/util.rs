//! Shared helpers for the `consult`/`query`/`repl`/`dump` commands: source
//! loading and solution formatting.

use std::fs;
use std::path::Path;

use prolog_vm::{Binding, Solution};

use crate::cli::SourceArgs;
use crate::engine::QueryRun;

/// Read a `SourceArgs` group's chosen input: an inline `-e`/`--eval` string
/// takes precedence, otherwise the file is read from disk.
pub fn load_source(args: &SourceArgs) -> String {
    if let Some(text) = &args.text {
        return text.clone();
    }
    let path = args
        .file
        .as_deref()
        .expect("clap's required source_input group guarantees file or text is present");
    read_file(path)
}

pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read '{}': {}", path.display(), e);
        std::process::exit(1);
    })
}

/// Format one solution as `name = value, ...`, or `true` for a query with
/// no named variables.
pub fn format_solution(solution: &Solution) -> String {
    if solution.is_empty() {
        return "true".to_string();
    }
    let mut names: Vec<_> = solution.iter().map(|(name, _)| name).collect();
    names.sort_unstable();
    names
        .into_iter()
        .map(|name| format!("{} = {}", name, format_binding(solution.get(name).unwrap())))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print every solution `run` produces (or just the first, unless `all`),
/// the way `consult`/`query` both report a query's results. Exits the
/// process on a resolver error or on total failure, matching the
/// teacher's "errors go to stderr, exit(1)" command style.
pub fn print_solutions(run: &mut QueryRun<'_>, all: bool) {
    let mut found = false;
    loop {
        match run.next() {
            Some(Ok(solution)) => {
                found = true;
                println!("{}", format_solution(&solution));
                if !all {
                    break;
                }
            }
            Some(Err(e)) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
            None => break,
        }
    }

    if !found {
        println!("false.");
        std::process::exit(1);
    }
}

fn format_binding(binding: &Binding) -> String {
    match binding {
        Binding::Atom(name) => name.clone(),
        Binding::Int(v) => v.to_string(),
        Binding::Real(v) => v.to_string(),
        Binding::Nil => "[]".to_string(),
        Binding::Struct(name, args) => {
            let rendered: Vec<_> = args.iter().map(format_binding).collect();
            format!("{}({})", name, rendered.join(", "))
        }
        Binding::Cons(head, tail) => format!("[{}|{}]", format_binding(head), format_binding(tail)),
        Binding::Unbound => "_".to_string(),
    }
}

#[cfg(test)]
#[path = "util_tests.rs"]
mod util_tests;
