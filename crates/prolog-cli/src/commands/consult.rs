use prolog_compiler::LinkageMode;
use prolog_vm::ResolverConfig;

use crate::cli::{ResolveArgs, SourceArgs};
use crate::engine::Engine;
use crate::util::{load_source, print_solutions};

pub struct ConsultArgs {
    pub source: SourceArgs,
    pub resolve: ResolveArgs,
}

pub fn run(args: ConsultArgs) {
    let source = load_source(&args.source);
    let linkage = if args.resolve.strict {
        LinkageMode::Strict
    } else {
        LinkageMode::Lenient
    };
    let config = ResolverConfig::default()
        .max_steps(args.resolve.max_steps)
        .strict_errors(args.resolve.strict_errors);

    let mut engine = Engine::new(config, linkage);
    let compiled = match engine.consult(&source) {
        Ok(compiled) => compiled,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let Some(compiled) = compiled else {
        // Silent on success when there's no trailing query to run, like
        // `cargo check` reporting nothing for a clean build.
        return;
    };

    let mut run = engine.query(&compiled);
    if args.resolve.trace {
        run.set_tracer(Box::new(prolog_vm::PrintTracer));
    }

    print_solutions(&mut run, args.resolve.all);
}
