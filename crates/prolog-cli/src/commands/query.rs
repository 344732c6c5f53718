use prolog_compiler::LinkageMode;
use prolog_vm::ResolverConfig;

use crate::cli::{ResolveArgs, SourceArgs};
use crate::engine::Engine;
use crate::util::{load_source, print_solutions};

pub struct QueryArgs {
    pub source: SourceArgs,
    pub query: String,
    pub resolve: ResolveArgs,
}

pub fn run(args: QueryArgs) {
    let mut source = load_source(&args.source);
    source.push_str("\n?- ");
    source.push_str(&args.query);
    source.push_str(".\n");

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
        Ok(Some(compiled)) => compiled,
        Ok(None) => {
            eprintln!("error: internal invariant violated: a trailing '?- ...' clause always compiles to a query");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut run = engine.query(&compiled);
    if args.resolve.trace {
        run.set_tracer(Box::new(prolog_vm::PrintTracer));
    }

    print_solutions(&mut run, args.resolve.all);
}
