use prolog_bytecode::Instruction;
use prolog_compiler::LinkageMode;
use prolog_core::Interner;
use prolog_vm::ResolverConfig;

use crate::cli::SourceArgs;
use crate::engine::Engine;
use crate::util::load_source;

pub struct DumpArgs {
    pub source: SourceArgs,
}

pub fn run(args: DumpArgs) {
    let source = load_source(&args.source);
    let mut engine = Engine::new(ResolverConfig::default(), LinkageMode::Lenient);
    if let Err(e) = engine.consult(&source) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let interner = engine.interner();
    let mut predicates: Vec<_> = engine.code().predicates().collect();
    predicates.sort_by(|a, b| {
        let (name_a, _) = interner.name_of(a.0).expect("every indexed functor was interned");
        let (name_b, _) = interner.name_of(b.0).expect("every indexed functor was interned");
        (name_a, a.1).cmp(&(name_b, b.1))
    });

    for (name, arity) in predicates {
        let (text, _) = interner.name_of(name).expect("every indexed functor was interned");
        for entry in engine.code().entries_for(name, arity) {
            println!("{}/{} @ {}:", text, arity, entry);
            let mut offset = *entry;
            loop {
                let (instruction, next) = match engine.code().decode_at(offset) {
                    Ok(decoded) => decoded,
                    Err(e) => {
                        eprintln!("error: {}", e);
                        std::process::exit(1);
                    }
                };
                println!("  {:>6}: {}", offset, format_instruction(&instruction, interner));
                offset = next;
                if matches!(instruction, Instruction::NoGoal) {
                    break;
                }
            }
        }
    }
}

fn format_instruction(instruction: &Instruction, interner: &Interner) -> String {
    match instruction {
        Instruction::Atom(id) => format!("atom {}", functor_text(*id, interner)),
        Instruction::Int(v) => format!("int {v}"),
        Instruction::Real(v) => format!("real {v}"),
        Instruction::Struct(id) => format!("struct {}", functor_text(*id, interner)),
        Instruction::Nil => "nil".to_string(),
        Instruction::List => "list".to_string(),
        Instruction::Void => "void".to_string(),
        Instruction::FirstTemp(slot) => format!("first_temp {}", slot.as_u32()),
        Instruction::NextTemp(slot) => format!("next_temp {}", slot.as_u32()),
        Instruction::FirstVar(slot) => format!("first_var {}", slot.as_u32()),
        Instruction::NextVar(slot) => format!("next_var {}", slot.as_u32()),
        Instruction::Goal { name, continuation } => {
            format!("goal {} -> {continuation}", functor_text(*name, interner))
        }
        Instruction::Call => "call".to_string(),
        Instruction::LastCall => "last_call".to_string(),
        Instruction::Cut => "cut".to_string(),
        Instruction::NoGoal => "no_goal".to_string(),
    }
}

fn functor_text(id: prolog_core::FunctorId, interner: &Interner) -> String {
    let (text, arity) = interner.name_of(id).expect("every instruction's functor was interned");
    format!("{text}/{arity}")
}
