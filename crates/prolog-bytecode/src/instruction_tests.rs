use super::*;
use std::collections::HashSet;

fn sample_instructions() -> Vec<Instruction> {
    vec![
        Instruction::Atom(FunctorId::from_raw(7)),
        Instruction::Int(-42),
        Instruction::Real(3.5),
        Instruction::Struct(FunctorId::from_raw(9)),
        Instruction::Nil,
        Instruction::List,
        Instruction::Void,
        Instruction::FirstTemp(VarSlot::new(0)),
        Instruction::NextTemp(VarSlot::new(0)),
        Instruction::FirstVar(VarSlot::new(1)),
        Instruction::NextVar(VarSlot::new(1)),
        Instruction::Goal {
            name: FunctorId::from_raw(3),
            continuation: 128,
        },
        Instruction::Call,
        Instruction::LastCall,
        Instruction::Cut,
        Instruction::NoGoal,
    ]
}

#[test]
fn encode_decode_roundtrip() {
    for instruction in sample_instructions() {
        let mut buf = Vec::new();
        instruction.encode(&mut buf);
        let (decoded, consumed) = Instruction::decode(&buf).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(decoded, instruction);
    }
}

#[test]
fn decode_rejects_unknown_opcode() {
    let bytes = [0xFFu8, 0xFF];
    assert_eq!(
        Instruction::decode(&bytes).unwrap_err(),
        BytecodeError::UnknownOpcode(0xFFFF)
    );
}

#[test]
fn decode_rejects_truncated_stream() {
    let mut buf = Vec::new();
    Instruction::Goal {
        name: FunctorId::from_raw(1),
        continuation: 2,
    }
    .encode(&mut buf);
    buf.truncate(buf.len() - 1);
    assert_eq!(
        Instruction::decode(&buf).unwrap_err(),
        BytecodeError::Truncated
    );
}

#[test]
fn golomb_property_pairwise_sums_are_unique() {
    let mut sums = HashSet::new();
    for &a in Opcode::ALL {
        for &b in Opcode::ALL {
            if a.as_u16() > b.as_u16() {
                continue;
            }
            let sum = a.as_u16() as u32 + b.as_u16() as u32;
            assert!(
                sums.insert(sum),
                "sum {sum} collides for pair ({a:?}, {b:?})"
            );
        }
    }
}

#[test]
fn sequential_encode_decode_consumes_stream() {
    let stream = sample_instructions();
    let mut buf = Vec::new();
    for instruction in &stream {
        instruction.encode(&mut buf);
    }

    let mut offset = 0;
    let mut decoded = Vec::new();
    while offset < buf.len() {
        let (instruction, consumed) = Instruction::decode(&buf[offset..]).unwrap();
        decoded.push(instruction);
        offset += consumed;
    }

    assert_eq!(decoded, stream);
}
