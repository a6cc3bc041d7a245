// parser.rs
//
// Turns an addressed instruction line into a typed `Instruction`.
//
// The mnemonic selects the operand layout; each register operand is checked
// against the one table its field accepts, and numeric operands must be
// decimal literals. Labels are left as names for the encoder to resolve.

use crate::ast::{
    AluOp, BranchCondition, Instruction, InstructionLine, Location, Mnemonic, RegisterTable,
    ShiftOp,
};
use crate::error::{AssemblerError, ErrorKind, Result};
use std::num::IntErrorKind;
use std::str::FromStr;

pub fn parse(line: &InstructionLine) -> Result<Instruction> {
    let Some((first, operands)) = line.words.split_first() else {
        // the tokenizer never produces empty lines
        return Err(AssemblerError::from_context(
            ErrorKind::UnknownMnemonic(String::new()),
            line.location.clone(),
        ));
    };

    let mnemonic = Mnemonic::from_str(first).map_err(|_| {
        AssemblerError::from_context(
            ErrorKind::UnknownMnemonic(first.clone()),
            line.location.clone(),
        )
    })?;

    let expected = mnemonic.operand_count();
    if operands.len() != expected {
        return Err(AssemblerError::from_context(
            ErrorKind::OperandCount {
                mnemonic: mnemonic.into(),
                expected,
                found: operands.len(),
            },
            line.location.clone(),
        ));
    }

    let loc = &line.location;
    let inst = match mnemonic {
        Mnemonic::Load | Mnemonic::Loada => Instruction::Load {
            indexed: mnemonic == Mnemonic::Loada,
            dest: parse_register(&operands[0], loc)?,
            address: parse_number(&operands[1], loc)?,
        },
        Mnemonic::Store | Mnemonic::Storea => Instruction::Store {
            indexed: mnemonic == Mnemonic::Storea,
            src: parse_register(&operands[0], loc)?,
            address: parse_number(&operands[1], loc)?,
        },
        Mnemonic::Bra => branch(BranchCondition::Always, &operands[0]),
        Mnemonic::Braz => branch(BranchCondition::Zero, &operands[0]),
        Mnemonic::Bran => branch(BranchCondition::Negative, &operands[0]),
        Mnemonic::Brao => branch(BranchCondition::Overflow, &operands[0]),
        Mnemonic::Brac => branch(BranchCondition::Carry, &operands[0]),
        Mnemonic::Call => Instruction::Call { target: operands[0].clone() },
        Mnemonic::Return => Instruction::Return,
        Mnemonic::Halt => Instruction::Halt,
        Mnemonic::Push => Instruction::Push(parse_register(&operands[0], loc)?),
        Mnemonic::Pop => Instruction::Pop(parse_register(&operands[0], loc)?),
        Mnemonic::Oport => Instruction::OutPort(parse_register(&operands[0], loc)?),
        Mnemonic::Iport => Instruction::InPort(parse_register(&operands[0], loc)?),
        Mnemonic::Add => alu(AluOp::Add, operands, loc)?,
        Mnemonic::Sub => alu(AluOp::Sub, operands, loc)?,
        Mnemonic::And => alu(AluOp::And, operands, loc)?,
        Mnemonic::Or => alu(AluOp::Or, operands, loc)?,
        Mnemonic::Xor => alu(AluOp::Xor, operands, loc)?,
        Mnemonic::Shiftl => shift(ShiftOp::ShiftLeft, operands, loc)?,
        Mnemonic::Shiftr => shift(ShiftOp::ShiftRight, operands, loc)?,
        Mnemonic::Rotl => shift(ShiftOp::RotateLeft, operands, loc)?,
        Mnemonic::Rotr => shift(ShiftOp::RotateRight, operands, loc)?,
        Mnemonic::Move => Instruction::Move {
            src: parse_register(&operands[0], loc)?,
            dest: parse_register(&operands[1], loc)?,
        },
        Mnemonic::Movei => Instruction::MoveImmediate {
            value: parse_number(&operands[0], loc)?,
            dest: parse_register(&operands[1], loc)?,
        },
    };
    Ok(inst)
}

fn branch(condition: BranchCondition, target: &str) -> Instruction {
    Instruction::Branch { condition, target: target.to_string() }
}

fn alu(op: AluOp, operands: &[String], loc: &Location) -> Result<Instruction> {
    Ok(Instruction::Alu {
        op,
        a: parse_register(&operands[0], loc)?,
        b: parse_register(&operands[1], loc)?,
        dest: parse_register(&operands[2], loc)?,
    })
}

fn shift(op: ShiftOp, operands: &[String], loc: &Location) -> Result<Instruction> {
    Ok(Instruction::Shift {
        op,
        src: parse_register(&operands[0], loc)?,
        dest: parse_register(&operands[1], loc)?,
    })
}

/// Look a register name up in the table `T` serves.
pub fn parse_register<T: RegisterTable>(word: &str, loc: &Location) -> Result<T> {
    T::from_str(word).map_err(|_| {
        AssemblerError::from_context(
            ErrorKind::OperandTable { name: word.to_string(), role: T::ROLE },
            loc.clone(),
        )
    })
}

/// Parse a decimal literal. A sign, if present, must be attached to the digits.
///
/// Well-formed literals too large for `i64` saturate, so the encoder's field
/// check reports them as out of range like any other oversized value.
pub fn parse_number(word: &str, loc: &Location) -> Result<i64> {
    let digits = word.strip_prefix(['-', '+']).unwrap_or(word);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AssemblerError::from_context(
            ErrorKind::InvalidNumber(word.to_string()),
            loc.clone(),
        ));
    }
    match word.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => Ok(i64::MIN),
        Err(_) => Ok(i64::MAX),
    }
}
