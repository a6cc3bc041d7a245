// encoder.rs
//
// Instruction encoder
//
// This module takes parsed instructions and the completed label table and
// packs each instruction into one 16-bit word. Every word is laid out as a
// 4-bit opcode followed by fixed fields:
//
//   load/store    [op:4][indexed:1][B:3][address:8]
//   branch/call   [op:4][cond:4][target:8]
//   push/pop      [op:4][C:3][0:9]
//   oport/iport   [op:4][D:3][0:9]
//   alu           [op:4][E:3][E:3][0:3][B:3]
//   shift/rotate  [op:4][dir:1][E:3][0:5][B:3]
//   move          [op:4][0:1][D:3][0:5][B:3]
//   movei         [op:4][1:1][imm:8][D:3]
//
// Numeric fields are range-checked before packing; nothing is truncated.

use crate::ast::{
    AluOp, BranchCondition, Instruction, InstructionLine, Location, RegisterTable, ShiftOp,
};
use crate::error::{AssemblerError, ErrorKind, Result};
use crate::parser;
use crate::symbols::LabelTable;
use std::fmt;

/// Memory operands must be strictly below this address.
pub const MEMORY_ADDRESS_LIMIT: i64 = 255;

const OP_LOAD: u16 = 0b0000;
const OP_STORE: u16 = 0b0001;
const OP_BRANCH: u16 = 0b0010;
const OP_CONTROL: u16 = 0b0011;
const OP_PUSH: u16 = 0b0100;
const OP_POP: u16 = 0b0101;
const OP_OPORT: u16 = 0b0110;
const OP_IPORT: u16 = 0b0111;
const OP_ADD: u16 = 0b1000;
const OP_SUB: u16 = 0b1001;
const OP_AND: u16 = 0b1010;
const OP_OR: u16 = 0b1011;
const OP_XOR: u16 = 0b1100;
const OP_SHIFT: u16 = 0b1101;
const OP_ROTATE: u16 = 0b1110;
const OP_MOVE: u16 = 0b1111;

// Selectors in bits 11..8 of OP_CONTROL words
const CTL_ZERO: u16 = 0b0000;
const CTL_OVERFLOW: u16 = 0b0001;
const CTL_NEGATIVE: u16 = 0b0010;
const CTL_CARRY: u16 = 0b0011;
const CTL_CALL: u16 = 0b0100;
const CTL_RETURN: u16 = 0b1000;
const CTL_HALT: u16 = 0b1100;

/// One 16-bit instruction word. Displays as exactly sixteen binary digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedWord(pub u16);

impl EncodedWord {
    pub const WIDTH: usize = 16;
}

impl fmt::Display for EncodedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

// ============================================================================
// Numeric Packing
// ============================================================================

/// Plain 8-bit binary. Defined for 0..=255 only.
pub fn unsigned8(value: i64) -> Option<u8> {
    u8::try_from(value).ok()
}

/// 8-bit two's complement. Defined for -128..=127 only; a negative `n`
/// yields the bit pattern of `256 + n`.
pub fn signed8(value: i64) -> Option<u8> {
    i8::try_from(value).ok().map(|v| v as u8)
}

fn pack_unsigned8(value: i64, what: &'static str, loc: &Location) -> Result<u16> {
    unsigned8(value).map(u16::from).ok_or_else(|| range_error(what, value, 0, 255, loc))
}

fn pack_signed8(value: i64, what: &'static str, loc: &Location) -> Result<u16> {
    signed8(value).map(u16::from).ok_or_else(|| range_error(what, value, -128, 127, loc))
}

fn range_error(
    what: &'static str,
    value: i64,
    min: i64,
    max: i64,
    loc: &Location,
) -> AssemblerError {
    AssemblerError::from_context(ErrorKind::NumericRange { what, value, min, max }, loc.clone())
}

/// Validate a load/store address operand.
fn check_memory_address(address: i64, loc: &Location) -> Result<()> {
    if !(0..MEMORY_ADDRESS_LIMIT).contains(&address) {
        return Err(range_error("address", address, 0, MEMORY_ADDRESS_LIMIT - 1, loc));
    }
    Ok(())
}

// ============================================================================
// Instruction Encoding
// ============================================================================

fn resolve_target(target: &str, labels: &LabelTable, loc: &Location) -> Result<u16> {
    let address = labels.get(target).ok_or_else(|| {
        AssemblerError::from_context(ErrorKind::UnresolvedLabel(target.to_string()), loc.clone())
    })?;
    pack_unsigned8(address as i64, "label address", loc)
}

fn encode_memory(
    opcode: u16,
    indexed: bool,
    reg: u16,
    address: i64,
    loc: &Location,
) -> Result<u16> {
    check_memory_address(address, loc)?;
    let field = if indexed {
        pack_signed8(address, "indexed address", loc)?
    } else {
        pack_unsigned8(address, "address", loc)?
    };
    Ok(opcode << 12 | u16::from(indexed) << 11 | reg << 8 | field)
}

fn encode_alu(op: AluOp, a: u16, b: u16, dest: u16) -> u16 {
    let opcode = match op {
        AluOp::Add => OP_ADD,
        AluOp::Sub => OP_SUB,
        AluOp::And => OP_AND,
        AluOp::Or => OP_OR,
        AluOp::Xor => OP_XOR,
    };
    opcode << 12 | a << 9 | b << 6 | dest
}

fn encode_shift(op: ShiftOp, src: u16, dest: u16) -> u16 {
    let (opcode, right) = match op {
        ShiftOp::ShiftLeft => (OP_SHIFT, 0),
        ShiftOp::ShiftRight => (OP_SHIFT, 1),
        ShiftOp::RotateLeft => (OP_ROTATE, 0),
        ShiftOp::RotateRight => (OP_ROTATE, 1),
    };
    opcode << 12 | right << 11 | src << 8 | dest
}

/// Pack one instruction. Labels are looked up in the completed table.
pub fn encode_instruction(
    inst: &Instruction,
    labels: &LabelTable,
    loc: &Location,
) -> Result<EncodedWord> {
    let word = match inst {
        Instruction::Load { indexed, dest, address } => {
            encode_memory(OP_LOAD, *indexed, dest.code(), *address, loc)?
        }
        Instruction::Store { indexed, src, address } => {
            encode_memory(OP_STORE, *indexed, src.code(), *address, loc)?
        }
        Instruction::Branch { condition, target } => {
            let target = resolve_target(target, labels, loc)?;
            let (opcode, selector) = match condition {
                BranchCondition::Always => (OP_BRANCH, 0b0000),
                BranchCondition::Zero => (OP_CONTROL, CTL_ZERO),
                BranchCondition::Negative => (OP_CONTROL, CTL_NEGATIVE),
                BranchCondition::Overflow => (OP_CONTROL, CTL_OVERFLOW),
                BranchCondition::Carry => (OP_CONTROL, CTL_CARRY),
            };
            opcode << 12 | selector << 8 | target
        }
        Instruction::Call { target } => {
            OP_CONTROL << 12 | CTL_CALL << 8 | resolve_target(target, labels, loc)?
        }
        Instruction::Return => OP_CONTROL << 12 | CTL_RETURN << 8,
        Instruction::Halt => OP_CONTROL << 12 | CTL_HALT << 8,
        Instruction::Push(reg) => OP_PUSH << 12 | reg.code() << 9,
        Instruction::Pop(reg) => OP_POP << 12 | reg.code() << 9,
        Instruction::OutPort(reg) => OP_OPORT << 12 | reg.code() << 9,
        Instruction::InPort(reg) => OP_IPORT << 12 | reg.code() << 9,
        Instruction::Alu { op, a, b, dest } => encode_alu(*op, a.code(), b.code(), dest.code()),
        Instruction::Shift { op, src, dest } => encode_shift(*op, src.code(), dest.code()),
        Instruction::Move { src, dest } => OP_MOVE << 12 | src.code() << 8 | dest.code(),
        Instruction::MoveImmediate { value, dest } => {
            let imm = pack_signed8(*value, "immediate", loc)?;
            OP_MOVE << 12 | 1 << 11 | imm << 3 | dest.code()
        }
    };
    Ok(EncodedWord(word))
}

/// An instruction line together with its typed form and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedLine {
    pub line: InstructionLine,
    pub instruction: Instruction,
    pub word: EncodedWord,
}

/// Pass 2: encode every instruction line in address order, stopping at the
/// first fault.
pub fn encode_lines(lines: Vec<InstructionLine>, labels: &LabelTable) -> Result<Vec<EncodedLine>> {
    lines
        .into_iter()
        .map(|line| {
            let instruction = parser::parse(&line)?;
            let word = encode_instruction(&instruction, labels, &line.location)?;
            Ok(EncodedLine { line, instruction, word })
        })
        .collect()
}
