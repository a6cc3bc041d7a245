// ast.rs
//
// This file defines the data structures that flow between the assembler
// stages: raw token lines from the tokenizer, addressed instruction lines from
// the label resolver, and the typed instruction form consumed by the encoder.
//
// The overall process works as follows:
// 1. Read the entire source file.
// 2. Tokenize it into `TokenLine`s (comments and blank lines removed, case folded).
// 3. Resolve labels: strip label lines, number the rest as `InstructionLine`s.
// 4. Parse each `InstructionLine` into an `Instruction` with typed operands.
// 5. Encode each `Instruction` into a 16-bit word against the label table.
// 6. Serialize the words as a memory-initialization image.
// Any error aborts immediately with the `Location` of the offending line.

use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A single location in the source file, used for error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// The lowercase words of one non-blank source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLine {
    pub location: Location,
    pub words: Vec<String>,
}

/// A token line that survived label resolution, tagged with its address in
/// the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionLine {
    pub address: usize,
    pub location: Location,
    pub words: Vec<String>,
}

// ==============================================================================
// Register Operand Tables
// ==============================================================================
//
// Each instruction field accepts registers from exactly one table. The
// discriminant of each variant is its three-bit field code.

/// A closed set of register names valid for one operand role.
pub trait RegisterTable: Copy + FromStr + fmt::Display {
    /// Describes the operand role in diagnostics.
    const ROLE: &'static str;

    /// The three-bit code placed in the instruction word.
    fn code(self) -> u16;
}

/// Table B: general destination/source registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[repr(u16)]
pub enum GeneralReg {
    Ra = 0b000,
    Rb = 0b001,
    Rc = 0b010,
    Rd = 0b011,
    Re = 0b100,
    Sp = 0b101,
}

/// Table C: registers reachable by push and pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[repr(u16)]
pub enum StackReg {
    Ra = 0b000,
    Rb = 0b001,
    Rc = 0b010,
    Rd = 0b011,
    Re = 0b100,
    Sp = 0b101,
    Pc = 0b110,
    Cr = 0b111,
}

/// Table D: move sources and port operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[repr(u16)]
pub enum MoveReg {
    Ra = 0b000,
    Rb = 0b001,
    Rc = 0b010,
    Rd = 0b011,
    Re = 0b100,
    Sp = 0b101,
    Pc = 0b110,
    Ir = 0b111,
}

/// Table E: ALU source operands, including the constant sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[repr(u16)]
pub enum AluSource {
    Ra = 0b000,
    Rb = 0b001,
    Rc = 0b010,
    Rd = 0b011,
    Re = 0b100,
    Sp = 0b101,
    Zeros = 0b110,
    Ones = 0b111,
}

impl RegisterTable for GeneralReg {
    const ROLE: &'static str = "a general register (ra, rb, rc, rd, re, sp)";

    fn code(self) -> u16 {
        self as u16
    }
}

impl RegisterTable for StackReg {
    const ROLE: &'static str = "a stack operand (ra, rb, rc, rd, re, sp, pc, cr)";

    fn code(self) -> u16 {
        self as u16
    }
}

impl RegisterTable for MoveReg {
    const ROLE: &'static str = "a move/port operand (ra, rb, rc, rd, re, sp, pc, ir)";

    fn code(self) -> u16 {
        self as u16
    }
}

impl RegisterTable for AluSource {
    const ROLE: &'static str = "an ALU source (ra, rb, rc, rd, re, sp, zeros, ones)";

    fn code(self) -> u16 {
        self as u16
    }
}

// ==============================================================================
// Mnemonics and Instructions
// ==============================================================================

/// Every mnemonic the assembler accepts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Mnemonic {
    Load,
    Loada,
    Store,
    Storea,
    Bra,
    Braz,
    Bran,
    Brao,
    Brac,
    Call,
    Return,
    #[strum(to_string = "halt", serialize = "exit")]
    Halt,
    Push,
    Pop,
    Oport,
    Iport,
    Add,
    Sub,
    And,
    Or,
    Xor,
    Shiftl,
    Shiftr,
    Rotl,
    Rotr,
    Move,
    Movei,
}

impl Mnemonic {
    /// Number of operands that must follow the mnemonic.
    pub fn operand_count(self) -> usize {
        match self {
            Mnemonic::Return | Mnemonic::Halt => 0,
            Mnemonic::Bra
            | Mnemonic::Braz
            | Mnemonic::Bran
            | Mnemonic::Brao
            | Mnemonic::Brac
            | Mnemonic::Call
            | Mnemonic::Push
            | Mnemonic::Pop
            | Mnemonic::Oport
            | Mnemonic::Iport => 1,
            Mnemonic::Load
            | Mnemonic::Loada
            | Mnemonic::Store
            | Mnemonic::Storea
            | Mnemonic::Shiftl
            | Mnemonic::Shiftr
            | Mnemonic::Rotl
            | Mnemonic::Rotr
            | Mnemonic::Move
            | Mnemonic::Movei => 2,
            Mnemonic::Add | Mnemonic::Sub | Mnemonic::And | Mnemonic::Or | Mnemonic::Xor => 3,
        }
    }
}

/// Condition tested by a branch. `Always` is the unconditional `bra`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchCondition {
    Always,
    Zero,
    Negative,
    Overflow,
    Carry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    And,
    Or,
    Xor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    ShiftLeft,
    ShiftRight,
    RotateLeft,
    RotateRight,
}

/// An instruction with every register operand resolved against its table.
/// Numeric operands are kept as written; range checks happen at encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `load D A` / `loada D A` (indexed by RE)
    Load { indexed: bool, dest: GeneralReg, address: i64 },
    /// `store S A` / `storea S A` (indexed by RE)
    Store { indexed: bool, src: GeneralReg, address: i64 },
    Branch { condition: BranchCondition, target: String },
    Call { target: String },
    Return,
    Halt,
    Push(StackReg),
    Pop(StackReg),
    OutPort(MoveReg),
    InPort(MoveReg),
    Alu { op: AluOp, a: AluSource, b: AluSource, dest: GeneralReg },
    Shift { op: ShiftOp, src: AluSource, dest: GeneralReg },
    Move { src: MoveReg, dest: GeneralReg },
    MoveImmediate { value: i64, dest: MoveReg },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Load { indexed, dest, address } => {
                let name = if *indexed { "loada" } else { "load" };
                write!(f, "{} {} {}", name, dest, address)
            }
            Instruction::Store { indexed, src, address } => {
                let name = if *indexed { "storea" } else { "store" };
                write!(f, "{} {} {}", name, src, address)
            }
            Instruction::Branch { condition, target } => {
                let name = match condition {
                    BranchCondition::Always => "bra",
                    BranchCondition::Zero => "braz",
                    BranchCondition::Negative => "bran",
                    BranchCondition::Overflow => "brao",
                    BranchCondition::Carry => "brac",
                };
                write!(f, "{} {}", name, target)
            }
            Instruction::Call { target } => write!(f, "call {}", target),
            Instruction::Return => write!(f, "return"),
            Instruction::Halt => write!(f, "halt"),
            Instruction::Push(reg) => write!(f, "push {}", reg),
            Instruction::Pop(reg) => write!(f, "pop {}", reg),
            Instruction::OutPort(reg) => write!(f, "oport {}", reg),
            Instruction::InPort(reg) => write!(f, "iport {}", reg),
            Instruction::Alu { op, a, b, dest } => {
                let name = match op {
                    AluOp::Add => "add",
                    AluOp::Sub => "sub",
                    AluOp::And => "and",
                    AluOp::Or => "or",
                    AluOp::Xor => "xor",
                };
                write!(f, "{} {} {} {}", name, a, b, dest)
            }
            Instruction::Shift { op, src, dest } => {
                let name = match op {
                    ShiftOp::ShiftLeft => "shiftl",
                    ShiftOp::ShiftRight => "shiftr",
                    ShiftOp::RotateLeft => "rotl",
                    ShiftOp::RotateRight => "rotr",
                };
                write!(f, "{} {} {}", name, src, dest)
            }
            Instruction::Move { src, dest } => write!(f, "move {} {}", src, dest),
            Instruction::MoveImmediate { value, dest } => {
                write!(f, "movei {} {}", value, dest)
            }
        }
    }
}
