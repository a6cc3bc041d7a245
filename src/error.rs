// error.rs
//
// This file defines the AssemblerError type for the assembler.
// It provides error handling with location and source context.

use crate::ast::Location;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssemblerError>;

/// The fault classes the assembler can report. Every one of them aborts the
/// translation at the point of detection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("usage: {0}")]
    Usage(String),

    #[error("register '{name}' is not valid as {role}")]
    OperandTable { name: String, role: &'static str },

    #[error("{what} {value} out of range (must be {min} to {max})")]
    NumericRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("invalid decimal number '{0}'")]
    InvalidNumber(String),

    #[error("undefined label '{0}'")]
    UnresolvedLabel(String),

    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),

    #[error("duplicate label '{label}' (previously defined on line {previous_line})")]
    LabelConflict { label: String, previous_line: usize },

    #[error("'{mnemonic}' expects {expected} operand(s), found {found}")]
    OperandCount {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("malformed label definition: {0}")]
    MalformedLabel(String),

    #[error("program has {0} instructions but the address space holds 256 words")]
    ProgramTooLarge(usize),

    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

/// An error type for the assembler, including location and message, with context formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerError {
    pub location: Option<Location>,
    pub kind: ErrorKind,
}

impl AssemblerError {
    pub fn from_context(kind: ErrorKind, location: Location) -> Self {
        AssemblerError { location: Some(location), kind }
    }

    pub fn no_context(kind: ErrorKind) -> Self {
        AssemblerError { location: None, kind }
    }

    pub fn io(path: &str, err: &std::io::Error) -> Self {
        AssemblerError::no_context(ErrorKind::Io {
            path: path.to_string(),
            message: err.to_string(),
        })
    }

    /// Render the error followed by the surrounding source lines, with the
    /// faulting line marked.
    pub fn with_source_context(&self, source_text: &str) -> String {
        let Some(location) = &self.location else {
            return self.to_string();
        };
        let lines: Vec<&str> = source_text.lines().collect();
        let line_num = location.line;
        let start = line_num.saturating_sub(4);
        let end = (line_num + 3).min(lines.len());
        let mut context = String::new();
        for (i, text) in lines.iter().enumerate().take(end).skip(start) {
            let marker = if i + 1 == line_num { ">>> " } else { "    " };
            context.push_str(&format!("{}{:4}: {}\n", marker, i + 1, text));
        }
        format!("{}\n{}", self, context)
    }
}

impl fmt::Display for AssemblerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "Error at {}: {}", location, self.kind),
            None => write!(f, "Error: {}", self.kind),
        }
    }
}

impl std::error::Error for AssemblerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
