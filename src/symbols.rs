// symbols.rs
//
// This file implements the label resolution pass. It walks the token lines
// once, binding every label to the address of the next instruction and
// numbering the remaining lines as the instruction stream.

use crate::ast::{InstructionLine, Location, TokenLine};
use crate::error::{AssemblerError, ErrorKind, Result};
use std::collections::HashMap;

/// Terminates a label definition, e.g. `loop:`.
pub const LABEL_TERMINATOR: char = ':';

/// What to do when a label is defined more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// The later definition silently replaces the earlier one.
    #[default]
    LastWins,
    /// A second definition is a `LabelConflict` error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDefinition {
    pub address: usize,
    pub location: Location,
}

/// Maps case-folded label names to instruction addresses. Built once by
/// `resolve_labels` and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<String, LabelDefinition>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.labels.get(label).map(|def| def.address)
    }

    pub fn definition(&self, label: &str) -> Option<&LabelDefinition> {
        self.labels.get(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels ordered by address, then by name.
    pub fn sorted(&self) -> Vec<(&str, &LabelDefinition)> {
        let mut entries: Vec<(&str, &LabelDefinition)> =
            self.labels.iter().map(|(name, def)| (name.as_str(), def)).collect();
        entries.sort_by(|a, b| a.1.address.cmp(&b.1.address).then(a.0.cmp(b.0)));
        entries
    }

    fn define(
        &mut self,
        label: String,
        definition: LabelDefinition,
        policy: LabelPolicy,
    ) -> Result<()> {
        if policy == LabelPolicy::Reject {
            if let Some(previous) = self.labels.get(&label) {
                return Err(AssemblerError::from_context(
                    ErrorKind::LabelConflict {
                        label,
                        previous_line: previous.location.line,
                    },
                    definition.location,
                ));
            }
        }
        self.labels.insert(label, definition);
        Ok(())
    }
}

/// Returns the symbol if the line is a label definition.
pub fn label_name(line: &TokenLine) -> Option<&str> {
    line.words.first().and_then(|word| word.strip_suffix(LABEL_TERMINATOR))
}

/// Pass 1: separate label definitions from instructions and bind each label
/// to the address of the instruction that follows it.
pub fn resolve_labels(
    lines: Vec<TokenLine>,
    policy: LabelPolicy,
) -> Result<(Vec<InstructionLine>, LabelTable)> {
    let mut table = LabelTable::new();
    let mut instructions = Vec::new();
    let mut address: usize = 0;

    for line in lines {
        if let Some(name) = label_name(&line) {
            if name.is_empty() {
                return Err(AssemblerError::from_context(
                    ErrorKind::MalformedLabel("label name is empty".to_string()),
                    line.location,
                ));
            }
            if line.words.len() > 1 {
                return Err(AssemblerError::from_context(
                    ErrorKind::MalformedLabel(format!(
                        "'{}' must be alone on its line, found '{}' after it",
                        line.words[0],
                        line.words[1..].join(" ")
                    )),
                    line.location,
                ));
            }
            let name = name.to_string();
            table.define(name, LabelDefinition { address, location: line.location }, policy)?;
        } else {
            instructions.push(InstructionLine {
                address,
                location: line.location,
                words: line.words,
            });
            address += 1;
        }
    }

    Ok((instructions, table))
}
