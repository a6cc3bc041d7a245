// assembler.rs
//
// Core assembly pipeline functions shared between main.rs and tests

use crate::encoder::{self, EncodedLine};
use crate::error::{AssemblerError, ErrorKind, Result};
use crate::mif::{self, MemoryImage};
use crate::symbols::{self, LabelPolicy, LabelTable};
use crate::tokenizer;
use std::fs;
use std::path::Path;

/// Settings that affect how a program is assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub label_policy: LabelPolicy,
    /// Print per-pass progress to stderr
    pub show_progress: bool,
}

/// Everything produced by a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub source_lines: usize,
    pub labels: LabelTable,
    pub program: Vec<EncodedLine>,
    pub image: MemoryImage,
}

/// Run both passes over `source_text` and build the memory image.
///
/// `file` is only used to label error locations.
pub fn assemble(source_text: &str, file: &str, options: &Options) -> Result<Assembly> {
    let tokens = tokenizer::tokenize(source_text, file);

    // Pass 1: bind labels, number instructions
    let (instructions, labels) = symbols::resolve_labels(tokens, options.label_policy)?;
    if options.show_progress {
        eprintln!(
            "Pass 1: {} label{}, {} instruction{}",
            labels.len(),
            if labels.len() == 1 { "" } else { "s" },
            instructions.len(),
            if instructions.len() == 1 { "" } else { "s" }
        );
    }
    if instructions.len() > mif::DEPTH {
        return Err(AssemblerError::no_context(ErrorKind::ProgramTooLarge(instructions.len())));
    }

    // Pass 2: encode against the finished label table
    let program = encoder::encode_lines(instructions, &labels)?;
    let image = MemoryImage::from_words(program.iter().map(|line| line.word));
    if options.show_progress {
        eprintln!("Pass 2: {} words encoded, {} free", image.used_words(), image.free_words());
    }

    Ok(Assembly { source_lines: source_text.lines().count(), labels, program, image })
}

/// Read a source file completely before any processing starts.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AssemblerError::io(&path.display().to_string(), &e))
}

/// Write a rendered image. Only called once the whole image exists.
pub fn write_image(path: &Path, image: &MemoryImage) -> Result<()> {
    fs::write(path, image.render())
        .map_err(|e| AssemblerError::io(&path.display().to_string(), &e))
}
