// config.rs
//
// Configuration and CLI argument parsing for the assembler

use crate::assembler::Options;
use crate::error::{AssemblerError, ErrorKind};
use crate::symbols::LabelPolicy;
use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use std::ffi::OsString;
use std::path::PathBuf;

/// Name of the image written when no `-o` is given.
pub const DEFAULT_OUTPUT: &str = "assemble.mif";

/// Complete configuration for the assembler
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "mifasm",
    version,
    about = "Two-pass assembler producing a 256 x 16-bit memory initialization file",
    after_help = "By default, successful assembly produces no output.\n\
                  When any --dump-* option is used, no output file is generated."
)]
pub struct Config {
    /// Assembly source file
    pub input: PathBuf,

    /// Write the memory image to <FILE>
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Show input statistics and per-pass progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Treat a label defined more than once as an error
    #[arg(long)]
    pub strict_labels: bool,

    /// Print the label table
    #[arg(long)]
    pub dump_symbols: bool,

    /// Print the encoded program listing
    #[arg(long)]
    pub dump_code: bool,
}

impl Config {
    /// Parse an explicit argument list (including the program name).
    ///
    /// Help and version requests are returned as errors too; the caller can
    /// tell them apart with `is_informational`.
    pub fn try_from_args<I, T>(args: I) -> std::result::Result<Config, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Config::try_parse_from(args)
    }

    pub fn has_dumps(&self) -> bool {
        self.dump_symbols || self.dump_code
    }

    pub fn options(&self) -> Options {
        Options {
            label_policy: if self.strict_labels {
                LabelPolicy::Reject
            } else {
                LabelPolicy::LastWins
            },
            show_progress: self.verbose,
        }
    }
}

/// True when clap stopped to show help or version text rather than because
/// the arguments were wrong.
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion)
}

pub fn usage_error(err: &clap::Error) -> AssemblerError {
    AssemblerError::no_context(ErrorKind::Usage(err.to_string().trim_end().to_string()))
}
