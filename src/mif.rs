// mif.rs
//
// Memory initialization file output.
//
// The image is built as an ordered list of records and rendered in one pass,
// so a failed assembly never leaves a partial image behind.

use crate::encoder::EncodedWord;
use std::fmt;

/// Number of words in the target memory.
pub const DEPTH: usize = 256;

/// Written to every address the program does not occupy.
pub const FILL_WORD: EncodedWord = EncodedWord(0xFFFF);

const HEADER: &str = "DEPTH=256;\nWIDTH=16;\nADDRESS_RADIX=HEX;\nDATA_RADIX=BIN;\nCONTENT\nBEGIN\n";
const TERMINATOR: &str = "END;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Word { address: usize, word: EncodedWord },
    /// Inclusive address range sharing one value.
    Fill { start: usize, end: usize, word: EncodedWord },
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Word { address, word } => write!(f, "{:02X}:{};", address, word),
            Record::Fill { start, end, word } => {
                write!(f, "[{:02X}..{:02X}] : {};", start, end, word)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    records: Vec<Record>,
    used: usize,
}

impl MemoryImage {
    /// Lay the words out from address 0 and cover the rest of memory with
    /// `FILL_WORD`. Callers reject programs longer than `DEPTH` beforehand.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator<Item = EncodedWord>,
    {
        let mut records: Vec<Record> = words
            .into_iter()
            .enumerate()
            .map(|(address, word)| Record::Word { address, word })
            .collect();
        let used = records.len();
        debug_assert!(used <= DEPTH, "{} words exceed memory depth", used);
        if used < DEPTH {
            records.push(Record::Fill { start: used, end: DEPTH - 1, word: FILL_WORD });
        }
        MemoryImage { records, used }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn used_words(&self) -> usize {
        self.used
    }

    pub fn free_words(&self) -> usize {
        DEPTH - self.used
    }

    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        for record in &self.records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out.push_str(TERMINATOR);
        out.push('\n');
        out
    }
}
