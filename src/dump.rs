// dump.rs
//
// Debug dump functionality for the assembler.
// Provides visibility into the label table and the encoded program.

use crate::assembler::Assembly;
use crate::symbols::LabelTable;

pub fn format_symbols(labels: &LabelTable) -> String {
    let mut out = String::from("========== LABEL TABLE ==========\n\n");
    if labels.is_empty() {
        out.push_str("(no labels)\n");
        return out;
    }
    for (name, def) in labels.sorted() {
        out.push_str(&format!(
            "{:<20} {:02X}  [{}]\n",
            name, def.address, def.location
        ));
    }
    out
}

/// One line per instruction: address, word, and the instruction as parsed.
pub fn format_code(assembly: &Assembly) -> String {
    let mut out = String::from("========== CODE ==========\n\n");
    for encoded in &assembly.program {
        out.push_str(&format!(
            "{:02X}: {}  {:<24} [{}]\n",
            encoded.line.address,
            encoded.word,
            encoded.instruction.to_string(),
            encoded.line.location
        ));
    }
    out.push_str(&format!(
        "\n{} words used, {} free\n",
        assembly.image.used_words(),
        assembly.image.free_words()
    ));
    out
}

pub fn dump_symbols(labels: &LabelTable) {
    print!("{}", format_symbols(labels));
}

pub fn dump_code(assembly: &Assembly) {
    print!("{}", format_code(assembly));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::{Options, assemble};

    #[test]
    fn test_format_symbols() {
        let assembly =
            assemble("start:\nhalt\nend:\n", "prog.s", &Options::default()).unwrap();
        let text = format_symbols(&assembly.labels);
        assert!(text.contains("start                00  [prog.s:1]\n"));
        assert!(text.contains("end                  01  [prog.s:3]\n"));
        assert!(text.find("start").unwrap() < text.find("end  ").unwrap());
    }

    #[test]
    fn test_format_symbols_empty() {
        assert!(format_symbols(&LabelTable::new()).contains("(no labels)"));
    }

    #[test]
    fn test_format_code() {
        let assembly = assemble("movei 5 RA\nhalt\n", "prog.s", &Options::default()).unwrap();
        let text = format_code(&assembly);
        assert!(text.contains("00: 1111100000101000  movei 5 ra"));
        assert!(text.contains("01: 0011110000000000  halt"));
        assert!(text.contains("[prog.s:2]"));
        assert!(text.contains("2 words used, 254 free"));
    }
}
