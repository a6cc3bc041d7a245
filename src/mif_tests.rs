use crate::encoder::EncodedWord;
use crate::mif::*;

fn halts(n: usize) -> Vec<EncodedWord> {
    vec![EncodedWord(0b0011_1100_0000_0000); n]
}

#[test]
fn test_header_and_terminator() {
    let text = MemoryImage::from_words(halts(1)).render();
    assert!(text.starts_with(
        "DEPTH=256;\nWIDTH=16;\nADDRESS_RADIX=HEX;\nDATA_RADIX=BIN;\nCONTENT\nBEGIN\n"
    ));
    assert!(text.ends_with("\nEND;\n"));
}

#[test]
fn test_two_instruction_program() {
    let words = vec![EncodedWord(0b1111_1000_0010_1000), EncodedWord(0b0011_1100_0000_0000)];
    let text = MemoryImage::from_words(words).render();
    let body: Vec<&str> = text.lines().skip(6).collect();
    assert_eq!(
        body,
        vec![
            "00:1111100000101000;",
            "01:0011110000000000;",
            "[02..FF] : 1111111111111111;",
            "END;",
        ]
    );
}

#[test]
fn test_records_are_dense_and_ordered() {
    for n in [0usize, 1, 17, 200, 255] {
        let image = MemoryImage::from_words(halts(n));
        let records = image.records();
        assert_eq!(records.len(), n + 1);
        for (i, record) in records[..n].iter().enumerate() {
            assert!(matches!(record, Record::Word { address, .. } if *address == i));
        }
        assert_eq!(records[n], Record::Fill { start: n, end: 255, word: FILL_WORD });
        assert_eq!(image.used_words(), n);
        assert_eq!(image.free_words(), DEPTH - n);
    }
}

#[test]
fn test_empty_program_is_all_fill() {
    let text = MemoryImage::from_words(Vec::new()).render();
    assert!(text.contains("BEGIN\n[00..FF] : 1111111111111111;\nEND;\n"));
}

#[test]
fn test_last_free_word_gets_single_address_fill() {
    let text = MemoryImage::from_words(halts(255)).render();
    assert!(text.contains("FE:0011110000000000;\n[FF..FF] : 1111111111111111;\nEND;"));
}

#[test]
fn test_full_memory_has_no_fill_but_still_terminates() {
    let image = MemoryImage::from_words(halts(DEPTH));
    assert!(image.records().iter().all(|r| matches!(r, Record::Word { .. })));
    let text = image.render();
    assert!(text.contains("FF:0011110000000000;\nEND;\n"));
    assert!(!text.contains('['));
}

#[test]
fn test_record_display() {
    let record = Record::Word { address: 0x0A, word: EncodedWord(1) };
    assert_eq!(record.to_string(), "0A:0000000000000001;");
    let fill = Record::Fill { start: 0x10, end: 0xFF, word: FILL_WORD };
    assert_eq!(fill.to_string(), "[10..FF] : 1111111111111111;");
}
