use crate::error::ErrorKind;
use crate::symbols::*;
use crate::tokenizer::tokenize;

fn resolve(source: &str) -> (Vec<crate::ast::InstructionLine>, LabelTable) {
    resolve_labels(tokenize(source, "test.s"), LabelPolicy::LastWins).unwrap()
}

#[test]
fn test_no_labels() {
    let (instructions, labels) = resolve("movei 1 ra\nadd ra ra rb\nhalt\n");
    assert!(labels.is_empty());
    let addresses: Vec<usize> = instructions.iter().map(|i| i.address).collect();
    assert_eq!(addresses, vec![0, 1, 2]);
}

#[test]
fn test_label_at_start() {
    let (instructions, labels) = resolve("loop:\nmovei 0 ra\nbra loop\nhalt\n");
    assert_eq!(labels.get("loop"), Some(0));
    assert_eq!(instructions.len(), 3);
    assert_eq!(instructions[1].words, vec!["bra", "loop"]);
    assert_eq!(instructions[1].address, 1);
}

#[test]
fn test_label_consumes_no_address() {
    let source = "movei 1 ra\nfirst:\nsecond:\npush ra\nthird:\nhalt\n";
    let (instructions, labels) = resolve(source);
    assert_eq!(labels.get("first"), Some(1));
    assert_eq!(labels.get("second"), Some(1));
    assert_eq!(labels.get("third"), Some(2));
    assert_eq!(instructions.len(), 3);
}

#[test]
fn test_label_at_end_points_past_last_instruction() {
    let (_, labels) = resolve("halt\nend:\n");
    assert_eq!(labels.get("end"), Some(1));
}

#[test]
fn test_forward_reference_is_resolved() {
    let (_, labels) = resolve("bra done\nmovei 1 ra\ndone:\nhalt\n");
    assert_eq!(labels.get("done"), Some(2));
}

#[test]
fn test_labels_are_case_folded() {
    let (_, labels) = resolve("Main:\nhalt\n");
    assert_eq!(labels.get("main"), Some(0));
    assert_eq!(labels.get("Main"), None);
}

#[test]
fn test_instruction_lines_keep_locations() {
    let (instructions, _) = resolve("# comment\nstart:\n\nhalt\n");
    assert_eq!(instructions[0].location.line, 4);
}

#[test]
fn test_duplicate_label_last_wins() {
    let (_, labels) = resolve("dup:\nhalt\ndup:\nreturn\n");
    assert_eq!(labels.get("dup"), Some(1));
    assert_eq!(labels.definition("dup").unwrap().location.line, 3);
}

#[test]
fn test_duplicate_label_rejected_when_strict() {
    let err = resolve_labels(tokenize("dup:\nhalt\ndup:\nreturn\n", "test.s"), LabelPolicy::Reject)
        .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::LabelConflict { label: "dup".to_string(), previous_line: 1 }
    );
    assert_eq!(err.location.unwrap().line, 3);
}

#[test]
fn test_label_with_trailing_words_is_rejected() {
    let err = resolve_labels(tokenize("loop: halt\n", "test.s"), LabelPolicy::LastWins)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedLabel(_)));
}

#[test]
fn test_empty_label_is_rejected() {
    let err = resolve_labels(tokenize(":\nhalt\n", "test.s"), LabelPolicy::LastWins).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedLabel(_)));
}

#[test]
fn test_sorted_orders_by_address() {
    let (_, labels) = resolve("b:\nhalt\na:\nhalt\nc:\nz:\n");
    let names: Vec<&str> = labels.sorted().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b", "a", "c", "z"]);
}
