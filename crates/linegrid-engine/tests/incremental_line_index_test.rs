//! The incrementally maintained line index must always equal a fresh rescan.
//!
//! Edit scripts split and join lines, mix delimiter kinds and break `\r\n`
//! pairs apart; the index is checked after every step.

use linegrid_engine::{Document, LineIndex, LineQueries, TextContent};
use proptest::prelude::*;

fn assert_index_matches_rescan(doc: &Document, step: usize) {
    if let Err(problem) = doc.line_index().check() {
        panic!("line index inconsistent after step {step}: {problem}");
    }
    let rescanned = LineIndex::new(doc.line_index().matcher().clone(), &doc.text());
    assert_eq!(
        doc.line_index().lines(),
        rescanned.lines(),
        "line table differs from a rescan after step {step}"
    );
}

/// Lines and their delimiters, glued back together.
fn reassemble(doc: &Document) -> String {
    let mut text = String::new();
    for line in 0..doc.number_of_lines() {
        let info = doc.line_information(line).unwrap();
        assert_eq!(info.offset(), text.chars().count(), "gap before line {line}");
        text.push_str(&doc.get(info.offset(), info.length()).unwrap());
        if let Some(delimiter) = doc.line_delimiter(line).unwrap() {
            text.push_str(delimiter);
        }
    }
    text
}

// Pieces chosen to create, merge and split delimiters
fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "", "a", "\n", "\r", "\r\n", "xy\rz", "é\n", "\n\n", "tab\there",
    ])
}

fn text_with_delimiters() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..12).prop_map(|pieces| pieces.concat())
}

// Offsets and lengths are clamped to the document when applied
#[derive(Debug, Clone)]
struct Edit {
    offset: usize,
    length: usize,
    text: &'static str,
}

impl Edit {
    fn apply(&self, doc: &mut Document) {
        let offset = self.offset.min(doc.length());
        let length = self.length.min(doc.length() - offset);
        doc.replace(offset, length, self.text).unwrap();
    }
}

fn edit_script() -> impl Strategy<Value = Vec<Edit>> {
    prop::collection::vec(
        (0usize..64, 0usize..5, fragment())
            .prop_map(|(offset, length, text)| Edit { offset, length, text }),
        0..40,
    )
}

proptest! {
    #[test]
    fn test_edit_scripts_keep_index_consistent(
        initial in text_with_delimiters(),
        script in edit_script()
    ) {
        let mut doc = Document::new(&initial);
        for (step, edit) in script.iter().enumerate() {
            edit.apply(&mut doc);
            assert_index_matches_rescan(&doc, step);
        }
    }

    #[test]
    fn test_lines_partition_the_text(
        initial in text_with_delimiters(),
        script in edit_script()
    ) {
        let mut doc = Document::new(&initial);
        prop_assert_eq!(reassemble(&doc), doc.text());
        for edit in &script {
            edit.apply(&mut doc);
            prop_assert_eq!(reassemble(&doc), doc.text());
        }
    }

    #[test]
    fn test_replacing_a_range_with_itself_changes_nothing(
        initial in text_with_delimiters(),
        offset in 0usize..64,
        length in 0usize..64
    ) {
        let mut doc = Document::new(&initial);
        let offset = offset.min(doc.length());
        let length = length.min(doc.length() - offset);
        let lines_before = doc.line_index().lines().to_vec();

        let same = doc.get(offset, length).unwrap();
        doc.replace(offset, length, &same).unwrap();

        prop_assert_eq!(doc.text(), initial);
        prop_assert_eq!(doc.line_index().lines(), lines_before.as_slice());
    }

    #[test]
    fn test_resolved_offsets_stay_in_the_document(
        initial in text_with_delimiters(),
        line in -4isize..16,
        column in prop_oneof![0usize..16, Just(usize::MAX)]
    ) {
        let doc = Document::new(&initial);
        let offset = doc.resolve_offset(line, column);
        prop_assert!(offset <= doc.length());
        if line < 0 {
            prop_assert_eq!(offset, 0);
        }
    }
}

#[test]
fn test_splitting_a_crlf_pair() {
    let mut doc = Document::new("a\r\nb");
    assert_eq!(doc.number_of_lines(), 2);

    doc.replace(2, 0, "x").unwrap();
    assert_eq!(doc.text(), "a\rx\nb");
    assert_eq!(doc.number_of_lines(), 3);
    assert_index_matches_rescan(&doc, 0);

    doc.replace(2, 1, "").unwrap();
    assert_eq!(doc.number_of_lines(), 2);
    assert_eq!(doc.line_delimiter(0).unwrap(), Some("\r\n"));
    assert_index_matches_rescan(&doc, 1);
}

#[test]
fn test_replacing_half_a_crlf_pair_with_itself() {
    let mut doc = Document::new("a\r\nb\rc\nd");
    let lines_before = doc.line_index().lines().to_vec();
    for (offset, length) in [(1, 1), (2, 1), (2, 2), (0, 2), (1, 2)] {
        let same = doc.get(offset, length).unwrap();
        doc.replace(offset, length, &same).unwrap();
        assert_eq!(doc.text(), "a\r\nb\rc\nd");
        assert_eq!(doc.line_index().lines(), lines_before.as_slice());
    }
}

#[test]
fn test_offsets_count_characters_not_bytes() {
    let mut doc = Document::new("héllo\nwörld");
    assert_eq!(doc.length(), 11);
    assert_eq!(doc.line_of_offset(6).unwrap(), 1);

    doc.replace(1, 1, "e").unwrap();
    assert_eq!(doc.get(0, 5).unwrap(), "hello");
    assert_index_matches_rescan(&doc, 0);
}
