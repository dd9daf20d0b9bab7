use insta::assert_debug_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::SelectionProcessor;
use crate::document::{Document, PLATFORM_LINE_SEPARATOR, SharedDocument, TextContent};
use crate::editing::edit::TextEdit;
use crate::error::TextError;
use crate::selection::{
    BlockTextSelection, EditorSelection, MultiTextSelection, Region, TextSelection,
};

fn processor() -> SelectionProcessor {
    SelectionProcessor::new(4)
}

fn text(offset: usize, length: usize) -> EditorSelection {
    TextSelection::detached(offset, length).into()
}

fn multi(regions: &[(usize, usize)]) -> EditorSelection {
    MultiTextSelection::with_handle(None, regions.iter().map(|&(o, l)| Region::new(o, l))).into()
}

fn block(
    doc: &Document,
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
) -> EditorSelection {
    BlockTextSelection::from_document(doc, None, start_line, start_column, end_line, end_column, 4)
        .unwrap()
        .into()
}

fn corners(selection: &EditorSelection) -> (usize, usize, usize, usize) {
    match selection {
        EditorSelection::Block(b) => (b.start_line(), b.start_column(), b.end_line(), b.end_column()),
        other => panic!("expected a block selection, got {other:?}"),
    }
}

fn carets(selection: &EditorSelection) -> Vec<usize> {
    match selection {
        EditorSelection::Multi(m) => m.regions().iter().map(|r| r.offset()).collect(),
        other => panic!("expected a multi selection, got {other:?}"),
    }
}

// Range behaviour

#[test]
fn test_range_replace_moves_caret_after_insertion() {
    let mut doc = Document::new("hello world");
    let selection = text(6, 5);
    assert_eq!(
        processor().replace(&doc, &selection, "there").unwrap(),
        TextEdit::replace(6, 5, "there")
    );
    let after = processor().do_replace(&mut doc, &selection, "there").unwrap();
    assert_eq!(doc.text(), "hello there");
    assert_eq!(after.region(), Some(Region::new(11, 0)));
}

#[rstest]
#[case::caret_deletes_next(text(1, 0), TextEdit::delete(1, 1), "ac", 1)]
#[case::range_deletes_itself(text(0, 2), TextEdit::delete(0, 2), "c", 0)]
fn test_range_delete(
    #[case] selection: EditorSelection,
    #[case] expected_edit: TextEdit,
    #[case] expected_text: &str,
    #[case] caret: usize,
) {
    let mut doc = Document::new("abc");
    assert_eq!(processor().delete(&doc, &selection).unwrap(), expected_edit);
    let after = processor().do_delete(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), expected_text);
    assert_eq!(after.region(), Some(Region::new(caret, 0)));
}

#[test]
fn test_range_backspace_removes_previous_character() {
    let mut doc = Document::new("abc");
    let after = processor().do_backspace(&mut doc, &text(1, 0)).unwrap();
    assert_eq!(doc.text(), "bc");
    assert_eq!(after.region(), Some(Region::new(0, 0)));
}

#[test]
fn test_range_backspace_at_document_start_does_nothing() {
    let mut doc = Document::new("abc");
    let edit = processor().backspace(&doc, &text(0, 0)).unwrap();
    assert!(!edit.has_children());
    let after = processor().do_backspace(&mut doc, &text(0, 0)).unwrap();
    assert_eq!(doc.text(), "abc");
    assert_eq!(after.region(), Some(Region::new(0, 0)));
}

#[rstest]
#[case::single_line(0, 2, false, 1)]
#[case::spans_delimiter(1, 3, true, 2)]
#[case::ends_after_delimiter(0, 3, true, 1)]
fn test_range_line_queries(
    #[case] offset: usize,
    #[case] length: usize,
    #[case] multiline: bool,
    #[case] covered: usize,
) {
    let doc = Document::new("ab\ncd");
    let selection = text(offset, length);
    assert_eq!(processor().is_multiline(&doc, &selection).unwrap(), multiline);
    assert_eq!(processor().covered_lines(&doc, &selection).unwrap(), covered);
}

#[test]
fn test_range_make_empty_collapses_to_either_end() {
    let doc = Document::new("abcdef");
    let selection = text(1, 3);
    let start = processor().make_empty(&doc, &selection, true).unwrap();
    let end = processor().make_empty(&doc, &selection, false).unwrap();
    assert_eq!(start.region(), Some(Region::new(1, 0)));
    assert_eq!(end.region(), Some(Region::new(4, 0)));
    assert!(processor().is_empty(&doc, &start).unwrap());
    assert!(!processor().is_empty(&doc, &selection).unwrap());
}

#[test]
fn test_follow_up_selection_keeps_the_document_handle() {
    let shared = SharedDocument::new(Document::new("abc"));
    let selection: EditorSelection = TextSelection::new(&shared, 0, 2).into();
    let after = {
        let mut doc = shared.write();
        processor().do_replace(&mut *doc, &selection, "xy").unwrap()
    };
    assert!(
        after
            .document()
            .is_some_and(|d| d.same_document(&shared.downgrade()))
    );
    assert_eq!(after.text().as_deref(), Some(""));
}

// Null behaviour

#[rstest]
#[case::invalid_text(TextSelection::invalid().into())]
#[case::no_regions(multi(&[]))]
fn test_selection_without_range_does_nothing(#[case] selection: EditorSelection) {
    let mut doc = Document::new("abc");
    let p = processor();
    assert!(!p.replace(&doc, &selection, "x").unwrap().has_children());
    assert!(!p.delete(&doc, &selection).unwrap().has_children());
    assert_eq!(p.text(&doc, &selection).unwrap(), "");
    assert!(p.is_empty(&doc, &selection).unwrap());
    assert!(!p.is_multiline(&doc, &selection).unwrap());
    assert_eq!(p.ranges(&doc, &selection).unwrap(), Vec::<Region>::new());
    assert_eq!(p.covered_lines(&doc, &selection).unwrap(), 0);
    assert_eq!(p.make_empty(&doc, &selection, true).unwrap(), selection);
    let after = p.do_backspace(&mut doc, &selection).unwrap();
    assert_eq!(after, selection);
    assert_eq!(doc.text(), "abc");
}

// Ranges behaviour

#[test]
fn test_multi_with_one_region_behaves_like_a_range() {
    let doc = Document::new("abcdef");
    let selection = multi(&[(1, 2)]);
    assert_eq!(
        processor().delete(&doc, &selection).unwrap(),
        TextEdit::delete(1, 2)
    );
    let collapsed = processor().make_empty(&doc, &selection, true).unwrap();
    assert!(matches!(collapsed, EditorSelection::Text(_)));
}

#[test]
fn test_typing_at_several_carets() {
    let mut doc = Document::new("one\ntwo\nthree");
    let selection = multi(&[(0, 0), (4, 0), (8, 0)]);
    let after = processor().do_replace(&mut doc, &selection, "- ").unwrap();
    assert_eq!(doc.text(), "- one\n- two\n- three");
    assert_eq!(carets(&after), vec![2, 8, 14]);
}

#[test]
fn test_pasting_lines_spreads_them_over_the_carets() {
    let mut doc = Document::new("one\ntwo");
    let selection = multi(&[(0, 0), (4, 0)]);
    let paste = format!("A{PLATFORM_LINE_SEPARATOR}B");
    let after = processor().do_replace(&mut doc, &selection, &paste).unwrap();
    assert_eq!(doc.text(), "Aone\nBtwo");
    assert_eq!(carets(&after), vec![1, 6]);
}

#[test]
fn test_multi_delete_of_ranges() {
    let mut doc = Document::new("abcdef");
    let selection = multi(&[(0, 1), (2, 2)]);
    let after = processor().do_delete(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "bef");
    assert_eq!(carets(&after), vec![0, 1]);
}

#[test]
fn test_multi_delete_at_carets() {
    let mut doc = Document::new("abcdef");
    let selection = multi(&[(1, 0), (3, 0)]);
    let after = processor().do_delete(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "acef");
    assert_eq!(carets(&after), vec![1, 2]);
}

#[test]
fn test_multi_backspace_skips_caret_at_document_start() {
    let mut doc = Document::new("abcdef");
    let selection = multi(&[(0, 0), (3, 0)]);
    assert_debug_snapshot!(processor().backspace(&doc, &selection).unwrap(), @r"
    Multi(
        MultiTextEdit {
            children: [
                Delete {
                    offset: 2,
                    length: 1,
                },
            ],
        },
    )
    ");
    let after = processor().do_backspace(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "abdef");
    assert_eq!(carets(&after), vec![0, 2]);
}

#[test]
fn test_multi_backspace_mixing_ranges_and_carets() {
    let mut doc = Document::new("abcdefg");
    let selection = multi(&[(1, 2), (5, 0)]);
    let after = processor().do_backspace(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "adfg");
    assert_eq!(carets(&after), vec![1, 2]);
}

#[test]
fn test_multi_make_empty_shifts_by_removed_text() {
    let doc = Document::new("0123456789");
    let selection = multi(&[(5, 3), (0, 2)]);
    let start = processor().make_empty(&doc, &selection, true).unwrap();
    let end = processor().make_empty(&doc, &selection, false).unwrap();
    assert_eq!(carets(&start), vec![0, 3]);
    assert_eq!(carets(&end), vec![2, 6]);
}

#[rstest]
#[case::same_line(&[(0, 1), (1, 1)], false, 1)]
#[case::two_lines(&[(0, 1), (4, 4)], true, 3)]
#[case::separate_lines(&[(0, 1), (6, 1)], true, 2)]
fn test_multi_line_queries(
    #[case] regions: &[(usize, usize)],
    #[case] multiline: bool,
    #[case] covered: usize,
) {
    let doc = Document::new("ab\ncd\nef");
    let selection = multi(regions);
    assert_eq!(processor().is_multiline(&doc, &selection).unwrap(), multiline);
    assert_eq!(processor().covered_lines(&doc, &selection).unwrap(), covered);
}

#[test]
fn test_multi_text_and_ranges() {
    let doc = Document::new("0123456789");
    let selection = multi(&[(5, 3), (0, 2)]);
    assert_eq!(processor().text(&doc, &selection).unwrap(), "01567");
    assert_eq!(
        processor().ranges(&doc, &selection).unwrap(),
        vec![Region::new(0, 2), Region::new(5, 3)]
    );
}

// Column behaviour

#[test]
fn test_block_text_pads_short_lines() {
    let doc = Document::new("abcdef\nab\nabcdef");
    let selection = block(&doc, 0, 1, 2, 4);
    let p = processor();
    assert_eq!(p.text(&doc, &selection).unwrap(), "bcd\nb  \nbcd");
    assert_eq!(
        p.ranges(&doc, &selection).unwrap(),
        vec![Region::new(1, 3), Region::new(8, 1), Region::new(11, 3)]
    );
    assert_eq!(p.covered_lines(&doc, &selection).unwrap(), 3);
    assert!(p.is_multiline(&doc, &selection).unwrap());
    assert!(!p.is_empty(&doc, &selection).unwrap());
}

#[test]
fn test_block_columns_follow_tab_stops() {
    let doc = Document::new("\tx\n    y");
    let selection = block(&doc, 0, 1, 1, 5);
    assert_eq!(processor().text(&doc, &selection).unwrap(), "x\ny");
    assert_eq!(
        processor().ranges(&doc, &selection).unwrap(),
        vec![Region::new(1, 1), Region::new(7, 1)]
    );
}

#[test]
fn test_block_text_entirely_in_virtual_space() {
    let doc = Document::new("ab");
    let selection = block(&doc, 0, 3, 0, 5);
    assert_eq!(selection.region(), Some(Region::new(2, 0)));
    assert_eq!(processor().text(&doc, &selection).unwrap(), "  ");
    assert_eq!(
        processor().ranges(&doc, &selection).unwrap(),
        vec![Region::new(2, 0)]
    );
}

#[test]
fn test_block_delete_removes_the_rectangle() {
    let mut doc = Document::new("abcd\nabcd");
    let selection = block(&doc, 0, 1, 1, 3);
    assert_debug_snapshot!(processor().delete(&doc, &selection).unwrap(), @r"
    Multi(
        MultiTextEdit {
            children: [
                Delete {
                    offset: 1,
                    length: 2,
                },
                Delete {
                    offset: 6,
                    length: 2,
                },
            ],
        },
    )
    ");
    let after = processor().do_delete(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "ad\nad");
    assert_eq!(corners(&after), (0, 1, 1, 1));
}

#[test]
fn test_block_paste_continues_past_the_document_end() {
    let mut doc = Document::new("ab\ncd");
    let selection = block(&doc, 1, 1, 1, 1);
    let after = processor()
        .do_replace(&mut doc, &selection, "X\nY\nZ")
        .unwrap();
    assert_eq!(doc.text(), "ab\ncXd\n Y\n Z");
    assert_eq!(corners(&after), (1, 2, 1, 2));
}

#[test]
fn test_block_paste_materialises_virtual_space() {
    let mut doc = Document::new("ab\nabcdef");
    let selection = block(&doc, 0, 4, 1, 5);
    processor().do_replace(&mut doc, &selection, "X\nY").unwrap();
    assert_eq!(doc.text(), "ab  X\nabcdYf");
}

#[test]
fn test_block_delete_removes_straddling_tab() {
    let mut doc = Document::new("abcdef\n\tx");
    let selection = block(&doc, 0, 2, 1, 2);
    processor().do_delete(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "abf\n");
}

#[test]
fn test_empty_block_backspace_removes_column_to_the_left() {
    let mut doc = Document::new("abcd\nabcd");
    let selection = block(&doc, 0, 2, 1, 2);
    assert!(processor().is_empty(&doc, &selection).unwrap());
    let after = processor().do_backspace(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "acd\nacd");
    assert_eq!(corners(&after), (0, 1, 1, 1));
}

#[test]
fn test_empty_block_delete_removes_column_to_the_right() {
    let mut doc = Document::new("abcd\nabcd");
    let selection = block(&doc, 0, 2, 1, 2);
    let after = processor().do_delete(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "abd\nabd");
    assert_eq!(corners(&after), (0, 2, 1, 2));
}

#[test]
fn test_block_make_empty_moves_the_other_edge() {
    let doc = Document::new("abcd\nabcd");
    let selection = block(&doc, 0, 1, 1, 3);
    let start = processor().make_empty(&doc, &selection, true).unwrap();
    let end = processor().make_empty(&doc, &selection, false).unwrap();
    assert_eq!(corners(&start), (0, 1, 1, 1));
    assert_eq!(corners(&end), (0, 3, 1, 3));
}

#[test]
fn test_block_on_missing_lines_is_an_error() {
    let doc = Document::new("a\nb\nc");
    let selection = block(&doc, 0, 0, 2, 1);
    let shorter = Document::new("abc");
    let err = processor().ranges(&shorter, &selection).unwrap_err();
    assert!(err.is_bad_location());
}

// Offsets and columns near usize::MAX

#[test]
fn test_caret_past_usize_max_is_a_bad_range() {
    let mut doc = Document::new("abc");
    let err = processor().do_delete(&mut doc, &text(usize::MAX, 0)).unwrap_err();
    assert!(err.is_bad_location());
    let err = processor()
        .do_delete(&mut doc, &multi(&[(0, 0), (usize::MAX, 1)]))
        .unwrap_err();
    assert!(err.is_bad_location());
    assert_eq!(doc.text(), "abc");
    assert_eq!(doc.modification_stamp(), 0);
}

#[test]
fn test_block_reaching_usize_max_column_deletes_to_line_end() {
    let mut doc = Document::new("abc\ndef");
    let selection = block(&doc, 0, 1, 1, usize::MAX);
    processor().do_delete(&mut doc, &selection).unwrap();
    assert_eq!(doc.text(), "a\nd");
}

#[test]
fn test_block_text_with_unallocatable_padding_is_an_error() {
    let doc = Document::new("ab");
    let selection = block(&doc, 0, 0, 0, usize::MAX);
    let err = processor().text(&doc, &selection).unwrap_err();
    assert!(matches!(err, TextError::IllegalArgument(_)));
}
