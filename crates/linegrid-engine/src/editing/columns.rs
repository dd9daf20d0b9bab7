//! Tab expansion.
//!
//! A *character column* counts characters from the line start. A *visual
//! column* counts screen cells: a tab advances to the next multiple of the
//! tab width, every other character takes one cell. Columns past the end of a
//! line are virtual and count one cell each.

/// Cells taken by `c` when it starts at visual column `visual`.
pub fn visual_width(c: char, visual: usize, tab_width: usize) -> usize {
    if c != '\t' {
        1
    } else if tab_width == 0 {
        0
    } else {
        tab_width - visual % tab_width
    }
}

/// True if `c` takes more than one cell at `visual`.
pub fn is_wider(c: char, visual: usize, tab_width: usize) -> bool {
    visual_width(c, visual, tab_width) > 1
}

/// Visual column of character `column` in `line`.
pub fn visual_column(line: &[char], column: usize, tab_width: usize) -> usize {
    let mut visual = 0;
    for &c in &line[..column.min(line.len())] {
        visual += visual_width(c, visual, tab_width);
    }
    if column > line.len() {
        visual = visual.saturating_add(column - line.len());
    }
    visual
}

/// First character column of `line` whose visual start reaches `visual_column`.
///
/// Past the end of the line the virtual overhang is added to the line length.
pub fn character_column(line: &[char], visual_column: usize, tab_width: usize) -> usize {
    let mut visual = 0;
    for (offset, &c) in line.iter().enumerate() {
        if visual >= visual_column {
            return offset;
        }
        visual += visual_width(c, visual, tab_width);
    }
    line.len().saturating_add(visual_column.saturating_sub(visual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[rstest]
    #[case('a', 3, 4, 1)]
    #[case('\t', 0, 4, 4)]
    #[case('\t', 3, 4, 1)]
    #[case('\t', 5, 4, 3)]
    #[case('\t', 5, 0, 0)]
    fn test_tab_advances_to_next_stop(
        #[case] c: char,
        #[case] visual: usize,
        #[case] tab_width: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(visual_width(c, visual, tab_width), expected);
    }

    #[rstest]
    #[case("abc", 2, 2)]
    #[case("\tab", 1, 4)]
    #[case("a\tb", 2, 4)]
    #[case("a\tb", 3, 5)]
    #[case("ab", 5, 5)]
    #[case("\t", 3, 6)]
    #[case("\tab", usize::MAX, usize::MAX)]
    fn test_visual_columns(#[case] line: &str, #[case] column: usize, #[case] expected: usize) {
        assert_eq!(visual_column(&chars(line), column, 4), expected);
    }

    #[rstest]
    #[case("abc", 2, 2)]
    #[case("\tab", 4, 1)]
    #[case("\tab", 2, 1)]
    #[case("a\tb", 4, 2)]
    #[case("ab", 5, 5)]
    #[case("\t", 6, 3)]
    #[case("\tab", usize::MAX, usize::MAX - 3)]
    fn test_character_columns(#[case] line: &str, #[case] visual: usize, #[case] expected: usize) {
        assert_eq!(character_column(&chars(line), visual, 4), expected);
    }

    #[test]
    fn test_columns_round_trip_without_tabs() {
        let line = chars("hello");
        for column in 0..8 {
            assert_eq!(character_column(&line, visual_column(&line, column, 4), 4), column);
        }
    }
}
