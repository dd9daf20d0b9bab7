//! Plain text renderings of documents and selections.

use anyhow::{Context, Result};
use linegrid_engine::{
    BlockTextSelection, LineQueries, MultiTextSelection, Region, SharedDocument, TextContent,
    TextSelection, columns,
};
use std::fmt::Write;

/// One row per line: number, offset, length and escaped delimiter (`-` for none).
pub fn lines(shared: &SharedDocument) -> Result<String> {
    let doc = shared.read();
    let mut out = String::new();
    for line in 0..doc.number_of_lines() {
        let info = doc.line_information(line)?;
        let delimiter = match doc.line_delimiter(line)? {
            Some(d) => d.escape_default().to_string(),
            None => "-".to_string(),
        };
        writeln!(
            out,
            "{line:>4} {:>8} {:>6} {delimiter}",
            info.offset(),
            info.length()
        )?;
    }
    Ok(out)
}

pub fn locate(shared: &SharedDocument, offset: usize, tab_width: usize) -> Result<String> {
    let doc = shared.read();
    let line = doc.line_of_offset(offset)?;
    let info = doc.line_information(line)?;
    let column = offset - info.offset();
    let content: Vec<char> = doc.get(info.offset(), info.length())?.chars().collect();
    let visual = columns::visual_column(&content, column, tab_width);
    Ok(format!(
        "offset {offset}: line {line}, column {column}, visual column {visual}\n"
    ))
}

pub fn range(shared: &SharedDocument, offset: usize, length: usize) -> Result<String> {
    let selection = TextSelection::new(shared, offset, length);
    let text = selection
        .text()
        .with_context(|| format!("range {offset}:{length} is outside the document"))?;
    let (Some(start), Some(end)) = (selection.start_line(), selection.end_line()) else {
        anyhow::bail!("range {offset}:{length} is outside the document");
    };
    Ok(format!("lines {start}..={end}\n{}", framed(&text)))
}

pub fn block(
    shared: &SharedDocument,
    corners: (usize, usize, usize, usize),
    tab_width: usize,
) -> Result<String> {
    let (start_line, start_column, end_line, end_column) = corners;
    let selection = BlockTextSelection::new(
        shared,
        start_line,
        start_column,
        end_line,
        end_column,
        tab_width,
    )?;
    let regions = selection.regions().context("block selection has no range")?;
    let text = selection.text().context("block selection has no text")?;
    Ok(format!("{}{}", region_list(&regions), framed(&text)))
}

pub fn multi(shared: &SharedDocument, regions: &[Region]) -> Result<String> {
    let selection = MultiTextSelection::new(shared, regions.iter().copied());
    let text = selection
        .text()
        .context("selected ranges are outside the document")?;
    let span = selection.region().unwrap_or_default();
    Ok(format!(
        "{}span {}:{}\n{}",
        region_list(selection.regions()),
        span.offset(),
        span.length(),
        framed(&text)
    ))
}

fn region_list(regions: &[Region]) -> String {
    regions
        .iter()
        .map(|r| format!("{}:{}\n", r.offset(), r.length()))
        .collect()
}

/// Selected text between rulers so trailing spaces stay visible.
fn framed(text: &str) -> String {
    format!("---\n{text}\n---\n")
}
