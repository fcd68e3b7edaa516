use crate::block::Block;

/// Lines that take part in a table.
pub(crate) fn pipe_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').filter(|line| line.contains('|'))
}

/// Decompose pipe-delimited lines into an optional header row and body rows.
///
/// The second pipe line is a separator when it is made only of `|` and `-`;
/// the first line then becomes the header. Rows keep whatever cell count they
/// have.
pub fn decompose(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = pipe_lines(text).collect();
    let has_header = lines.get(1).is_some_and(|line| is_separator(line));

    let mut blocks = Vec::with_capacity(lines.len());
    if has_header {
        blocks.push(Block::TableHeaderRow {
            cells: cells(lines[0]),
        });
    }
    let body_start = if has_header { 2 } else { 0 };
    blocks.extend(lines.iter().skip(body_start).map(|line| Block::TableRow {
        cells: cells(line),
    }));
    blocks
}

fn is_separator(line: &str) -> bool {
    line.chars().all(|ch| ch == '|' || ch == '-')
}

fn cells(line: &str) -> Vec<String> {
    line.split('|')
        .filter(|fragment| !fragment.is_empty())
        .map(|cell| cell.trim().to_string())
        .collect()
}
