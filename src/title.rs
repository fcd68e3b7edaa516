use log::debug;

use crate::block::{Block, Document};
use crate::classify::classify;

/// Matched ASCII-case-insensitively at the start of a line.
const TITLE_MARKER: &str = "**title:";

pub(crate) fn is_title_line(line: &str) -> bool {
    line.as_bytes()
        .get(..TITLE_MARKER.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TITLE_MARKER.as_bytes()))
}

/// True when the text starts with a title marker or has one right after a newline.
pub(crate) fn has_title(text: &str) -> bool {
    text.split('\n').any(is_title_line)
}

/// Peel the title lines off and classify the remaining lines as the body of
/// the innermost title.
///
/// Each title line nests one level deeper than the one before it, so a text
/// with N title lines yields an N-deep title chain. The remainder is classified
/// once. Returns `None` when no line carries the marker.
pub fn extract_title(text: &str) -> Option<Block> {
    let (titles, rest): (Vec<&str>, Vec<&str>) =
        text.split('\n').partition(|line| is_title_line(line));
    let (outermost, inner) = titles.split_first()?;

    debug!(
        "extracted {} title lines, classifying {} remaining lines",
        titles.len(),
        rest.len()
    );
    let mut body = classify(&rest.join("\n"));
    for line in inner.iter().rev() {
        body = Document::new(vec![Block::Title {
            text: title_text(line),
            body,
        }]);
    }
    Some(Block::Title {
        text: title_text(outermost),
        body,
    })
}

/// Strip the leading marker, any later markers on the line and a closing `**`.
fn title_text(line: &str) -> String {
    let mut rest = &line[TITLE_MARKER.len()..];
    let mut text = String::with_capacity(rest.len());
    while let Some(position) = find_marker(rest) {
        text.push_str(&rest[..position]);
        rest = &rest[position + TITLE_MARKER.len()..];
    }
    text.push_str(rest);

    let text = text.trim();
    text.strip_suffix("**").unwrap_or(text).trim().to_string()
}

fn find_marker(text: &str) -> Option<usize> {
    text.as_bytes()
        .windows(TITLE_MARKER.len())
        .position(|window| window.eq_ignore_ascii_case(TITLE_MARKER.as_bytes()))
}
