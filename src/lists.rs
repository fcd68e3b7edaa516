//! Line-oriented list segmenters.
//!
//! Each segmenter walks the input line by line, turns marker lines into list
//! items with the marker stripped, keeps other non-blank lines as paragraphs
//! and drops blank lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::Block;

pub(crate) const DEFINITION_MARKER: &str = "- **";
const DEFINITION_SEPARATOR: &str = "**:";

/// Ordinal prefix at the start of a line, e.g. `12. `.
static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\.\s").expect("numbered line pattern is valid"));

/// Ordinal prefix anywhere in the text.
pub(crate) static NUMBERED_ANYWHERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.\s").expect("numbered pattern is valid"));

/// Lines prefixed with `• ` become bullet items.
pub fn bullets(text: &str) -> Vec<Block> {
    segment_lines(text, |line| line.strip_prefix("• ").map(Block::bullet))
}

/// Lines prefixed with `- ` or `* ` become bullet items.
pub fn dash_bullets(text: &str) -> Vec<Block> {
    segment_lines(text, |line| {
        line.strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))
            .map(Block::bullet)
    })
}

/// Lines prefixed with `<digits>. ` become numbered items.
pub fn numbered(text: &str) -> Vec<Block> {
    segment_lines(text, |line| {
        NUMBERED_LINE.captures(line).map(|caps| {
            let prefix = caps.get(0).map_or(0, |m| m.end());
            Block::NumberedItem {
                index: caps[1].to_string(),
                text: line[prefix..].to_string(),
            }
        })
    })
}

/// Split on `- **` into `term**: body` items, with an optional leading paragraph.
pub fn definitions(text: &str) -> Vec<Block> {
    let mut fragments = text.split(DEFINITION_MARKER);
    let mut blocks = Vec::new();

    let intro = fragments.next().unwrap_or_default();
    if !intro.trim().is_empty() {
        blocks.push(Block::paragraph(intro));
    }

    blocks.extend(fragments.map(|fragment| {
        let (term, body) = fragment
            .split_once(DEFINITION_SEPARATOR)
            .unwrap_or((fragment, ""));
        Block::DefinitionBulletItem {
            term: term.trim().to_string(),
            body: body.trim().to_string(),
        }
    }));
    blocks
}

/// Map each line through `item`, falling back to a paragraph for non-blank lines.
pub(crate) fn segment_lines(text: &str, item: impl Fn(&str) -> Option<Block>) -> Vec<Block> {
    text.split('\n')
        .filter_map(|line| {
            item(line).or_else(|| (!line.trim().is_empty()).then(|| Block::paragraph(line)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered_item(index: &str, text: &str) -> Block {
        Block::NumberedItem {
            index: index.to_string(),
            text: text.to_string(),
        }
    }

    fn definition(term: &str, body: &str) -> Block {
        Block::DefinitionBulletItem {
            term: term.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn bullet_lines_and_paragraphs() {
        assert_eq!(
            bullets("Summary\n\n• a\n• b\n"),
            vec![
                Block::paragraph("Summary"),
                Block::bullet("a"),
                Block::bullet("b"),
            ]
        );
    }

    #[test]
    fn dash_and_star_bullets() {
        assert_eq!(
            dash_bullets("intro\n- one\n* two\n-three"),
            vec![
                Block::paragraph("intro"),
                Block::bullet("one"),
                Block::bullet("two"),
                Block::paragraph("-three"),
            ]
        );
    }

    #[test]
    fn numbered_keeps_digits_as_written() {
        assert_eq!(
            numbered("Steps:\n1. open\n02. close\n3.no space"),
            vec![
                Block::paragraph("Steps:"),
                numbered_item("1", "open"),
                numbered_item("02", "close"),
                Block::paragraph("3.no space"),
            ]
        );
    }

    #[test]
    fn definitions_with_intro() {
        assert_eq!(
            definitions("Key points:\n- **Speed**: fast\n- **Cost**: low"),
            vec![
                Block::paragraph("Key points:\n"),
                definition("Speed", "fast"),
                definition("Cost", "low"),
            ]
        );
    }

    #[test]
    fn blank_intro_is_dropped() {
        assert_eq!(definitions("  \n- **A**: b"), vec![definition("A", "b")]);
    }

    #[test]
    fn definition_without_separator_has_empty_body() {
        assert_eq!(definitions("- **Lonely"), vec![definition("Lonely", "")]);
    }

    #[test]
    fn definition_body_keeps_later_separators() {
        assert_eq!(
            definitions("- **A**: x **B**: y"),
            vec![definition("A", "x **B**: y")]
        );
    }

    #[test]
    fn segment_lines_drops_whitespace_only_lines() {
        assert_eq!(
            segment_lines("a\n   \n\tb", |_| None),
            vec![Block::paragraph("a"), Block::paragraph("\tb")]
        );
    }
}
