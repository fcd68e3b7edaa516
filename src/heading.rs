use crate::block::Block;
use crate::lists::segment_lines;

/// `# ` lines become level-2 headings, `## ` lines level-3 headings.
///
/// Bare `- ` lines in the same pass become bullet items.
pub fn headings(text: &str) -> Vec<Block> {
    segment_lines(text, |line| {
        if let Some(text) = line.strip_prefix("# ") {
            Some(Block::Heading2 {
                text: text.to_string(),
            })
        } else if let Some(text) = line.strip_prefix("## ") {
            Some(Block::Heading3 {
                text: text.to_string(),
            })
        } else {
            line.strip_prefix("- ").map(Block::bullet)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_levels_and_bullets() {
        assert_eq!(
            headings("# Overview\nSome text\n\n## Details\n- point\n### deeper"),
            vec![
                Block::Heading2 {
                    text: "Overview".into()
                },
                Block::paragraph("Some text"),
                Block::Heading3 {
                    text: "Details".into()
                },
                Block::bullet("point"),
                Block::paragraph("### deeper"),
            ]
        );
    }

    #[test]
    fn hash_without_space_is_paragraph() {
        assert_eq!(headings("#tag"), vec![Block::paragraph("#tag")]);
    }
}
