use crate::block::Block;

pub(crate) const FENCE: &str = "```";

/// Split on code fences into alternating prose and code blocks.
///
/// Even segments are prose, odd segments are code. An unterminated fence still
/// yields its trailing code segment.
pub fn split_fences(text: &str) -> Vec<Block> {
    text.split(FENCE)
        .enumerate()
        .filter_map(|(index, segment)| {
            if index % 2 == 0 {
                let prose = segment.trim();
                (!prose.is_empty()).then(|| Block::paragraph(prose))
            } else {
                Some(code_block(segment))
            }
        })
        .collect()
}

fn code_block(segment: &str) -> Block {
    let (first_line, rest) = segment.split_once('\n').unwrap_or((segment, ""));
    let language = first_line.trim();
    Block::CodeBlock {
        language: (!language.is_empty()).then(|| language.to_string()),
        code: rest.trim_end_matches('\n').to_string(),
    }
}
