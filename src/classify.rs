//! Format detection and dispatch.
//!
//! The input is checked against an ordered list of pattern predicates and
//! handed to the segmenter of the first one that matches. The order is part of
//! the output contract: text that is structurally a table or a numbered list
//! but also contains `**` (and no fence) is classified as a bold paragraph.

use log::debug;
use serde::Serialize;

use crate::block::{Block, Document};
use crate::fence::{FENCE, split_fences};
use crate::heading::headings;
use crate::inline::{scan_bold, scan_inline_code};
use crate::lists::{
    DEFINITION_MARKER, NUMBERED_ANYWHERE, bullets, dash_bullets, definitions, numbered,
};
use crate::table::{decompose, pipe_lines};
use crate::title::{extract_title, has_title};

/// The single interpretation selected for one classification pass.
///
/// Variants are listed in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Title,
    Bullet,
    Heading,
    DefinitionBullet,
    Bold,
    DashBullet,
    Numbered,
    CodeFence,
    InlineCode,
    Table,
    BlankLineParagraphs,
    Paragraph,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Title => "title",
            Mode::Bullet => "bullet",
            Mode::Heading => "heading",
            Mode::DefinitionBullet => "definition_bullet",
            Mode::Bold => "bold",
            Mode::DashBullet => "dash_bullet",
            Mode::Numbered => "numbered",
            Mode::CodeFence => "code_fence",
            Mode::InlineCode => "inline_code",
            Mode::Table => "table",
            Mode::BlankLineParagraphs => "blank_line_paragraphs",
            Mode::Paragraph => "paragraph",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the first matching mode for `text`.
pub fn detect(text: &str) -> Mode {
    let has_fence = text.contains(FENCE);

    if has_title(text) {
        Mode::Title
    } else if text.starts_with("• ") || text.contains("\n• ") {
        Mode::Bullet
    } else if text.starts_with('#') || text.contains("\n#") {
        Mode::Heading
    } else if text.contains(DEFINITION_MARKER) {
        Mode::DefinitionBullet
    } else if text.contains("**") && !has_fence {
        Mode::Bold
    } else if text.contains("\n- ") || text.contains("\n* ") {
        Mode::DashBullet
    } else if NUMBERED_ANYWHERE.is_match(text) {
        Mode::Numbered
    } else if has_fence {
        Mode::CodeFence
    } else if text.contains('`') {
        Mode::InlineCode
    } else if is_table(text) {
        Mode::Table
    } else if text.contains("\n\n") {
        Mode::BlankLineParagraphs
    } else {
        Mode::Paragraph
    }
}

fn is_table(text: &str) -> bool {
    text.contains('|') && text.contains("\n|") && pipe_lines(text).nth(1).is_some()
}

/// Classify raw text into a document.
///
/// Never fails: every input, the empty string included, yields at least one
/// block.
pub fn classify(text: &str) -> Document {
    let mode = detect(text);
    debug!("classified {} bytes as {mode}", text.len());

    let blocks = match mode {
        Mode::Title => match extract_title(text) {
            Some(title) => vec![title],
            None => vec![Block::paragraph(text)],
        },
        Mode::Bullet => bullets(text),
        Mode::Heading => headings(text),
        Mode::DefinitionBullet => definitions(text),
        Mode::Bold => vec![Block::Paragraph {
            content: scan_bold(text),
        }],
        Mode::DashBullet => dash_bullets(text),
        Mode::Numbered => numbered(text),
        Mode::CodeFence => split_fences(text),
        Mode::InlineCode => vec![Block::Paragraph {
            content: scan_inline_code(text),
        }],
        Mode::Table => decompose(text),
        Mode::BlankLineParagraphs => blank_line_paragraphs(text),
        Mode::Paragraph => vec![Block::paragraph(text)],
    };
    Document::new(blocks)
}

fn blank_line_paragraphs(text: &str) -> Vec<Block> {
    text.split("\n\n")
        .filter(|chunk| !chunk.trim().is_empty())
        .map(Block::paragraph)
        .collect()
}
