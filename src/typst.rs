use crate::block::{Block, Document, Span};
use crate::config::Config;

/// Convert a classified document to Typst markup
pub fn document_to_typst(document: &Document, config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    out.push_str("#set page(paper: ");
    push_string_literal(&config.page.paper, &mut out);
    out.push_str(")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    out.push('\n');

    emit_blocks(document.blocks(), config, &mut out);
    out
}

fn emit_blocks(blocks: &[Block], config: &Config, out: &mut String) {
    let mut i = 0;
    while i < blocks.len() {
        match &blocks[i] {
            block @ (Block::Heading2 { .. } | Block::Heading3 { .. }) => {
                // Keep heading with a following paragraph or code panel
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, config, out);
                if let Some(next @ (Block::Paragraph { .. } | Block::CodeBlock { .. })) =
                    blocks.get(i + 1)
                {
                    i += 1;
                    emit_block(next, config, out);
                }
                out.push_str("]\n\n");
            }
            Block::TableHeaderRow { .. } | Block::TableRow { .. } => {
                let start = i;
                while blocks.get(i + 1).is_some_and(Block::is_table_row) {
                    i += 1;
                }
                emit_table(&blocks[start..=i], out);
            }
            block => {
                emit_block(block, config, out);
                // Consecutive items form one list; end it with a blank line
                if block.is_list_item() && !blocks.get(i + 1).is_some_and(Block::is_list_item) {
                    out.push('\n');
                }
            }
        }

        i += 1;
    }
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Title { text, body } => {
            let (mut text, mut body) = (text, body);
            // A nested title is always its parent's only block
            loop {
                out.push_str("= ");
                escape_into(text, out);
                out.push_str("\n\n");
                match body.blocks() {
                    [Block::Title { text: inner, body: inner_body }] => {
                        text = inner;
                        body = inner_body;
                    }
                    blocks => {
                        emit_blocks(blocks, config, out);
                        break;
                    }
                }
            }
        }
        Block::Heading2 { text } => {
            out.push_str("== ");
            escape_into(text, out);
            out.push_str("\n\n");
        }
        Block::Heading3 { text } => {
            out.push_str("=== ");
            escape_into(text, out);
            out.push_str("\n\n");
        }
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::BulletItem { content } => {
            out.push_str("- ");
            spans_to_typst(content, out);
            out.push('\n');
        }
        Block::DefinitionBulletItem { term, body } => {
            out.push_str("- #strong[");
            escape_into(term, out);
            out.push_str(":]");
            if !body.is_empty() {
                out.push(' ');
                escape_into(body, out);
            }
            out.push('\n');
        }
        Block::NumberedItem { index, text } => {
            out.push_str(index);
            out.push_str(". ");
            escape_into(text, out);
            out.push('\n');
        }
        Block::CodeBlock { language, code } => {
            let fence = "`".repeat(longest_backtick_run(code).max(2) + 1);
            out.push_str(&format!("#block(breakable: {})[\n", config.code.breakable));
            out.push_str(&fence);
            if let Some(lang) = language.as_deref().filter(|lang| is_language_tag(lang)) {
                out.push_str(lang);
            }
            out.push('\n');
            out.push_str(code);
            if !code.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push_str("\n]\n\n");
        }
        Block::TableHeaderRow { .. } | Block::TableRow { .. } => {
            emit_table(std::slice::from_ref(block), out);
        }
    }
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::PlainText(text) => escape_into(text, out),
            Span::Bold(text) => {
                out.push_str("#strong[");
                escape_into(text, out);
                out.push(']');
            }
            Span::InlineCode(text) => {
                // Scanner output never contains a backtick
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
        }
    }
}

/// Table rows are emitted as-is; short rows get empty trailing cells so the
/// grid stays aligned.
fn emit_table(rows: &[Block], out: &mut String) {
    let col_count = rows.iter().map(|row| row_cells(row).len()).max().unwrap_or(0);
    if col_count == 0 {
        return;
    }

    out.push_str("#block(breakable: false)[\n#table(\n");
    out.push_str(&format!("  columns: {},\n", col_count));

    for row in rows {
        let cells = row_cells(row);
        let header = matches!(row, Block::TableHeaderRow { .. });
        for cell in cells {
            if cell.is_empty() {
                out.push_str("  [],\n");
            } else if header {
                out.push_str("  [*");
                escape_into(cell, out);
                out.push_str("*],\n");
            } else {
                out.push_str("  [");
                escape_into(cell, out);
                out.push_str("],\n");
            }
        }
        for _ in cells.len()..col_count {
            out.push_str("  [],\n");
        }
    }

    out.push_str(")\n]\n\n");
}

fn row_cells(row: &Block) -> &[String] {
    match row {
        Block::TableHeaderRow { cells } | Block::TableRow { cells } => cells,
        _ => &[],
    }
}

/// Escape Typst markup characters, plus list and enum markers at line starts.
fn escape_into(text: &str, out: &mut String) {
    let mut line_start = true;
    let mut leading_digits = false;
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '(' | '~' | '/'
            | '=' | '-' | '+' => {
                out.push('\\');
                out.push(ch);
            }
            '.' if leading_digits => out.push_str("\\."),
            _ => out.push(ch),
        }
        leading_digits = ch.is_ascii_digit() && (line_start || leading_digits);
        line_start = ch == '\n' || (line_start && (ch == ' ' || ch == '\t'));
    }
}

fn push_string_literal(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
}

fn longest_backtick_run(code: &str) -> usize {
    code.split(|ch: char| ch != '`').map(str::len).max().unwrap_or(0)
}

fn is_language_tag(lang: &str) -> bool {
    lang.chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '+' | '_' | '.' | '#'))
}

#[cfg(test)]
mod tests {
    use crate::text_to_typst;
    use pretty_assertions::assert_eq;

    const PREAMBLE: &str = "#set par(linebreaks: \"optimized\")\n#set page(paper: \"a4\")\n\n";

    #[test]
    fn heading() {
        assert_eq!(
            text_to_typst("# Hello"),
            format!("{PREAMBLE}#block(breakable: false)[\n== Hello\n\n]\n\n")
        );
    }

    #[test]
    fn heading_with_following_paragraph() {
        let result = text_to_typst("# Overview\nSome text.");
        assert!(result.contains("#block(breakable: false)[\n== Overview\n\nSome text.\n\n]\n\n"));
    }

    #[test]
    fn title_renders_body_after_it() {
        assert_eq!(
            text_to_typst("**Title: Plan**\nship it"),
            format!("{PREAMBLE}= Plan\n\nship it\n\n")
        );
    }

    #[test]
    fn nested_titles_render_in_order() {
        assert_eq!(
            text_to_typst("**Title: A**\n**Title: B**\nbody"),
            format!("{PREAMBLE}= A\n\n= B\n\nbody\n\n")
        );
    }

    #[test]
    fn deep_title_chain_renders() {
        let text = "**Title: t**\n".repeat(10_000) + "end";
        let result = text_to_typst(&text);
        assert_eq!(result.matches("= t\n\n").count(), 10_000);
        assert!(result.ends_with("end\n\n"));
    }

    #[test]
    fn paragraph() {
        assert_eq!(
            text_to_typst("Hello world"),
            format!("{PREAMBLE}Hello world\n\n")
        );
    }

    #[test]
    fn bold_spans() {
        assert_eq!(
            text_to_typst("a **b** c"),
            format!("{PREAMBLE}a #strong[b] c\n\n")
        );
    }

    #[test]
    fn inline_code() {
        assert_eq!(text_to_typst("`code`"), format!("{PREAMBLE}`code`\n\n"));
    }

    #[test]
    fn code_block() {
        assert_eq!(
            text_to_typst("```rust\nlet x = 1;\n```"),
            format!("{PREAMBLE}#block(breakable: false)[\n```rust\nlet x = 1;\n```\n]\n\n")
        );
    }

    #[test]
    fn code_block_honors_breakable_config() {
        let mut config = crate::Config::default();
        config.code.breakable = true;
        let result = crate::document_to_typst(&crate::classify("```\nx\n```"), &config);
        assert!(result.contains("#block(breakable: true)[\n```\nx\n```\n]"));
    }

    #[test]
    fn bullet_list() {
        assert_eq!(
            text_to_typst("• one\n• two"),
            format!("{PREAMBLE}- one\n- two\n\n")
        );
    }

    #[test]
    fn numbered_list_keeps_indices() {
        assert_eq!(
            text_to_typst("1. one\n3. three"),
            format!("{PREAMBLE}1. one\n3. three\n\n")
        );
    }

    #[test]
    fn definition_bullets() {
        assert_eq!(
            text_to_typst("- **Speed**: fast"),
            format!("{PREAMBLE}- #strong[Speed:] fast\n\n")
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(text_to_typst("a < b"), format!("{PREAMBLE}a \\< b\n\n"));
        assert_eq!(text_to_typst("a_b"), format!("{PREAMBLE}a\\_b\n\n"));
        assert_eq!(text_to_typst("a/b"), format!("{PREAMBLE}a\\/b\n\n"));
    }

    #[test]
    fn paren_after_strong_is_not_a_call() {
        assert_eq!(
            text_to_typst("**f**(x)"),
            format!("{PREAMBLE}#strong[f]\\(x)\n\n")
        );
    }

    #[test]
    fn escapes_enum_marker_at_line_start() {
        let result = text_to_typst("**x**\n2. y");
        assert!(result.ends_with("#strong[x]\n2\\. y\n\n"));
    }

    #[test]
    fn table_pads_short_rows_in_output_only() {
        let text = "|A|B|\n|-|-|\n|1|";
        let expected = format!(
            "{PREAMBLE}#block(breakable: false)[\n#table(\n  columns: 2,\n  [*A*],\n  [*B*],\n  [1],\n  [],\n)\n]\n\n"
        );
        assert_eq!(text_to_typst(text), expected);
    }

    #[test]
    fn page_numbers() {
        let mut config = crate::Config::default();
        config.page.numbers = true;
        let result = crate::document_to_typst(&crate::classify("x"), &config);
        assert!(result.contains("#set page(numbering: \"1\")\n"));
    }
}
