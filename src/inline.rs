//! Delimiter-pair scanner for inline spans.
//!
//! One left-to-right pass with a two-state automaton. Text between an opening
//! and a closing delimiter becomes the toggled span kind, everything else is
//! plain text. A dangling opening delimiter is consumed, and the text after it
//! is still emitted as plain text.

use log::trace;

use crate::block::Span;

const BOLD_DELIMITER: &str = "**";
const CODE_DELIMITER: &str = "`";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Inside,
}

/// Split `text` on `**` pairs into plain and bold spans.
pub fn scan_bold(text: &str) -> Vec<Span> {
    scan(text, BOLD_DELIMITER, Span::Bold)
}

/// Split `text` on single backtick pairs into plain and inline code spans.
pub fn scan_inline_code(text: &str) -> Vec<Span> {
    scan(text, CODE_DELIMITER, Span::InlineCode)
}

fn scan(text: &str, delimiter: &str, toggled: fn(String) -> Span) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let mut state = State::Outside;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix(delimiter) {
            state = match state {
                State::Outside => {
                    if !buffer.is_empty() {
                        spans.push(Span::PlainText(std::mem::take(&mut buffer)));
                    }
                    State::Inside
                }
                State::Inside => {
                    // Closing always emits, even an empty pair
                    spans.push(toggled(std::mem::take(&mut buffer)));
                    State::Outside
                }
            };
            rest = after;
        } else {
            buffer.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    if !buffer.is_empty() {
        spans.push(Span::PlainText(buffer));
    }
    trace!(
        "scanned {} spans with delimiter {delimiter:?}, ended {state:?}",
        spans.len()
    );
    spans
}
