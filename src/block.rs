use serde::{Deserialize, Serialize};

/// Inline text spans inside paragraph and list item content.
///
/// Serialized as `{"kind": "...", "text": "..."}`. The `kind` values are the
/// contract consumed by renderers and must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Span {
    PlainText(String),
    Bold(String),
    InlineCode(String),
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span::PlainText(text.into())
    }

    /// Discriminator of this span, identical to its serialized `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            Span::PlainText(_) => "plain_text",
            Span::Bold(_) => "bold",
            Span::InlineCode(_) => "inline_code",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Span::PlainText(text) | Span::Bold(text) | Span::InlineCode(text) => text,
        }
    }
}

/// Block-level elements produced by classification.
///
/// `Title` is the only variant that nests: its `body` is the document built
/// from the input with the title line removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title {
        text: String,
        body: Document,
    },
    Heading2 {
        text: String,
    },
    Heading3 {
        text: String,
    },
    Paragraph {
        content: Vec<Span>,
    },
    BulletItem {
        content: Vec<Span>,
    },
    DefinitionBulletItem {
        term: String,
        body: String,
    },
    NumberedItem {
        /// Digit run exactly as written, leading zeros included
        index: String,
        text: String,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    TableHeaderRow {
        cells: Vec<String>,
    },
    TableRow {
        cells: Vec<String>,
    },
}

impl Block {
    /// A paragraph holding `text` as a single plain span.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            content: vec![Span::plain(text)],
        }
    }

    /// A bullet item holding `text` as a single plain span.
    pub fn bullet(text: impl Into<String>) -> Self {
        Block::BulletItem {
            content: vec![Span::plain(text)],
        }
    }

    /// Discriminator of this block, identical to its serialized `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Title { .. } => "title",
            Block::Heading2 { .. } => "heading2",
            Block::Heading3 { .. } => "heading3",
            Block::Paragraph { .. } => "paragraph",
            Block::BulletItem { .. } => "bullet_item",
            Block::DefinitionBulletItem { .. } => "definition_bullet_item",
            Block::NumberedItem { .. } => "numbered_item",
            Block::CodeBlock { .. } => "code_block",
            Block::TableHeaderRow { .. } => "table_header_row",
            Block::TableRow { .. } => "table_row",
        }
    }

    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            Block::BulletItem { .. } | Block::DefinitionBulletItem { .. } | Block::NumberedItem { .. }
        )
    }

    pub fn is_table_row(&self) -> bool {
        matches!(self, Block::TableHeaderRow { .. } | Block::TableRow { .. })
    }
}

/// Ordered sequence of blocks in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Vec<Block>);

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn into_blocks(mut self) -> Vec<Block> {
        std::mem::take(&mut self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.0.iter()
    }

    /// Visible text of the document, one line per block, titles included.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        // Explicit stack: title chains can nest as deep as the input has title lines
        let mut stack = vec![self.0.iter()];
        while let Some(blocks) = stack.last_mut() {
            let Some(block) = blocks.next() else {
                stack.pop();
                continue;
            };
            match block {
                Block::Title { text, body } => {
                    lines.push(text.clone());
                    stack.push(body.iter());
                }
                Block::Heading2 { text } | Block::Heading3 { text } => lines.push(text.clone()),
                Block::Paragraph { content } | Block::BulletItem { content } => {
                    lines.push(content.iter().map(Span::text).collect());
                }
                Block::DefinitionBulletItem { term, body } => lines.push(format!("{term}: {body}")),
                Block::NumberedItem { index, text } => lines.push(format!("{index}. {text}")),
                Block::CodeBlock { code, .. } => lines.push(code.clone()),
                Block::TableHeaderRow { cells } | Block::TableRow { cells } => {
                    lines.push(cells.join(" | "));
                }
            }
        }
        lines.join("\n")
    }
}

/// Title bodies are detached and dropped one level at a time so a deep title
/// chain does not recurse once per level.
impl Drop for Document {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_bodies(&mut self.0, &mut pending);
        while let Some(mut document) = pending.pop() {
            detach_bodies(&mut document.0, &mut pending);
        }
    }
}

fn detach_bodies(blocks: &mut [Block], pending: &mut Vec<Document>) {
    for block in blocks {
        if let Block::Title { body, .. } = block {
            if !body.is_empty() {
                pending.push(std::mem::take(body));
            }
        }
    }
}

impl From<Vec<Block>> for Document {
    fn from(blocks: Vec<Block>) -> Self {
        Self(blocks)
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(mut self) -> Self::IntoIter {
        std::mem::take(&mut self.0).into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
