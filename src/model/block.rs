//! Parsed content blocks.

use serde::{Deserialize, Serialize};

/// Semantic kind of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Level-1 heading
    H1,
    /// Level-2 heading
    H2,
    /// Level-3 heading (also bold standalone lines)
    H3,
    /// Numbered list item
    Bullet,
    /// Numbered list item with a bold lead-in, possibly with description lines
    BulletBold,
    /// Body copy
    Body,
    /// Indented body copy
    BodyIndent,
}

impl BlockKind {
    /// Name used in reports and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::H1 => "h1",
            BlockKind::H2 => "h2",
            BlockKind::H3 => "h3",
            BlockKind::Bullet => "bullet",
            BlockKind::BulletBold => "bullet_bold",
            BlockKind::Body => "body",
            BlockKind::BodyIndent => "body_indent",
        }
    }

    /// Check if this is a heading kind.
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::H1 | BlockKind::H2 | BlockKind::H3)
    }

    /// Check if this is a list item kind.
    pub fn is_bullet(&self) -> bool {
        matches!(self, BlockKind::Bullet | BlockKind::BulletBold)
    }

    /// Whether blocks of this kind render emphasized.
    pub fn is_emphasized(&self) -> bool {
        self.is_heading() || *self == BlockKind::BulletBold
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified unit of text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Semantic kind
    pub kind: BlockKind,

    /// Paragraph text
    pub text: String,

    /// Whether the block is emphasized (headings and bold bullets)
    pub emphasis: bool,

    /// Description lines attached to a bold bullet
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl ContentBlock {
    /// Create a block; emphasis follows the kind.
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            emphasis: kind.is_emphasized(),
            children: Vec::new(),
        }
    }

    /// Attach description lines.
    pub fn with_children(mut self, children: Vec<String>) -> Self {
        self.children = children;
        self
    }
}

/// A parsed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Cell texts of the first row
    pub headers: Vec<String>,

    /// Remaining rows; may be ragged
    pub rows: Vec<Vec<String>>,

    /// Declared column widths in twips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<Vec<u32>>,
}

impl TableBlock {
    /// Create a table without declared widths.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            column_widths: None,
        }
    }

    /// Set declared widths; an empty list means none.
    pub fn with_column_widths(mut self, widths: Vec<u32>) -> Self {
        self.column_widths = (!widths.is_empty()).then_some(widths);
        self
    }

    /// Number of grid columns: the header count or the widest row, whichever
    /// is larger.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(self.headers.len())
    }

    /// Number of rows including the header row.
    pub fn row_count(&self) -> usize {
        1 + self.rows.len()
    }

    /// Get plain text, one line per row with cells separated by tabs.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A block of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Text content
    Content(ContentBlock),
    /// A table
    Table(TableBlock),
}

impl Block {
    /// Borrow the content block, if this is one.
    pub fn as_content(&self) -> Option<&ContentBlock> {
        match self {
            Block::Content(c) => Some(c),
            Block::Table(_) => None,
        }
    }

    /// Borrow the table, if this is one.
    pub fn as_table(&self) -> Option<&TableBlock> {
        match self {
            Block::Table(t) => Some(t),
            Block::Content(_) => None,
        }
    }

    /// Get plain text of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Content(c) if c.children.is_empty() => c.text.clone(),
            Block::Content(c) => {
                let mut lines = vec![c.text.clone()];
                lines.extend(c.children.iter().cloned());
                lines.join("\n")
            }
            Block::Table(t) => t.plain_text(),
        }
    }
}

impl From<ContentBlock> for Block {
    fn from(block: ContentBlock) -> Self {
        Block::Content(block)
    }
}

impl From<TableBlock> for Block {
    fn from(table: TableBlock) -> Self {
        Block::Table(table)
    }
}

/// The ordered result of parsing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Blocks in source order
    pub blocks: Vec<Block>,
}

impl ParsedDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Append a block.
    pub fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }

    /// Check if no content was found.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Iterate over blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Iterate over text content blocks.
    pub fn content_blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.blocks.iter().filter_map(Block::as_content)
    }

    /// Iterate over tables.
    pub fn tables(&self) -> impl Iterator<Item = &TableBlock> {
        self.blocks.iter().filter_map(Block::as_table)
    }

    /// Count content blocks of a kind.
    pub fn count_kind(&self, kind: BlockKind) -> usize {
        self.content_blocks().filter(|b| b.kind == kind).count()
    }

    /// Get plain text of the whole document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl<'a> IntoIterator for &'a ParsedDocument {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
