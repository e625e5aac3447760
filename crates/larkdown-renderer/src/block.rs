//! Document block model.
//!
//! A document arrives as a flat list of [`Block`]s. Parent/child structure is
//! expressed through id references (`parent_id`, `children`); the tree is
//! rebuilt by [`build_tree`](crate::build_tree).

/// One structural unit of a document.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Identifier, unique within a document.
    pub id: String,
    /// Identifier of the structural parent (empty for the root).
    pub parent_id: String,
    /// Child block ids in document order.
    pub children: Vec<String>,
    /// Block type and type-specific payload.
    pub kind: BlockKind,
}

impl Block {
    /// Create a block without children.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            parent_id: String::new(),
            children: Vec::new(),
            kind,
        }
    }

    /// Set the parent id.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = parent_id.into();
        self
    }

    /// Set child ids.
    #[must_use]
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this is the content-less wrapper that upstream listings may
    /// emit ahead of the real root.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.id.is_empty() && self.children.is_empty() && self.kind.is_empty()
    }
}

/// Block type together with its payload.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockKind {
    /// Document root carrying the title.
    Page(TextBody),
    /// Plain paragraph.
    Text(TextBody),
    /// Heading with level 1..=9.
    Heading { level: u8, body: TextBody },
    /// Unordered list item.
    Bullet(TextBody),
    /// Ordered list item.
    Ordered(TextBody),
    /// Code block; `language` is the service language id.
    Code { language: Option<u32>, body: TextBody },
    /// Single-paragraph quote.
    Quote(TextBody),
    /// Checklist item.
    Todo { done: bool, body: TextBody },
    /// Highlighted block; content lives in the children.
    Callout(CalloutStyle),
    /// Horizontal rule.
    Divider,
    /// Embedded image.
    Image(ImageRef),
    /// Table; `None` when the row/column counts are missing.
    Table(Option<TableProperty>),
    /// Table cell; content lives in the children.
    TableCell,
    /// Quote container; every child is quoted.
    QuoteContainer,
    /// Type code without a rendering rule.
    Unsupported(u32),
    /// Placeholder for blocks with no payload at all.
    #[default]
    Empty,
}

impl BlockKind {
    /// Numeric type code used by the document service.
    #[must_use]
    pub fn type_code(&self) -> u32 {
        match self {
            Self::Page(_) => 1,
            Self::Text(_) => 2,
            Self::Heading { level, .. } => 2 + u32::from(*level),
            Self::Bullet(_) => 12,
            Self::Ordered(_) => 13,
            Self::Code { .. } => 14,
            Self::Quote(_) => 15,
            Self::Todo { .. } => 17,
            Self::Callout(_) => 19,
            Self::Divider => 22,
            Self::Image(_) => 27,
            Self::Table(_) => 31,
            Self::TableCell => 32,
            Self::QuoteContainer => 34,
            Self::Unsupported(code) => *code,
            Self::Empty => 0,
        }
    }

    /// Text body for text-bearing kinds.
    #[must_use]
    pub fn text_body(&self) -> Option<&TextBody> {
        match self {
            Self::Page(body)
            | Self::Text(body)
            | Self::Bullet(body)
            | Self::Ordered(body)
            | Self::Quote(body)
            | Self::Heading { body, .. }
            | Self::Code { body, .. }
            | Self::Todo { body, .. } => Some(body),
            _ => None,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Page(body) | Self::Text(body) => body.elements.is_empty(),
            _ => false,
        }
    }
}

/// Inline content of a text-bearing block.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextBody {
    /// Inline elements in order.
    pub elements: Vec<TextElement>,
    /// Paragraph alignment (used for table column alignment).
    pub align: Align,
}

impl TextBody {
    /// Body made of a single unstyled run.
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        Self::from_runs([TextRun::plain(content)])
    }

    /// Body made of the given runs.
    #[must_use]
    pub fn from_runs(runs: impl IntoIterator<Item = TextRun>) -> Self {
        Self {
            elements: runs.into_iter().map(TextElement::Run).collect(),
            align: Align::Left,
        }
    }

    /// Set alignment.
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Concatenated literal text without any markup.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .map(|element| match element {
                TextElement::Run(run) => run.content.as_str(),
                TextElement::MentionDoc { title, .. } => title.as_str(),
                TextElement::MentionUser { name, .. } => name.as_str(),
                TextElement::Equation { content, .. } => content.as_str(),
            })
            .collect()
    }
}

/// Inline element of a text body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextElement {
    /// Literal text with a style.
    Run(TextRun),
    /// Reference to another document.
    MentionDoc {
        title: String,
        url: String,
        style: RunStyle,
    },
    /// Reference to a user (display name or user id).
    MentionUser { name: String, style: RunStyle },
    /// Inline formula (LaTeX).
    Equation { content: String, style: RunStyle },
}

/// Inline atomic unit: literal content plus style.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRun {
    /// Literal content.
    pub content: String,
    /// Style flags.
    pub style: RunStyle,
}

impl TextRun {
    /// Unstyled run.
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: RunStyle::default(),
        }
    }

    /// Run with the given style.
    #[must_use]
    pub fn styled(content: impl Into<String>, style: RunStyle) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }
}

/// Inline style record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub inline_code: bool,
    pub strikethrough: bool,
    pub underline: bool,
    /// Link target, possibly percent-encoded.
    pub link: Option<String>,
}

impl RunStyle {
    #[must_use]
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn code() -> Self {
        Self {
            inline_code: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            link: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Paragraph alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Map the service alignment code (1 left, 2 center, 3 right).
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        match code {
            2 => Self::Center,
            3 => Self::Right,
            _ => Self::Left,
        }
    }
}

/// Callout metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalloutStyle {
    /// Emoji id (e.g. `bulb`).
    pub emoji_id: String,
    /// Background color code, if any.
    pub background_color: Option<u32>,
}

/// Image reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageRef {
    /// Media token.
    pub token: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Table dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableProperty {
    pub rows: usize,
    pub columns: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_block_is_sentinel() {
        assert!(Block::default().is_sentinel());
    }

    #[test]
    fn test_page_with_id_is_not_sentinel() {
        let block = Block::new("doc", BlockKind::Page(TextBody::default()));
        assert!(!block.is_sentinel());
    }

    #[test]
    fn test_block_with_children_is_not_sentinel() {
        let block = Block::default().with_children(["a"]);
        assert!(!block.is_sentinel());
    }

    #[test]
    fn test_heading_type_code() {
        let kind = BlockKind::Heading {
            level: 9,
            body: TextBody::default(),
        };
        assert_eq!(kind.type_code(), 11);
        assert_eq!(BlockKind::Unsupported(99).type_code(), 99);
    }

    #[test]
    fn test_plain_text_concatenates_elements() {
        let body = TextBody {
            elements: vec![
                TextElement::Run(TextRun::styled("see ", RunStyle::bold())),
                TextElement::MentionDoc {
                    title: "Guide".to_owned(),
                    url: "https://example.com".to_owned(),
                    style: RunStyle::default(),
                },
            ],
            align: Align::Left,
        };
        assert_eq!(body.plain_text(), "see Guide");
    }

    #[test]
    fn test_align_from_code() {
        assert_eq!(Align::from_code(1), Align::Left);
        assert_eq!(Align::from_code(2), Align::Center);
        assert_eq!(Align::from_code(3), Align::Right);
        assert_eq!(Align::from_code(42), Align::Left);
    }
}
