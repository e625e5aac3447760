//! Document block types as returned by the docx API.

use larkdown_renderer::{
    Align, Block, BlockKind, CalloutStyle, ImageRef, RunStyle, TableProperty, TextBody,
    TextElement, TextRun,
};
use serde::{Deserialize, Serialize};

/// Block as listed by `GET /open-apis/docx/v1/documents/{id}/blocks`.
///
/// Exactly one payload field is set, selected by `block_type`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawBlock {
    pub block_id: String,
    pub parent_id: String,
    pub children: Vec<String>,
    pub block_type: u32,
    pub page: Option<RawText>,
    pub text: Option<RawText>,
    pub heading1: Option<RawText>,
    pub heading2: Option<RawText>,
    pub heading3: Option<RawText>,
    pub heading4: Option<RawText>,
    pub heading5: Option<RawText>,
    pub heading6: Option<RawText>,
    pub heading7: Option<RawText>,
    pub heading8: Option<RawText>,
    pub heading9: Option<RawText>,
    pub bullet: Option<RawText>,
    pub ordered: Option<RawText>,
    pub code: Option<RawText>,
    pub quote: Option<RawText>,
    pub todo: Option<RawText>,
    pub callout: Option<RawCallout>,
    pub image: Option<RawImage>,
    pub table: Option<RawTable>,
}

/// Text payload shared by all text-bearing blocks.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawText {
    pub elements: Vec<RawElement>,
    pub style: RawTextStyle,
}

/// Block-level text style.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawTextStyle {
    /// 1 left, 2 center, 3 right.
    pub align: Option<u32>,
    /// Todo completion flag.
    pub done: Option<bool>,
    /// Code block language id.
    pub language: Option<u32>,
}

/// One inline element; exactly one field is set.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawElement {
    pub text_run: Option<RawTextRun>,
    pub mention_doc: Option<RawMentionDoc>,
    pub mention_user: Option<RawMentionUser>,
    pub equation: Option<RawEquation>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawTextRun {
    pub content: String,
    pub text_element_style: TextElementStyle,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawMentionDoc {
    pub token: String,
    pub url: String,
    pub title: String,
    pub text_element_style: TextElementStyle,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawMentionUser {
    pub user_id: String,
    pub text_element_style: TextElementStyle,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawEquation {
    pub content: String,
    pub text_element_style: TextElementStyle,
}

/// Inline style flags.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct TextElementStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub inline_code: bool,
    pub link: Option<RawLink>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawLink {
    /// Percent-encoded target URL.
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawCallout {
    pub emoji_id: String,
    pub background_color: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawImage {
    pub token: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawTable {
    pub cells: Vec<String>,
    pub property: Option<RawTableProperty>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawTableProperty {
    pub row_size: usize,
    pub column_size: usize,
}

impl RawBlock {
    fn heading(&mut self, level: u8) -> Option<RawText> {
        match level {
            1 => self.heading1.take(),
            2 => self.heading2.take(),
            3 => self.heading3.take(),
            4 => self.heading4.take(),
            5 => self.heading5.take(),
            6 => self.heading6.take(),
            7 => self.heading7.take(),
            8 => self.heading8.take(),
            9 => self.heading9.take(),
            _ => None,
        }
    }

    /// Payload for the declared type; `None` when it is missing.
    fn kind(&mut self) -> Option<BlockKind> {
        let kind = match self.block_type {
            1 => BlockKind::Page(self.page.take()?.into()),
            2 => BlockKind::Text(self.text.take()?.into()),
            code @ 3..=11 => {
                let level = u8::try_from(code - 2).ok()?;
                BlockKind::Heading {
                    level,
                    body: self.heading(level)?.into(),
                }
            }
            12 => BlockKind::Bullet(self.bullet.take()?.into()),
            13 => BlockKind::Ordered(self.ordered.take()?.into()),
            14 => {
                let code = self.code.take()?;
                BlockKind::Code {
                    language: code.style.language,
                    body: code.into(),
                }
            }
            15 => BlockKind::Quote(self.quote.take()?.into()),
            17 => {
                let todo = self.todo.take()?;
                BlockKind::Todo {
                    done: todo.style.done.unwrap_or(false),
                    body: todo.into(),
                }
            }
            19 => {
                let callout = self.callout.take()?;
                BlockKind::Callout(CalloutStyle {
                    emoji_id: callout.emoji_id,
                    background_color: callout.background_color,
                })
            }
            22 => BlockKind::Divider,
            27 => {
                let image = self.image.take()?;
                BlockKind::Image(ImageRef {
                    token: image.token,
                    width: image.width,
                    height: image.height,
                })
            }
            31 => BlockKind::Table(self.table.take().and_then(|table| table.property).map(
                |property| TableProperty {
                    rows: property.row_size,
                    columns: property.column_size,
                },
            )),
            32 => BlockKind::TableCell,
            34 => BlockKind::QuoteContainer,
            _ => return None,
        };
        Some(kind)
    }
}

impl From<RawBlock> for Block {
    /// Convert into a core block. Unknown type codes and missing payloads
    /// become [`BlockKind::Unsupported`].
    fn from(mut raw: RawBlock) -> Self {
        let kind = raw
            .kind()
            .unwrap_or(BlockKind::Unsupported(raw.block_type));
        Block {
            id: raw.block_id,
            parent_id: raw.parent_id,
            children: raw.children,
            kind,
        }
    }
}

impl From<RawText> for TextBody {
    fn from(text: RawText) -> Self {
        TextBody {
            elements: text.elements.into_iter().filter_map(RawElement::into_element).collect(),
            align: text.style.align.map(Align::from_code).unwrap_or_default(),
        }
    }
}

impl RawElement {
    fn into_element(self) -> Option<TextElement> {
        if let Some(run) = self.text_run {
            return Some(TextElement::Run(TextRun::styled(
                run.content,
                run.text_element_style.into(),
            )));
        }
        if let Some(doc) = self.mention_doc {
            return Some(TextElement::MentionDoc {
                title: doc.title,
                url: doc.url,
                style: doc.text_element_style.into(),
            });
        }
        if let Some(user) = self.mention_user {
            return Some(TextElement::MentionUser {
                name: user.user_id,
                style: user.text_element_style.into(),
            });
        }
        self.equation.map(|equation| TextElement::Equation {
            content: equation.content,
            style: equation.text_element_style.into(),
        })
    }
}

impl From<TextElementStyle> for RunStyle {
    fn from(style: TextElementStyle) -> Self {
        RunStyle {
            bold: style.bold,
            italic: style.italic,
            inline_code: style.inline_code,
            strikethrough: style.strikethrough,
            underline: style.underline,
            link: style.link.map(|link| link.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(json: &str) -> Block {
        serde_json::from_str::<RawBlock>(json).unwrap().into()
    }

    #[test]
    fn test_text_block() {
        let block = parse(
            r#"{
                "block_id": "doxcnText",
                "parent_id": "doxcnPage",
                "block_type": 2,
                "text": {
                    "elements": [
                        {"text_run": {"content": "Hello ", "text_element_style": {"bold": true}}},
                        {"text_run": {"content": "link", "text_element_style": {"link": {"url": "https%3A%2F%2Fa.com"}}}}
                    ],
                    "style": {"align": 2}
                }
            }"#,
        );

        assert_eq!(block.id, "doxcnText");
        assert_eq!(block.parent_id, "doxcnPage");
        let BlockKind::Text(body) = block.kind else {
            panic!("expected text block");
        };
        assert_eq!(body.align, Align::Center);
        assert_eq!(
            body.elements,
            vec![
                TextElement::Run(TextRun::styled("Hello ", RunStyle::bold())),
                TextElement::Run(TextRun::styled("link", RunStyle::link("https%3A%2F%2Fa.com"))),
            ]
        );
    }

    #[test]
    fn test_heading_level_from_type() {
        let block = parse(
            r#"{"block_id": "h", "block_type": 11, "heading9": {"elements": []}}"#,
        );
        assert!(matches!(block.kind, BlockKind::Heading { level: 9, .. }));
    }

    #[test]
    fn test_code_and_todo_style() {
        let code = parse(
            r#"{"block_id": "c", "block_type": 14, "code": {"elements": [], "style": {"language": 53}}}"#,
        );
        assert!(matches!(code.kind, BlockKind::Code { language: Some(53), .. }));

        let todo = parse(
            r#"{"block_id": "t", "block_type": 17, "todo": {"elements": [], "style": {"done": true}}}"#,
        );
        assert!(matches!(todo.kind, BlockKind::Todo { done: true, .. }));
    }

    #[test]
    fn test_table_property() {
        let block = parse(
            r#"{
                "block_id": "t",
                "block_type": 31,
                "children": ["c1", "c2"],
                "table": {"cells": ["c1", "c2"], "property": {"row_size": 1, "column_size": 2}}
            }"#,
        );
        assert_eq!(
            block.kind,
            BlockKind::Table(Some(TableProperty {
                rows: 1,
                columns: 2
            }))
        );
        assert_eq!(block.children, vec!["c1", "c2"]);
    }

    #[test]
    fn test_table_without_property() {
        let block = parse(r#"{"block_id": "t", "block_type": 31, "table": {}}"#);
        assert_eq!(block.kind, BlockKind::Table(None));
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let block = parse(r#"{"block_id": "x", "block_type": 99, "iframe": {}}"#);
        assert_eq!(block.kind, BlockKind::Unsupported(99));
    }

    #[test]
    fn test_missing_payload_is_unsupported() {
        let block = parse(r#"{"block_id": "x", "block_type": 2}"#);
        assert_eq!(block.kind, BlockKind::Unsupported(2));
    }

    #[test]
    fn test_mentions_and_equation() {
        let block = parse(
            r#"{
                "block_id": "m",
                "block_type": 2,
                "text": {"elements": [
                    {"mention_user": {"user_id": "ou_123"}},
                    {"mention_doc": {"token": "doxcn1", "title": "Spec", "url": "https%3A%2F%2Fx.feishu.cn%2Fdocx%2Fdoxcn1"}},
                    {"equation": {"content": "a^2\n"}},
                    {"unknown_element": {}}
                ]}
            }"#,
        );
        let BlockKind::Text(body) = block.kind else {
            panic!("expected text block");
        };
        assert_eq!(body.elements.len(), 3);
        assert!(matches!(&body.elements[0], TextElement::MentionUser { name, .. } if name == "ou_123"));
    }
}
