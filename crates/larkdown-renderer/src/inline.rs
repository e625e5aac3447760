//! Inline rendering with style merging.
//!
//! Adjacent runs that share a style are written inside one delimiter pair.
//! When the style changes, every open delimiter is closed (innermost first)
//! and the delimiters of the new style are opened in a fixed order.

use percent_encoding::percent_decode_str;

use crate::block::{RunStyle, TextElement};

/// How inline elements are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InlineMode {
    /// Markdown delimiters for bold, italic, code, strikethrough and underline.
    #[default]
    Styled,
    /// Literal text only (code blocks).
    Plain,
}

/// Render inline elements to a Markdown string.
#[must_use]
pub fn render_inline(elements: &[TextElement], mode: InlineMode) -> String {
    match mode {
        InlineMode::Plain => elements.iter().map(literal_text).collect(),
        InlineMode::Styled => {
            let mut merger = StyleMerger::default();
            for element in elements {
                let (content, style) = decorated_text(element);
                merger.push(&content, StyleFlags::from(style));
            }
            merger.finish()
        }
    }
}

/// Percent-decode a link target.
#[must_use]
pub fn unescape_url(url: &str) -> String {
    percent_decode_str(url).decode_utf8_lossy().into_owned()
}

/// Content of an element with links and mentions resolved to Markdown link
/// syntax, so they merge like any other text.
fn decorated_text(element: &TextElement) -> (String, &RunStyle) {
    match element {
        TextElement::Run(run) => {
            let content = match &run.style.link {
                Some(url) => format!("[{}]({})", run.content, unescape_url(url)),
                None => run.content.clone(),
            };
            (content, &run.style)
        }
        TextElement::MentionDoc { title, url, style } => {
            (format!("[{title}]({})", unescape_url(url)), style)
        }
        TextElement::MentionUser { name, style } => (format!("@{name}"), style),
        TextElement::Equation { content, style } => {
            (format!("${}$", content.trim_end_matches('\n')), style)
        }
    }
}

fn literal_text(element: &TextElement) -> &str {
    match element {
        TextElement::Run(run) => &run.content,
        TextElement::MentionDoc { title, .. } => title,
        TextElement::MentionUser { name, .. } => name,
        TextElement::Equation { content, .. } => content,
    }
}

/// Style flags that map to delimiters. Links are resolved before merging and
/// are not tracked here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
struct StyleFlags {
    bold: bool,
    inline_code: bool,
    italic: bool,
    strikethrough: bool,
    underline: bool,
}

impl From<&RunStyle> for StyleFlags {
    fn from(style: &RunStyle) -> Self {
        Self {
            bold: style.bold,
            inline_code: style.inline_code,
            italic: style.italic,
            strikethrough: style.strikethrough,
            underline: style.underline,
        }
    }
}

impl StyleFlags {
    /// Delimiters in opening order as `(active, open, close)`.
    fn delimiters(self) -> [(bool, &'static str, &'static str); 5] {
        [
            (self.bold, "**", "**"),
            (self.inline_code, "`", "`"),
            (self.italic, "*", "*"),
            (self.strikethrough, "~~", "~~"),
            (self.underline, "<u>", "</u>"),
        ]
    }
}

/// Tracks the currently open style while appending runs.
#[derive(Default)]
struct StyleMerger {
    output: String,
    open: StyleFlags,
}

impl StyleMerger {
    fn push(&mut self, content: &str, style: StyleFlags) {
        if content.is_empty() {
            return;
        }
        if style != self.open {
            self.close_all();
            for (active, open, _) in style.delimiters() {
                if active {
                    self.output.push_str(open);
                }
            }
            self.open = style;
        }
        self.output.push_str(content);
    }

    fn close_all(&mut self) {
        for (active, _, close) in self.open.delimiters().into_iter().rev() {
            if active {
                self.output.push_str(close);
            }
        }
        self.open = StyleFlags::default();
    }

    fn finish(mut self) -> String {
        self.close_all();
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::TextRun;

    fn runs(items: &[(&str, RunStyle)]) -> Vec<TextElement> {
        items
            .iter()
            .map(|(content, style)| TextElement::Run(TextRun::styled(*content, style.clone())))
            .collect()
    }

    fn styled(items: &[(&str, RunStyle)]) -> String {
        render_inline(&runs(items), InlineMode::Styled)
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(render_inline(&[], InlineMode::Styled), "");
        assert_eq!(render_inline(&[], InlineMode::Plain), "");
    }

    #[test]
    fn test_plain_run() {
        assert_eq!(styled(&[("Hello", RunStyle::default())]), "Hello");
    }

    #[test]
    fn test_empty_styled_run_adds_no_delimiters() {
        let bold = RunStyle {
            bold: true,
            ..RunStyle::default()
        };
        assert_eq!(styled(&[("", bold.clone()), ("x", RunStyle::default())]), "x");
        assert_eq!(styled(&[("a", bold.clone()), ("", RunStyle::default()), ("b", bold)]), "**ab**");
    }

    #[test]
    fn test_empty_plain_run_adds_no_delimiters() {
        assert_eq!(styled(&[("", RunStyle::default())]), "");
    }

    #[test]
    fn test_uniform_style_single_pair() {
        let result = styled(&[
            ("a", RunStyle::bold()),
            ("b", RunStyle::bold()),
            ("c", RunStyle::bold()),
        ]);
        assert_eq!(result, "**abc**");
    }

    #[test]
    fn test_split_run_matches_single_run() {
        let style = RunStyle {
            italic: true,
            strikethrough: true,
            ..RunStyle::default()
        };
        let whole = styled(&[("hello world", style.clone())]);
        let split = styled(&[("hello ", style.clone()), ("world", style)]);
        assert_eq!(whole, split);
        assert_eq!(whole, "*~~hello world~~*");
    }

    #[test]
    fn test_style_change_closes_and_reopens() {
        let result = styled(&[
            ("plain ", RunStyle::default()),
            ("bold", RunStyle::bold()),
            (" tail", RunStyle::default()),
        ]);
        assert_eq!(result, "plain **bold** tail");
    }

    #[test]
    fn test_delimiters_nest_in_fixed_order() {
        let style = RunStyle {
            bold: true,
            inline_code: true,
            italic: true,
            strikethrough: true,
            underline: true,
            link: None,
        };
        assert_eq!(styled(&[("x", style)]), "**`*~~<u>x</u>~~*`**");
    }

    #[test]
    fn test_adjacent_different_styles() {
        let result = styled(&[("a", RunStyle::bold()), ("b", RunStyle::italic())]);
        assert_eq!(result, "**a***b*");
    }

    #[test]
    fn test_underline_uses_html_tag() {
        let style = RunStyle {
            underline: true,
            ..RunStyle::default()
        };
        assert_eq!(styled(&[("u", style)]), "<u>u</u>");
    }

    #[test]
    fn test_link_is_percent_decoded() {
        let result = styled(&[("x", RunStyle::link("https%3A%2F%2Fa.com"))]);
        assert_eq!(result, "[x](https://a.com)");
    }

    #[test]
    fn test_bold_link_keeps_link_inside_delimiters() {
        let style = RunStyle {
            bold: true,
            link: Some("https://a.com/%E6%96%87".to_owned()),
            ..RunStyle::default()
        };
        assert_eq!(styled(&[("doc", style)]), "**[doc](https://a.com/文)**");
    }

    #[test]
    fn test_mention_doc_rendered_as_link() {
        let elements = vec![TextElement::MentionDoc {
            title: "Design".to_owned(),
            url: "https%3A%2F%2Fexample.com%2Fdocx%2Fabc".to_owned(),
            style: RunStyle::default(),
        }];
        assert_eq!(
            render_inline(&elements, InlineMode::Styled),
            "[Design](https://example.com/docx/abc)"
        );
    }

    #[test]
    fn test_mention_user_and_equation() {
        let elements = vec![
            TextElement::MentionUser {
                name: "alice".to_owned(),
                style: RunStyle::default(),
            },
            TextElement::Run(TextRun::plain(" wrote ")),
            TextElement::Equation {
                content: "E=mc^2\n".to_owned(),
                style: RunStyle::default(),
            },
        ];
        assert_eq!(
            render_inline(&elements, InlineMode::Styled),
            "@alice wrote $E=mc^2$"
        );
    }

    #[test]
    fn test_plain_mode_ignores_style() {
        let elements = runs(&[
            ("let x = ", RunStyle::bold()),
            ("1;", RunStyle::code()),
            ("\nlet y = 2;", RunStyle::link("https://a.com")),
        ]);
        assert_eq!(
            render_inline(&elements, InlineMode::Plain),
            "let x = 1;\nlet y = 2;"
        );
    }
}
