//! Callout rendering.

use crate::block::CalloutStyle;
use crate::lookup;
use crate::util::{join_blocks, quote_children};

/// GitHub admonition kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdmonitionKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AdmonitionKind {
    /// Map a background color code to an admonition kind.
    ///
    /// Light and dark shades of the same hue map to the same kind; grays and
    /// unknown codes are notes.
    #[must_use]
    pub fn from_color(color: u32) -> Self {
        match color {
            1 | 8 => Self::Caution,
            2 | 3 | 9 | 10 => Self::Warning,
            4 | 11 => Self::Tip,
            6 | 13 => Self::Important,
            _ => Self::Note,
        }
    }

    /// Marker name used in `> [!NAME]`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "NOTE",
            Self::Tip => "TIP",
            Self::Important => "IMPORTANT",
            Self::Warning => "WARNING",
            Self::Caution => "CAUTION",
        }
    }
}

/// Emoji for a callout, falling back to the `:id:` shortcode.
fn emoji_prefix(emoji_id: &str) -> String {
    match lookup::emoji(emoji_id) {
        Some(emoji) => emoji.to_owned(),
        None if emoji_id.is_empty() => String::new(),
        None => format!(":{emoji_id}:"),
    }
}

/// Whether `text` opens with Markdown that must start its own line.
fn starts_block_construct(text: &str) -> bool {
    text.starts_with('|')
        || text.starts_with("```")
        || text.starts_with('#')
        || text.starts_with('>')
        || text.starts_with("- ")
        || text.starts_with("---")
        || text.starts_with("<!--")
}

/// Render a callout around its already-rendered children.
pub(crate) fn render_callout(
    style: &CalloutStyle,
    mut children: Vec<String>,
    use_admonition_style: bool,
) -> String {
    let emoji = emoji_prefix(&style.emoji_id);
    if !emoji.is_empty() {
        let first = children
            .first()
            .map(|first| (first.is_empty(), starts_block_construct(first)));
        match first {
            None => children.push(emoji),
            Some((true, _)) => children[0] = emoji,
            Some((false, true)) => children.insert(0, emoji),
            Some((false, false)) => children[0] = format!("{emoji} {}", children[0]),
        }
    }

    let Some(color) = style.background_color else {
        return join_blocks(children.iter().map(String::as_str));
    };

    let body = quote_children(&children);
    if use_admonition_style {
        let kind = AdmonitionKind::from_color(color);
        format!("> [!{}]\n>\n{body}", kind.label())
    } else {
        body
    }
}
