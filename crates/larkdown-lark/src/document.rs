//! Document reference parsing.

use crate::error::LarkError;

/// Document named on the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentRef {
    /// Docx document token, usable with the docx API directly.
    Docx(String),
    /// Wiki node token; resolved to its docx token through the wiki API.
    Wiki(String),
}

impl DocumentRef {
    /// The token as written in the input.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Docx(token) | Self::Wiki(token) => token,
        }
    }
}

/// Extract the document token from a bare token or a document URL.
///
/// Accepts `doxcnAbc123`, `https://example.feishu.cn/docx/doxcnAbc123` and
/// `https://example.larksuite.com/wiki/wikcnXyz?from=share`. Bare tokens are
/// treated as docx tokens.
///
/// # Errors
///
/// Returns [`LarkError::InvalidDocument`] if no token can be found.
///
/// # Examples
///
/// ```
/// use larkdown_lark::{DocumentRef, document_id_from_input};
///
/// let id = document_id_from_input("https://x.feishu.cn/docx/doxcnAbc?from=share").unwrap();
/// assert_eq!(id, DocumentRef::Docx("doxcnAbc".to_owned()));
/// ```
pub fn document_id_from_input(input: &str) -> Result<DocumentRef, LarkError> {
    let input = input.trim();
    let invalid = || LarkError::InvalidDocument(input.to_owned());

    if !input.contains('/') {
        return if is_token(input) {
            Ok(DocumentRef::Docx(input.to_owned()))
        } else {
            Err(invalid())
        };
    }

    let path = input
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').collect();

    segments
        .windows(2)
        .find_map(|pair| match (pair[0], pair[1]) {
            ("docx" | "docs", token) if is_token(token) => {
                Some(DocumentRef::Docx(token.to_owned()))
            }
            ("wiki", token) if is_token(token) => Some(DocumentRef::Wiki(token.to_owned())),
            _ => None,
        })
        .ok_or_else(invalid)
}

fn is_token(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
