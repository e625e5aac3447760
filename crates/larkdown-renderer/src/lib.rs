//! Block-tree to Markdown rendering for Lark documents.
//!
//! A document arrives as a flat list of [`Block`]s that reference their
//! children by id. [`DocumentRenderer`] pulls the list from a
//! [`BlockSource`], rebuilds the tree with [`build_tree`] and renders it
//! post-order:
//!
//! - Inline runs are merged by style, so adjacent runs with the same style
//!   share one delimiter pair ([`render_inline`]).
//! - Text-bearing blocks render their own line and join their children with
//!   blank lines; list items indent their children.
//! - Tables, table cells, callouts and quote containers consume their
//!   rendered children inside their own rule.
//!
//! Images are delegated to a [`MediaResolver`]. Nothing in this crate talks
//! to the network.
//!
//! Only a failing block source and cancellation abort a render. Every other
//! anomaly is logged with `tracing` and returned as a [`Diagnostic`].
//!
//! # Example
//!
//! ```
//! use larkdown_renderer::{
//!     ATTRIBUTION, Block, BlockKind, RenderOptions, TextBody, TokenResolver, render_document,
//! };
//!
//! let blocks = vec![
//!     Block::new("doc", BlockKind::Page(TextBody::plain("Notes"))).with_children(["h", "p"]),
//!     Block::new("h", BlockKind::Heading { level: 2, body: TextBody::plain("Intro") }),
//!     Block::new("p", BlockKind::Text(TextBody::plain("Hello"))),
//! ];
//! let source = blocks.into_iter().map(Ok::<_, std::io::Error>);
//!
//! let document = render_document(source, &TokenResolver, RenderOptions::default()).unwrap();
//! assert_eq!(
//!     document.markdown,
//!     format!("# Notes\n\n## Intro\n\nHello\n\n{ATTRIBUTION}\n")
//! );
//! ```

mod block;
mod callout;
mod cancel;
mod diagnostic;
mod document;
mod error;
mod inline;
mod lookup;
mod media;
mod renderer;
mod table;
mod tree;
mod util;

pub use block::{
    Align, Block, BlockKind, CalloutStyle, ImageRef, RunStyle, TableProperty, TextBody,
    TextElement, TextRun,
};
pub use callout::AdmonitionKind;
pub use cancel::Cancellation;
pub use diagnostic::Diagnostic;
pub use document::{
    ATTRIBUTION, BlockSource, DocumentRenderer, RenderOptions, RenderedDocument, render_document,
};
pub use error::RenderError;
pub use inline::{InlineMode, render_inline, unescape_url};
pub use lookup::{code_language, emoji};
pub use media::{BoxError, MediaOptions, MediaResolver, ResolvedMedia, TokenResolver};
pub use renderer::placeholder;
pub use tree::{BuildOutcome, DocumentTree, MAX_DEPTH, Node, NodeId, build_tree};
pub use util::heading_marker;
