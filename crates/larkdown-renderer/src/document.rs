//! Document assembly.

use crate::block::{Block, BlockKind};
use crate::cancel::Cancellation;
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::error::RenderError;
use crate::media::{BoxError, MediaOptions, MediaResolver};
use crate::renderer::NodeRenderer;
use crate::tree::build_tree;

/// Footer appended to every rendered document.
pub const ATTRIBUTION: &str = "_Converted from Lark by larkdown._";

/// Source of blocks in document order.
pub trait BlockSource {
    /// Next block, `Ok(None)` once exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying listing fails.
    fn next_block(&mut self) -> Result<Option<Block>, BoxError>;
}

impl<I, E> BlockSource for I
where
    I: Iterator<Item = Result<Block, E>>,
    E: Into<BoxError>,
{
    fn next_block(&mut self) -> Result<Option<Block>, BoxError> {
        self.next().transpose().map_err(Into::into)
    }
}

/// Rendering options.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Image handling.
    pub media: MediaOptions,
    /// Render colored callouts as GitHub admonitions (`> [!NOTE]`).
    pub use_admonition_style: bool,
}

/// Result of rendering a document.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedDocument {
    /// Markdown text, ending with [`ATTRIBUTION`] and a newline.
    pub markdown: String,
    /// Plain-text title of the root page, if the root is a page.
    pub title: Option<String>,
    /// Non-fatal anomalies, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders a block source to Markdown.
///
/// # Example
///
/// ```
/// use larkdown_renderer::{Block, BlockKind, DocumentRenderer, TextBody, TokenResolver};
///
/// let blocks = vec![
///     Block::new("doc", BlockKind::Page(TextBody::plain("Title"))).with_children(["p"]),
///     Block::new("p", BlockKind::Text(TextBody::plain("Hello"))),
/// ];
/// let source = blocks.into_iter().map(Ok::<_, std::io::Error>);
///
/// let document = DocumentRenderer::default()
///     .render(source, &TokenResolver)
///     .unwrap();
/// assert!(document.markdown.starts_with("# Title\n\nHello"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DocumentRenderer {
    options: RenderOptions,
    cancellation: Cancellation,
}

impl DocumentRenderer {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            cancellation: Cancellation::default(),
        }
    }

    /// Abort the render when `cancellation` trips.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Pull every block from `source`, rebuild the tree and render it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Fetch`] if the source fails and
    /// [`RenderError::Cancelled`] if the cancellation signal trips. All other
    /// anomalies are reported in [`RenderedDocument::diagnostics`].
    pub fn render<S, R>(&self, mut source: S, resolver: &R) -> Result<RenderedDocument, RenderError>
    where
        S: BlockSource,
        R: MediaResolver + ?Sized,
    {
        let mut blocks = Vec::new();
        loop {
            self.check_cancelled()?;
            match source.next_block().map_err(RenderError::Fetch)? {
                Some(block) => blocks.push(block),
                None => break,
            }
        }
        tracing::debug!("Fetched {} blocks", blocks.len());

        if blocks.len() > 1 && blocks[0].is_sentinel() {
            blocks.remove(0);
        }

        let mut diagnostics = Diagnostics::default();
        let outcome = build_tree(blocks);
        diagnostics.extend(outcome.diagnostics);

        let Some(tree) = outcome.tree else {
            return Ok(RenderedDocument {
                markdown: format!("{ATTRIBUTION}\n"),
                title: None,
                diagnostics: diagnostics.into_vec(),
            });
        };

        let title = match &tree.node(tree.root()).block().kind {
            BlockKind::Page(body) => Some(body.plain_text()),
            _ => None,
        };

        let body = NodeRenderer::new(
            &tree,
            &self.options,
            resolver,
            &self.cancellation,
            &mut diagnostics,
        )
        .render_root()?;

        let markdown = if body.is_empty() {
            format!("{ATTRIBUTION}\n")
        } else {
            format!("{body}\n\n{ATTRIBUTION}\n")
        };

        let diagnostics = diagnostics.into_vec();
        tracing::info!(
            "Rendered {} blocks with {} diagnostics",
            tree.len(),
            diagnostics.len()
        );

        Ok(RenderedDocument {
            markdown,
            title,
            diagnostics,
        })
    }

    fn check_cancelled(&self) -> Result<(), RenderError> {
        if self.cancellation.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        Ok(())
    }
}

/// Render with default cancellation.
///
/// # Errors
///
/// See [`DocumentRenderer::render`].
pub fn render_document<S, R>(
    source: S,
    resolver: &R,
    options: RenderOptions,
) -> Result<RenderedDocument, RenderError>
where
    S: BlockSource,
    R: MediaResolver + ?Sized,
{
    DocumentRenderer::new(options).render(source, resolver)
}
