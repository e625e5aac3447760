//! Post-order block renderer.
//!
//! Children are rendered before their parent. Leaf-like kinds merge their
//! own text with their children using blank lines; container kinds (table,
//! table cell, callout, quote container) consume the rendered children inside
//! their own rule.

use crate::block::{Align, BlockKind, TableProperty, TextBody};
use crate::callout::render_callout;
use crate::cancel::Cancellation;
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::document::RenderOptions;
use crate::error::RenderError;
use crate::inline::{InlineMode, render_inline};
use crate::lookup::code_language;
use crate::media::{MediaResolver, image_markup, resolve_reference};
use crate::table::{check_shape, render_table};
use crate::tree::{DocumentTree, NodeId};
use crate::util::{code_fence, heading_marker, indent_lines, join_blocks, quote_children};

/// Placeholder comment for blocks that cannot be rendered.
#[must_use]
pub fn placeholder(code: u32) -> String {
    format!("<!-- unsupported block type: {code} -->")
}

/// Renders the nodes of one tree.
pub(crate) struct NodeRenderer<'a, R: MediaResolver + ?Sized> {
    tree: &'a DocumentTree,
    options: &'a RenderOptions,
    resolver: &'a R,
    cancellation: &'a Cancellation,
    diagnostics: &'a mut Diagnostics,
}

impl<'a, R: MediaResolver + ?Sized> NodeRenderer<'a, R> {
    pub(crate) fn new(
        tree: &'a DocumentTree,
        options: &'a RenderOptions,
        resolver: &'a R,
        cancellation: &'a Cancellation,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            tree,
            options,
            resolver,
            cancellation,
            diagnostics,
        }
    }

    /// Render the whole tree from the root.
    pub(crate) fn render_root(&mut self) -> Result<String, RenderError> {
        self.render_node(self.tree.root())
    }

    fn render_node(&mut self, id: NodeId) -> Result<String, RenderError> {
        let tree = self.tree;
        let block = tree.node(id).block();

        let text = match &block.kind {
            BlockKind::Page(body) => format!("# {}", styled(body)),
            BlockKind::Text(body) => styled(body),
            BlockKind::Heading { level, body } => {
                format!("{} {}", heading_marker(*level), styled(body))
            }
            BlockKind::Bullet(body) => {
                return self.render_list_item(id, format!("- {}", styled(body)), 2);
            }
            BlockKind::Ordered(body) => {
                return self.render_list_item(id, format!("1. {}", styled(body)), 3);
            }
            BlockKind::Todo { done, body } => {
                let marker = if *done { "- [x]" } else { "- [ ]" };
                return self.render_list_item(id, format!("{marker} {}", styled(body)), 2);
            }
            BlockKind::Code { language, body } => render_code(*language, body),
            BlockKind::Quote(body) => format!("> {}", styled(body)),
            BlockKind::Divider => "---".to_owned(),
            BlockKind::Image(image) => {
                self.check_cancelled()?;
                match resolve_reference(self.resolver, image, &self.options.media) {
                    Ok(reference) => image_markup(image, &reference, &self.options.media),
                    Err(err) => {
                        self.diagnostics.push(Diagnostic::MediaResolution {
                            token: image.token.clone(),
                            message: err.to_string(),
                        });
                        String::new()
                    }
                }
            }
            BlockKind::Callout(style) => {
                let children = self.render_children(id)?;
                return Ok(render_callout(
                    style,
                    children,
                    self.options.use_admonition_style,
                ));
            }
            BlockKind::QuoteContainer => {
                let children = self.render_children(id)?;
                return Ok(quote_children(&children));
            }
            BlockKind::TableCell => {
                let children = self.render_children(id)?;
                return Ok(join_lines(&children));
            }
            BlockKind::Table(Some(property)) => return self.render_table(id, *property),
            BlockKind::Table(None) => {
                self.diagnostics.push(Diagnostic::MalformedBlock {
                    id: block.id.clone(),
                    reason: "table has no row/column counts".to_owned(),
                });
                return Ok(placeholder(block.kind.type_code()));
            }
            BlockKind::Unsupported(code) => {
                self.diagnostics.push(Diagnostic::UnknownBlockType {
                    id: block.id.clone(),
                    code: *code,
                });
                placeholder(*code)
            }
            BlockKind::Empty => String::new(),
        };

        let children = self.render_children(id)?;
        Ok(join_blocks(
            std::iter::once(text.as_str()).chain(children.iter().map(String::as_str)),
        ))
    }

    fn render_children(&mut self, id: NodeId) -> Result<Vec<String>, RenderError> {
        let tree = self.tree;
        tree.node(id)
            .children()
            .iter()
            .map(|&child| self.render_node(child))
            .collect()
    }

    /// List item with its children indented underneath.
    fn render_list_item(
        &mut self,
        id: NodeId,
        item: String,
        indent: usize,
    ) -> Result<String, RenderError> {
        let children = self.render_children(id)?;
        let nested = join_blocks(children.iter().map(String::as_str));
        if nested.is_empty() {
            Ok(item)
        } else {
            Ok(format!("{item}\n{}", indent_lines(&nested, indent)))
        }
    }

    fn render_table(&mut self, id: NodeId, property: TableProperty) -> Result<String, RenderError> {
        let tree = self.tree;
        let node = tree.node(id);
        let block = node.block();

        if let Err(mismatch) = check_shape(property, node.children().len()) {
            self.diagnostics.push(Diagnostic::TableShape {
                id: block.id.clone(),
                rows: property.rows,
                columns: property.columns,
                cells: mismatch.cells,
            });
            return Ok(placeholder(block.kind.type_code()));
        }

        let header_align: Vec<Align> = node
            .children()
            .iter()
            .take(property.columns)
            .map(|&cell| self.cell_alignment(cell))
            .collect();
        let cells = self.render_children(id)?;
        Ok(render_table(property.columns, &cells, &header_align))
    }

    /// Alignment of a cell, taken from its first text-bearing child.
    fn cell_alignment(&self, cell: NodeId) -> Align {
        let node = self.tree.node(cell);
        let body = match node.children().first() {
            Some(&first) => self.tree.node(first).block().kind.text_body(),
            None => node.block().kind.text_body(),
        };
        body.map(|body| body.align).unwrap_or_default()
    }

    fn check_cancelled(&self) -> Result<(), RenderError> {
        if self.cancellation.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        Ok(())
    }
}

fn styled(body: &TextBody) -> String {
    render_inline(&body.elements, InlineMode::Styled)
}

fn render_code(language: Option<u32>, body: &TextBody) -> String {
    let content = render_inline(&body.elements, InlineMode::Plain);
    let content = content.trim_end_matches('\n');
    let fence = code_fence(content);
    format!("{fence}{}\n{content}\n{fence}", code_language(language))
}

fn join_lines(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
