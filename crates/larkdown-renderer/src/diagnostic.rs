//! Non-fatal anomalies recorded during a render.
//!
//! Each diagnostic is logged with `tracing::warn!` where it is detected and
//! returned to the caller in [`RenderedDocument::diagnostics`](crate::RenderedDocument).
//! None of them abort the render.

/// Anomaly contained to one subtree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Diagnostic {
    /// The same id appeared more than once in the flat block list.
    #[error("block id {id} appears more than once; keeping the first occurrence")]
    DuplicateId {
        /// Colliding id.
        id: String,
    },

    /// A child id does not resolve to any block.
    #[error("block {parent} references missing child {child}")]
    DanglingReference {
        /// Parent listing the child.
        parent: String,
        /// Missing child id.
        child: String,
    },

    /// A block is listed as a child of more than one parent.
    #[error("block {child} is already attached elsewhere; ignoring it under {parent}")]
    SharedChild {
        /// Second parent listing the child.
        parent: String,
        /// Child id.
        child: String,
    },

    /// A block cannot be reached from the root.
    #[error("block {id} is not reachable from the document root")]
    Unreachable {
        /// Orphaned id.
        id: String,
    },

    /// Nesting exceeds the supported depth.
    #[error("block {id} exceeds the maximum nesting depth of {limit}")]
    DepthLimit {
        /// First block that was cut.
        id: String,
        /// Maximum depth.
        limit: usize,
    },

    /// Type code without a rendering rule.
    #[error("block {id} has unsupported type {code}")]
    UnknownBlockType {
        /// Block id.
        id: String,
        /// Raw type code.
        code: u32,
    },

    /// Payload is missing fields required to render it.
    #[error("block {id} is malformed: {reason}")]
    MalformedBlock {
        /// Block id.
        id: String,
        /// What is missing.
        reason: String,
    },

    /// Table cell count does not match the declared dimensions.
    #[error("table {id} declares {rows}x{columns} cells but has {cells}")]
    TableShape {
        /// Table block id.
        id: String,
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        columns: usize,
        /// Actual cell count.
        cells: usize,
    },

    /// The media resolver failed for an image.
    #[error("image {token} could not be resolved: {message}")]
    MediaResolution {
        /// Media token.
        token: String,
        /// Resolver error message.
        message: String,
    },
}

/// Collects diagnostics and logs each one as it is pushed.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.items.push(diagnostic);
    }

    pub(crate) fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
