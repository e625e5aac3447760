//! Offline block source reading a JSON dump.

use std::path::Path;

use larkdown_renderer::Block;
use serde::Deserialize;
use tracing::info;

use crate::error::LarkError;
use crate::types::{Envelope, ListBlocksData, RawBlock};

/// Accepted dump layouts.
#[derive(Deserialize)]
#[serde(untagged)]
enum Dump {
    /// Bare array of blocks.
    Blocks(Vec<RawBlock>),
    /// Full list-blocks response, `{code, msg, data: {items}}`.
    Response(Envelope<ListBlocksData>),
    /// Only the `data` object, `{items, ...}`.
    Page(ListBlocksData),
}

/// Block source over a JSON dump of the block listing.
#[derive(Debug)]
pub struct JsonDumpSource {
    blocks: std::vec::IntoIter<Block>,
}

impl JsonDumpSource {
    /// Read a dump from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a block dump.
    pub fn open(path: &Path) -> Result<Self, LarkError> {
        info!("Reading block dump {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a dump from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a block dump or the dumped
    /// response carries an API error code.
    pub fn from_json(json: &str) -> Result<Self, LarkError> {
        let raw = match serde_json::from_str::<Dump>(json)? {
            Dump::Blocks(blocks) => blocks,
            Dump::Response(envelope) => envelope.into_data()?.items,
            Dump::Page(page) => page.items,
        };
        let blocks: Vec<Block> = raw.into_iter().map(Block::from).collect();
        Ok(Self {
            blocks: blocks.into_iter(),
        })
    }

    /// Number of blocks not yet yielded.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.blocks.len()
    }
}

impl Iterator for JsonDumpSource {
    type Item = Result<Block, LarkError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.blocks.next().map(Ok)
    }
}
