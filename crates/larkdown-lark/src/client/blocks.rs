//! Block listing for docx documents.

use std::collections::VecDeque;

use larkdown_renderer::Block;
use tracing::{debug, info};

use super::{LarkClient, read_json};
use crate::error::LarkError;
use crate::types::{Envelope, ListBlocksData, RawBlock};

/// Maximum page size accepted by the listing endpoint.
const PAGE_SIZE: &str = "500";

impl LarkClient {
    /// Fetch one page of blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API reports an error code.
    pub fn list_blocks_page(
        &self,
        document_id: &str,
        page_token: Option<&str>,
    ) -> Result<ListBlocksData, LarkError> {
        let url = format!("{}/docx/v1/documents/{document_id}/blocks", self.api_url());
        debug!("Listing blocks of {document_id} (page token {page_token:?})");

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &self.bearer()?)
            .query("page_size", PAGE_SIZE)
            .query("document_revision_id", "-1");
        if let Some(token) = page_token {
            request = request.query("page_token", token);
        }

        let envelope: Envelope<ListBlocksData> = read_json(request.call()?)?;
        envelope.into_data()
    }

    /// Iterate over every block of a document, fetching pages lazily.
    #[must_use]
    pub fn list_blocks<'a>(&'a self, document_id: &str) -> BlockPages<'a> {
        info!("Listing blocks of document {document_id}");
        BlockPages {
            client: self,
            document_id: document_id.to_owned(),
            page_token: None,
            buffer: VecDeque::new(),
            finished: false,
        }
    }
}

/// Lazy iterator over the blocks of a document.
///
/// Yields blocks in document order. The first error ends the iteration.
pub struct BlockPages<'a> {
    client: &'a LarkClient,
    document_id: String,
    page_token: Option<String>,
    buffer: VecDeque<RawBlock>,
    finished: bool,
}

impl Iterator for BlockPages<'_> {
    type Item = Result<Block, LarkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(raw) = self.buffer.pop_front() {
                return Some(Ok(raw.into()));
            }
            if self.finished {
                return None;
            }

            match self
                .client
                .list_blocks_page(&self.document_id, self.page_token.as_deref())
            {
                Ok(page) => {
                    self.buffer.extend(page.items);
                    self.page_token = page.page_token.filter(|token| !token.is_empty());
                    self.finished = !page.has_more || self.page_token.is_none();
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
