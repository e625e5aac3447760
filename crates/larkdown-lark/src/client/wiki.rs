//! Wiki node resolution.

use tracing::info;

use super::{LarkClient, read_json};
use crate::document::DocumentRef;
use crate::error::LarkError;
use crate::types::{Envelope, WikiNodeData};

impl LarkClient {
    /// Docx token for a document reference, resolving wiki nodes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the wiki lookup fails or the node is not a docx
    /// document.
    pub fn resolve_document(&self, document: &DocumentRef) -> Result<String, LarkError> {
        let token = match document {
            DocumentRef::Docx(token) => return Ok(token.clone()),
            DocumentRef::Wiki(token) => token,
        };

        let url = format!("{}/wiki/v2/spaces/get_node", self.api_url());
        info!("Resolving wiki node {token}");

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.bearer()?)
            .query("token", token)
            .call()?;

        let envelope: Envelope<WikiNodeData> = read_json(response)?;
        let node = envelope.into_data()?.node;
        if node.obj_type != "docx" {
            return Err(LarkError::InvalidDocument(format!(
                "wiki node {token} is a {} document, only docx is supported",
                node.obj_type
            )));
        }
        Ok(node.obj_token)
    }
}
