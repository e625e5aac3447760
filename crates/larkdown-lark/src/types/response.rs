//! API response envelopes.

use serde::{Deserialize, Serialize};

use super::RawBlock;
use crate::error::LarkError;

/// Standard `{code, msg, data}` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// Business code; `0` on success.
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Payload of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`LarkError::Api`] for a non-zero code or a missing payload.
    pub fn into_data(self) -> Result<T, LarkError> {
        if self.code != 0 {
            return Err(LarkError::Api {
                code: self.code,
                msg: self.msg,
            });
        }
        self.data.ok_or_else(|| LarkError::Api {
            code: self.code,
            msg: "response has no data".to_owned(),
        })
    }
}

/// One page of the block listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListBlocksData {
    pub items: Vec<RawBlock>,
    pub page_token: Option<String>,
    pub has_more: bool,
}

/// Body of `POST /open-apis/auth/v3/tenant_access_token/internal`.
#[derive(Debug, Clone, Serialize)]
pub struct TenantTokenRequest<'a> {
    pub app_id: &'a str,
    pub app_secret: &'a str,
}

/// Tenant token response; this endpoint is not wrapped in `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantTokenResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub tenant_access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expire: u64,
}

/// Payload of `batch_get_tmp_download_url`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmpDownloadUrlsData {
    pub tmp_download_urls: Vec<TmpDownloadUrl>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmpDownloadUrl {
    pub file_token: String,
    pub tmp_download_url: String,
}

/// Payload of `GET /open-apis/wiki/v2/spaces/get_node`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WikiNodeData {
    pub node: WikiNode,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WikiNode {
    pub obj_token: String,
    pub obj_type: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_blocks_envelope() {
        let json = r#"{
            "code": 0,
            "msg": "success",
            "data": {
                "items": [{"block_id": "doxcn1", "block_type": 22, "divider": {}}],
                "page_token": "next",
                "has_more": true
            }
        }"#;
        let envelope: Envelope<ListBlocksData> = serde_json::from_str(json).unwrap();
        let data = envelope.into_data().unwrap();

        assert_eq!(data.items.len(), 1);
        assert_eq!(data.page_token.as_deref(), Some("next"));
        assert!(data.has_more);
    }

    #[test]
    fn test_error_code() {
        let json = r#"{"code": 1770002, "msg": "not found"}"#;
        let envelope: Envelope<ListBlocksData> = serde_json::from_str(json).unwrap();

        let err = envelope.into_data().unwrap_err();
        assert!(matches!(err, LarkError::Api { code: 1_770_002, .. }));
        assert_eq!(err.to_string(), "Lark API error 1770002: not found");
    }
}
