//! Lark Open API client.
//!
//! Sync HTTP client for the docx and drive APIs, authenticated with a tenant
//! access token obtained from app credentials.

mod auth;
mod blocks;
mod media;
mod wiki;

use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::Agent;
use ureq::http::Response;

use crate::error::LarkError;

pub use blocks::BlockPages;
pub use media::MediaFile;

use auth::CachedToken;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Lark Open API client.
pub struct LarkClient {
    agent: Agent,
    base_url: String,
    app_id: String,
    app_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl LarkClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - Open platform base URL (`https://open.feishu.cn` or `https://open.larksuite.com`)
    /// * `app_id` - App ID of the custom app
    /// * `app_secret` - App secret of the custom app
    /// * `timeout` - Global HTTP timeout per request
    #[must_use]
    pub fn from_config(base_url: &str, app_id: &str, app_secret: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            app_id: app_id.to_owned(),
            app_secret: app_secret.to_owned(),
            token: Mutex::new(None),
        }
    }

    /// Get the Open API base URL.
    fn api_url(&self) -> String {
        format!("{}/open-apis", self.base_url)
    }
}

/// Return the body of a successful response, or the error body.
fn check_status(response: Response<ureq::Body>) -> Result<ureq::Body, LarkError> {
    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(LarkError::HttpResponse {
            status,
            body: error_body,
        });
    }
    Ok(body)
}

/// Decode a JSON body from a successful response.
fn read_json<T: DeserializeOwned>(response: Response<ureq::Body>) -> Result<T, LarkError> {
    Ok(check_status(response)?.read_json()?)
}
