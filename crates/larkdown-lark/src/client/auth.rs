//! Tenant access token handling.

use std::sync::PoisonError;
use std::time::{Duration, Instant};

use tracing::info;

use super::{LarkClient, read_json};
use crate::error::LarkError;
use crate::types::{TenantTokenRequest, TenantTokenResponse};

/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Token together with the instant it should be refreshed.
#[derive(Debug, Clone)]
pub(super) struct CachedToken {
    value: String,
    refresh_at: Instant,
}

impl CachedToken {
    fn new(value: String, expire_secs: u64, now: Instant) -> Self {
        let lifetime = Duration::from_secs(expire_secs).saturating_sub(EXPIRY_MARGIN);
        Self {
            value,
            refresh_at: now + lifetime,
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        now < self.refresh_at
    }
}

impl LarkClient {
    /// Tenant access token, fetched on first use and cached until shortly
    /// before it expires.
    ///
    /// # Errors
    ///
    /// Returns an error if the token request fails or the credentials are
    /// rejected.
    pub fn tenant_access_token(&self) -> Result<String, LarkError> {
        let mut cached = self.token.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let url = format!("{}/auth/v3/tenant_access_token/internal", self.api_url());
        info!("Requesting tenant access token for app {}", self.app_id);

        let payload = serde_json::to_vec(&TenantTokenRequest {
            app_id: &self.app_id,
            app_secret: &self.app_secret,
        })?;
        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json; charset=utf-8")
            .send(&payload[..])?;

        let response: TenantTokenResponse = read_json(response)?;
        if response.code != 0 {
            return Err(LarkError::Api {
                code: response.code,
                msg: response.msg,
            });
        }

        let token = CachedToken::new(response.tenant_access_token, response.expire, now);
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// `Authorization` header value.
    pub(super) fn bearer(&self) -> Result<String, LarkError> {
        Ok(format!("Bearer {}", self.tenant_access_token()?))
    }
}
