//! Drive media operations.

use larkdown_renderer::{BoxError, ImageRef, MediaOptions, MediaResolver, ResolvedMedia};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

use super::{LarkClient, check_status, read_json};
use crate::error::LarkError;
use crate::types::{Envelope, TmpDownloadUrlsData};

/// Downloaded media file.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// File extension derived from the content type.
    pub extension: &'static str,
}

impl LarkClient {
    /// Download a media file by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error status.
    pub fn download_media(&self, token: &str) -> Result<MediaFile, LarkError> {
        let url = format!(
            "{}/drive/v1/medias/{}/download",
            self.api_url(),
            utf8_percent_encode(token, NON_ALPHANUMERIC)
        );
        info!("Downloading media {token}");

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.bearer()?)
            .call()?;

        let extension = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map_or("jpg", extension_for_content_type);
        let bytes = check_status(response)?.read_to_vec()?;

        Ok(MediaFile { bytes, extension })
    }

    /// Temporary download URL for a media file (valid for 24 hours).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API reports an error code,
    /// or the response has no URL for `token`.
    pub fn temporary_media_url(&self, token: &str) -> Result<String, LarkError> {
        let url = format!(
            "{}/drive/v1/medias/batch_get_tmp_download_url",
            self.api_url()
        );
        info!("Requesting temporary URL for media {token}");

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.bearer()?)
            .query("file_tokens", token)
            .call()?;

        let envelope: Envelope<TmpDownloadUrlsData> = read_json(response)?;
        envelope
            .into_data()?
            .tmp_download_urls
            .into_iter()
            .find(|entry| entry.file_token == token)
            .map(|entry| entry.tmp_download_url)
            .ok_or_else(|| LarkError::Api {
                code: 0,
                msg: format!("no temporary URL returned for media {token}"),
            })
    }
}

impl MediaResolver for LarkClient {
    fn resolve(&self, image: &ImageRef, options: &MediaOptions) -> Result<ResolvedMedia, BoxError> {
        if options.mirror_dir().is_some() {
            let file = self.download_media(&image.token)?;
            Ok(ResolvedMedia::Download {
                bytes: file.bytes,
                file_name: format!("{}.{}", image.token, file.extension),
            })
        } else {
            Ok(ResolvedMedia::Url(self.temporary_media_url(&image.token)?))
        }
    }
}

/// File extension for a `Content-Type` header value.
fn extension_for_content_type(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => "jpg",
    }
}
