//! Image resolution seam.
//!
//! The renderer never talks to the network. It hands each [`ImageRef`] to a
//! [`MediaResolver`], which either returns a displayable URL or the media
//! bytes. Bytes are written into [`MediaOptions::dir`] and referenced through
//! [`MediaOptions::url_prefix`].

use std::path::{Path, PathBuf};

use crate::block::ImageRef;

/// Boxed error returned by external collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Media handling options.
#[derive(Clone, Debug)]
pub struct MediaOptions {
    /// Directory for downloaded media (empty = do not download).
    pub dir: PathBuf,
    /// Prefix written in front of downloaded file names in Markdown.
    pub url_prefix: String,
    /// Embed resolver-supplied URLs instead of downloading.
    pub as_remote_url: bool,
    /// Emit `<img src width height/>` instead of `![token](ref)`.
    pub html_img: bool,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::new(),
            url_prefix: String::new(),
            as_remote_url: true,
            html_img: false,
        }
    }
}

impl MediaOptions {
    /// Directory to mirror media into, if mirroring is enabled.
    #[must_use]
    pub fn mirror_dir(&self) -> Option<&Path> {
        (!self.as_remote_url && !self.dir.as_os_str().is_empty()).then_some(self.dir.as_path())
    }

    /// Markdown reference for a mirrored file.
    #[must_use]
    pub fn local_reference(&self, file_name: &str) -> String {
        if self.url_prefix.is_empty() || self.url_prefix.ends_with('/') {
            format!("{}{file_name}", self.url_prefix)
        } else {
            format!("{}/{file_name}", self.url_prefix)
        }
    }
}

/// What a resolver produced for one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedMedia {
    /// Displayable URL, used as-is.
    Url(String),
    /// Media bytes plus the file name to store them under.
    Download { bytes: Vec<u8>, file_name: String },
}

/// Resolves image tokens to displayable references.
pub trait MediaResolver {
    /// Resolve one image.
    ///
    /// Implementations should return [`ResolvedMedia::Download`] only when
    /// [`MediaOptions::mirror_dir`] is set.
    fn resolve(&self, image: &ImageRef, options: &MediaOptions) -> Result<ResolvedMedia, BoxError>;
}

impl<F> MediaResolver for F
where
    F: Fn(&ImageRef, &MediaOptions) -> Result<ResolvedMedia, BoxError>,
{
    fn resolve(&self, image: &ImageRef, options: &MediaOptions) -> Result<ResolvedMedia, BoxError> {
        self(image, options)
    }
}

/// Resolver that uses the media token itself as the reference.
///
/// Useful for offline rendering where no media service is reachable.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenResolver;

impl MediaResolver for TokenResolver {
    fn resolve(&self, image: &ImageRef, _options: &MediaOptions) -> Result<ResolvedMedia, BoxError> {
        Ok(ResolvedMedia::Url(image.token.clone()))
    }
}

/// Resolve an image and persist downloaded bytes, returning the reference to
/// write into Markdown.
pub(crate) fn resolve_reference<R: MediaResolver + ?Sized>(
    resolver: &R,
    image: &ImageRef,
    options: &MediaOptions,
) -> Result<String, BoxError> {
    match resolver.resolve(image, options)? {
        ResolvedMedia::Url(url) => Ok(url),
        ResolvedMedia::Download { bytes, file_name } => {
            let dir = options
                .mirror_dir()
                .ok_or("resolver returned media bytes but no media directory is configured")?;
            let name = Path::new(&file_name)
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| format!("invalid media file name: {file_name:?}"))?;

            std::fs::create_dir_all(dir)?;
            std::fs::write(dir.join(name), bytes)?;
            tracing::debug!("Saved media {} to {}", image.token, dir.join(name).display());

            Ok(options.local_reference(name))
        }
    }
}

/// Markdown (or HTML) markup for a resolved image.
pub(crate) fn image_markup(image: &ImageRef, reference: &str, options: &MediaOptions) -> String {
    if options.html_img {
        format!(
            r#"<img src="{reference}" width="{}" height="{}"/>"#,
            image.width, image.height
        )
    } else {
        format!("![{}]({reference})", image.token)
    }
}
