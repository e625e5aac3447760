//! Configuration management for larkdown.
//!
//! Parses `larkdown.toml` with serde and discovers it in the current
//! directory or its parents. CLI flags are layered on top through
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `lark.base_url`
//! - `lark.app_id`
//! - `lark.app_secret`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Directory for converted Markdown files.
    pub output_dir: Option<PathBuf>,
    /// Directory for downloaded media.
    pub media_dir: Option<PathBuf>,
    /// Prefix for downloaded media references.
    pub media_prefix: Option<String>,
    /// Download media instead of embedding remote URLs.
    pub download_media: Option<bool>,
    /// Emit HTML `<img>` tags.
    pub html_img: Option<bool>,
    /// Render callouts as GitHub admonitions.
    pub admonitions: Option<bool>,
    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "larkdown.toml";

const DEFAULT_BASE_URL: &str = "https://open.feishu.cn";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lark open platform credentials.
    pub lark: LarkConfig,
    /// Output section as written in TOML.
    output: OutputConfigRaw,
    /// Media section as written in TOML.
    media: MediaConfigRaw,
    /// Callout rendering.
    pub callout: CalloutConfig,

    /// Directory converted documents are written to (set after loading).
    #[serde(skip)]
    pub output_dir: PathBuf,
    /// Resolved media configuration (set after loading).
    #[serde(skip)]
    pub media_resolved: MediaConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// `[lark]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LarkConfig {
    /// Open platform base URL (`https://open.feishu.cn` or `https://open.larksuite.com`).
    pub base_url: String,
    /// App ID of the custom app.
    pub app_id: String,
    /// App secret of the custom app.
    pub app_secret: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LarkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            app_id: String::new(),
            app_secret: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LarkConfig {
    /// Validate that credentials are present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a field is empty or malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "lark.base_url")?;
        require_http_url(&self.base_url, "lark.base_url")?;
        require_non_empty(&self.app_id, "lark.app_id")?;
        require_non_empty(&self.app_secret, "lark.app_secret")?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MediaConfigRaw {
    dir: String,
    url_prefix: String,
    remote_urls: bool,
    html_img: bool,
}

impl Default for MediaConfigRaw {
    fn default() -> Self {
        Self {
            dir: String::new(),
            url_prefix: String::new(),
            remote_urls: true,
            html_img: false,
        }
    }
}

/// Resolved media configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaConfig {
    /// Download directory; `None` disables downloading.
    pub dir: Option<PathBuf>,
    /// Prefix written in front of downloaded file names.
    pub url_prefix: String,
    /// Embed temporary remote URLs instead of downloading.
    pub remote_urls: bool,
    /// Emit `<img src width height/>` instead of `![]()`.
    pub html_img: bool,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: None,
            url_prefix: String::new(),
            remote_urls: true,
            html_img: false,
        }
    }
}

/// `[callout]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CalloutConfig {
    /// Render colored callouts as `> [!NOTE]` style admonitions.
    pub admonitions: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`lark.app_secret`").
        field: String,
        /// Error message (e.g., "${`LARK_APP_SECRET`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// Uses `config_path` when given, otherwise searches for `larkdown.toml`
    /// in the current directory and its parents, falling back to defaults.
    /// CLI settings are applied last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// env expansion fails, or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir.clone_from(output_dir);
        }
        if let Some(media_dir) = &settings.media_dir {
            self.media_resolved.dir =
                (!media_dir.as_os_str().is_empty()).then(|| media_dir.clone());
        }
        if let Some(prefix) = &settings.media_prefix {
            self.media_resolved.url_prefix.clone_from(prefix);
        }
        if let Some(download) = settings.download_media {
            self.media_resolved.remote_urls = !download;
        }
        if let Some(html_img) = settings.html_img {
            self.media_resolved.html_img = html_img;
        }
        if let Some(admonitions) = settings.admonitions {
            self.callout.admonitions = admonitions;
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.lark.timeout_secs = timeout_secs;
        }
    }

    /// Get validated Lark credentials.
    ///
    /// Use this instead of reading `lark` directly when the command talks to
    /// the open platform.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if credentials are missing.
    pub fn require_lark(&self) -> Result<&LarkConfig, ConfigError> {
        self.lark.validate()?;
        Ok(&self.lark)
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            lark: LarkConfig::default(),
            output: OutputConfigRaw::default(),
            media: MediaConfigRaw::default(),
            callout: CalloutConfig::default(),
            output_dir: base.join(DEFAULT_OUTPUT_DIR),
            media_resolved: MediaConfig::default(),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate values that every command depends on.
    ///
    /// Credentials are checked separately by [`require_lark`](Self::require_lark)
    /// so offline commands work without them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.lark.base_url, "lark.base_url")?;
        require_http_url(&self.lark.base_url, "lark.base_url")?;
        if self.lark.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "lark.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.lark.base_url = expand::expand_env(&self.lark.base_url, "lark.base_url")?;
        self.lark.app_id = expand::expand_env(&self.lark.app_id, "lark.app_id")?;
        self.lark.app_secret = expand::expand_env(&self.lark.app_secret, "lark.app_secret")?;
        Ok(())
    }

    /// Resolve relative directories against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_dir =
            config_dir.join(self.output.dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR));

        self.media_resolved = MediaConfig {
            dir: (!self.media.dir.is_empty()).then(|| config_dir.join(&self.media.dir)),
            url_prefix: self.media.url_prefix.clone(),
            remote_urls: self.media.remote_urls,
            html_img: self.media.html_img,
        };
    }
}
