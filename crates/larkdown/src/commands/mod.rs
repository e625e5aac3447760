//! CLI command implementations.

mod convert;
mod render;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use larkdown_config::{CliSettings, Config};
use larkdown_renderer::{MediaOptions, RenderOptions, RenderedDocument};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use convert::ConvertArgs;
pub(crate) use render::RenderArgs;

/// Flags shared by every rendering command.
#[derive(Args)]
pub(crate) struct RenderFlags {
    /// Path to configuration file (default: auto-discover larkdown.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the converted Markdown file (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write Markdown to stdout instead of a file.
    #[arg(long, conflicts_with = "json")]
    stdout: bool,

    /// Write the rendered document with its diagnostics as JSON to stdout.
    #[arg(long)]
    json: bool,

    /// Directory for downloaded media (overrides config).
    #[arg(long)]
    media_dir: Option<PathBuf>,

    /// Prefix for downloaded media references (overrides config).
    #[arg(long)]
    media_prefix: Option<String>,

    /// Download media into the media directory instead of linking remote URLs.
    #[arg(long)]
    download_media: bool,

    /// Emit HTML <img> tags with width and height.
    #[arg(long)]
    html_img: bool,

    /// Render colored callouts as GitHub admonitions.
    #[arg(long)]
    admonitions: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderFlags {
    /// Load config with these flags layered on top.
    fn load_config(&self, timeout_secs: Option<u64>) -> Result<Config, CliError> {
        let settings = CliSettings {
            output_dir: self.output_dir.clone(),
            media_dir: self.media_dir.clone(),
            media_prefix: self.media_prefix.clone(),
            download_media: self.download_media.then_some(true),
            html_img: self.html_img.then_some(true),
            admonitions: self.admonitions.then_some(true),
            timeout_secs,
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }

    /// Emit `document` to stdout or into the output directory.
    fn emit(
        &self,
        document: &RenderedDocument,
        fallback_name: &str,
        config: &Config,
        output: &Output,
    ) -> Result<(), CliError> {
        report_diagnostics(document, output);

        if self.json {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, document)?;
            writeln!(stdout)?;
            return Ok(());
        }
        if self.stdout {
            std::io::stdout().lock().write_all(document.markdown.as_bytes())?;
            return Ok(());
        }

        let path = write_markdown(document, fallback_name, &config.output_dir)?;
        output.success(&format!("Wrote {}", path.display()));
        Ok(())
    }
}

/// Map configuration onto renderer options.
fn render_options(config: &Config) -> RenderOptions {
    let media = &config.media_resolved;
    RenderOptions {
        media: MediaOptions {
            dir: media.dir.clone().unwrap_or_default(),
            url_prefix: media.url_prefix.clone(),
            as_remote_url: media.remote_urls,
            html_img: media.html_img,
        },
        use_admonition_style: config.callout.admonitions,
    }
}

fn report_diagnostics(document: &RenderedDocument, output: &Output) {
    if document.diagnostics.is_empty() {
        return;
    }
    output.warning(&format!(
        "{} block(s) could not be converted cleanly:",
        document.diagnostics.len()
    ));
    for diagnostic in &document.diagnostics {
        output.info(&format!("  - {diagnostic}"));
    }
}

/// Write the Markdown as `<dir>/<title or fallback>.md`.
fn write_markdown(
    document: &RenderedDocument,
    fallback_name: &str,
    dir: &Path,
) -> Result<PathBuf, CliError> {
    let stem = document
        .title
        .as_deref()
        .map(sanitize_file_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| sanitize_file_name(fallback_name));

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{stem}.md"));
    std::fs::write(&path, &document.markdown)?;
    Ok(path)
}

/// Replace characters that are not allowed in file names.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    cleaned.trim().trim_matches('.').trim().to_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn document(title: Option<&str>) -> RenderedDocument {
        RenderedDocument {
            markdown: "# Notes\n".to_owned(),
            title: title.map(str::to_owned),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Q3 plan: draft/v2"), "Q3 plan_ draft_v2");
        assert_eq!(sanitize_file_name("  ..hidden  "), "hidden");
        assert_eq!(sanitize_file_name("会议纪要"), "会议纪要");
        assert_eq!(sanitize_file_name("a\tb"), "a_b");
    }

    #[test]
    fn test_write_markdown_uses_title() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");

        let path = write_markdown(&document(Some("Release notes")), "doxcnA", &dir).unwrap();

        assert_eq!(path, dir.join("Release notes.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Notes\n");
    }

    #[test]
    fn test_write_markdown_falls_back_to_id() {
        let tmp = tempfile::tempdir().unwrap();

        let untitled = write_markdown(&document(None), "doxcnA", tmp.path()).unwrap();
        let blank = write_markdown(&document(Some(" / ")), "doxcnB", tmp.path()).unwrap();

        assert_eq!(untitled, tmp.path().join("doxcnA.md"));
        assert_eq!(blank, tmp.path().join("_.md"));
    }

    #[test]
    fn test_render_options_from_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("larkdown.toml");
        std::fs::write(
            &path,
            "[media]\ndir = \"static\"\nurl_prefix = \"static/\"\nremote_urls = false\n\n[callout]\nadmonitions = true\n",
        )
        .unwrap();
        let config = Config::load(Some(&path), None).unwrap();

        let options = render_options(&config);

        assert_eq!(options.media.dir, tmp.path().join("static"));
        assert_eq!(options.media.url_prefix, "static/");
        assert!(!options.media.as_remote_url);
        assert!(!options.media.html_img);
        assert!(options.use_admonition_style);
    }

    #[test]
    fn test_render_options_default_links_remote() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("larkdown.toml");
        std::fs::write(&path, "").unwrap();
        let config = Config::load(Some(&path), None).unwrap();

        let options = render_options(&config);

        assert!(options.media.as_remote_url);
        assert!(options.media.mirror_dir().is_none());
    }
}
