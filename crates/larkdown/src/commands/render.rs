//! `larkdown render` command implementation.

use std::path::PathBuf;

use clap::Args;
use larkdown_lark::JsonDumpSource;
use larkdown_renderer::{DocumentRenderer, TokenResolver};

use super::{RenderFlags, render_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON dump of the block listing (array of blocks or a list-blocks response).
    json_file: PathBuf,

    #[command(flatten)]
    pub(crate) flags: RenderFlags,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Images are referenced by their media token since no service is
    /// contacted.
    ///
    /// # Errors
    ///
    /// Returns an error if the dump cannot be read or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.flags.load_config(None)?;
        let source = JsonDumpSource::open(&self.json_file)?;
        output.info(&format!(
            "Rendering {} blocks from {}...",
            source.remaining(),
            self.json_file.display()
        ));

        let rendered = DocumentRenderer::new(render_options(&config)).render(source, &TokenResolver)?;

        let fallback = self
            .json_file
            .file_stem()
            .map_or_else(|| "document".to_owned(), |stem| stem.to_string_lossy().into_owned());
        self.flags.emit(&rendered, &fallback, &config, &output)
    }
}
