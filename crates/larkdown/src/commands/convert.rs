//! `larkdown convert` command implementation.

use std::time::Duration;

use clap::Args;
use larkdown_lark::{LarkClient, document_id_from_input};
use larkdown_renderer::{Cancellation, DocumentRenderer};

use super::{RenderFlags, render_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Document token or URL (`.../docx/<token>` or `.../wiki/<token>`).
    document: String,

    /// HTTP timeout per request in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Abort the whole conversion after this many seconds.
    #[arg(long, value_name = "SECS")]
    max_time: Option<u64>,

    #[command(flatten)]
    pub(crate) flags: RenderFlags,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, fetching or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.flags.load_config(self.timeout)?;
        let lark = config.require_lark()?;
        let client = LarkClient::from_config(
            &lark.base_url,
            &lark.app_id,
            &lark.app_secret,
            Duration::from_secs(lark.timeout_secs),
        );

        let document = document_id_from_input(&self.document)?;
        let document_id = client.resolve_document(&document)?;
        output.info(&format!("Converting {document_id}..."));

        let cancellation = self
            .max_time
            .map_or_else(Cancellation::new, |secs| {
                Cancellation::with_timeout(Duration::from_secs(secs))
            });
        let rendered = DocumentRenderer::new(render_options(&config))
            .with_cancellation(cancellation)
            .render(client.list_blocks(&document_id), &client)?;

        self.flags.emit(&rendered, &document_id, &config, &output)
    }
}
