//! Lark/Feishu integration for larkdown.
//!
//! - [`LarkClient`]: Open API client (tenant token auth, paginated block
//!   listing, media download and temporary URLs, wiki node lookup). It
//!   implements [`MediaResolver`](larkdown_renderer::MediaResolver) and its
//!   [`BlockPages`] iterator is a [`BlockSource`](larkdown_renderer::BlockSource).
//! - [`JsonDumpSource`]: offline block source over a saved block listing.
//! - [`types`]: wire types and their conversion into renderer blocks.

mod client;
mod document;
mod dump;
mod error;
pub mod types;

pub use client::{BlockPages, DEFAULT_TIMEOUT, LarkClient, MediaFile};
pub use document::{DocumentRef, document_id_from_input};
pub use dump::JsonDumpSource;
pub use error::LarkError;
