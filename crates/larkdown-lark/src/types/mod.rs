//! Lark Open API wire types.

mod block;
mod response;

pub use block::{
    RawBlock, RawCallout, RawElement, RawEquation, RawImage, RawLink, RawMentionDoc,
    RawMentionUser, RawTable, RawTableProperty, RawText, RawTextRun, RawTextStyle,
    TextElementStyle,
};
pub use response::{
    Envelope, ListBlocksData, TenantTokenRequest, TenantTokenResponse, TmpDownloadUrl,
    TmpDownloadUrlsData, WikiNode, WikiNodeData,
};
