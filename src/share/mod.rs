//! Share and clipboard fallbacks.
//!
//! Native share is tried first when the host offers it, then the clipboard. Failures
//! never propagate: they become a [`ShareOutcome`] the view can show.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::AppError;

/// What is being shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// The host's native share dialog.
#[async_trait]
pub trait NativeShare: Send + Sync {
    async fn share(&self, payload: &SharePayload) -> Result<(), AppError>;
}

/// The host's clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ShareOutcome {
    Shared,
    /// The share dialog was dismissed or failed
    Cancelled,
    Copied,
    Failed { message: String },
}

/// Share through the native dialog if present, otherwise copy the link.
pub async fn share_or_copy(
    native: Option<&dyn NativeShare>,
    clipboard: &dyn Clipboard,
    payload: &SharePayload,
) -> ShareOutcome {
    if let Some(native) = native {
        return match native.share(payload).await {
            Ok(()) => ShareOutcome::Shared,
            Err(e) => {
                tracing::debug!("Share cancelled: {}", e);
                ShareOutcome::Cancelled
            }
        };
    }

    copy_text(clipboard, &payload.url).await
}

/// Copy text to the clipboard.
pub async fn copy_text(clipboard: &dyn Clipboard, text: &str) -> ShareOutcome {
    match clipboard.write_text(text).await {
        Ok(()) => ShareOutcome::Copied,
        Err(e) => {
            tracing::error!("Failed to copy to clipboard: {}", e);
            ShareOutcome::Failed {
                message: "Failed to copy link".to_string(),
            }
        }
    }
}

/// Clipboard of a headless host: the last copied text, readable by the presentation layer.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: RwLock<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contents(&self) -> Option<String> {
        self.contents.read().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), AppError> {
        *self.contents.write().await = Some(text.to_string());
        Ok(())
    }
}
