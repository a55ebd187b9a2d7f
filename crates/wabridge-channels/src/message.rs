//! Outbound message seam

use crate::error::Result;

/// Delivers plain text to a recipient on a messaging platform.
///
/// Implemented by [`crate::WhatsAppBusinessAdapter`]; relays depend on this
/// trait so the platform can be swapped out in tests.
#[async_trait::async_trait]
pub trait TextSender: Send + Sync {
    /// Platform name (for logging)
    fn name(&self) -> &str;

    /// Send `body` to `to`. The platform's response body is not inspected;
    /// only transport failures and non-success statuses are errors.
    async fn send_text(&self, to: &str, body: &str) -> Result<()>;
}
