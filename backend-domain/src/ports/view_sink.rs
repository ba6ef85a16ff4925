use async_trait::async_trait;

/// Write half of a live streaming connection.
///
/// The subscription hub owns every registered sink; the transport keeps the
/// read half for liveness detection.
#[async_trait]
pub trait ViewSink: Send {
    /// Sends one text frame. An error means the connection is unusable.
    async fn send_text(&mut self, payload: String) -> anyhow::Result<()>;

    async fn close(&mut self);
}
