use std::sync::Arc;

use tokio::sync::mpsc;

use super::NoticeMessage;

/// Sink for user-visible notices. The controller only ever fires and
/// forgets into it; whoever owns the receiving end decides how to show
/// the message.
#[async_trait::async_trait]
pub trait Notifier {
    async fn notify(
        &self,
        message: NoticeMessage,
    ) -> Result<(), mpsc::error::SendError<NoticeMessage>>;
}

#[async_trait::async_trait]
impl Notifier for mpsc::Sender<NoticeMessage> {
    async fn notify(
        &self,
        message: NoticeMessage,
    ) -> Result<(), mpsc::error::SendError<NoticeMessage>> {
        self.send(message).await
    }
}

#[async_trait::async_trait]
impl Notifier for mpsc::UnboundedSender<NoticeMessage> {
    async fn notify(
        &self,
        message: NoticeMessage,
    ) -> Result<(), mpsc::error::SendError<NoticeMessage>> {
        self.send(message)
    }
}

pub type ArcNotifier = Arc<dyn Notifier + Send + Sync>;

#[cfg(test)]
#[path = "notifier_test.rs"]
mod tests;
