use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Outbound message capability of the chat transport.
///
/// Failures are per-recipient; callers that broadcast catch them
/// individually and keep going.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, recipient_id: i64, text: &str) -> Result<()>;
}

/// Logs outgoing messages instead of delivering them. Used when the service
/// runs without a chat transport attached.
pub struct LogSender;

#[async_trait]
impl Sender for LogSender {
    async fn send(&self, recipient_id: i64, text: &str) -> Result<()> {
        info!("Message to {}: {}", recipient_id, text);
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use anyhow::{bail, Result};
    use async_trait::async_trait;

    use super::Sender;

    /// Records every send; fails for the configured recipients.
    #[derive(Default)]
    pub struct RecordingSender {
        pub sent: Mutex<Vec<(i64, String)>>,
        pub fail_for: HashSet<i64>,
    }

    impl RecordingSender {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_for(ids: impl IntoIterator<Item = i64>) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: ids.into_iter().collect(),
            }
        }

        pub fn sent_to(&self) -> Vec<i64> {
            self.sent.lock().unwrap().iter().map(|(id, _)| *id).collect()
        }
    }

    #[async_trait]
    impl Sender for RecordingSender {
        async fn send(&self, recipient_id: i64, text: &str) -> Result<()> {
            if self.fail_for.contains(&recipient_id) {
                bail!("recipient {} unreachable", recipient_id);
            }
            self.sent
                .lock()
                .unwrap()
                .push((recipient_id, text.to_string()));
            Ok(())
        }
    }
}
