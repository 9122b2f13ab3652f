use crate::dispatcher::Dispatcher;
use crate::telegram::{TelegramClient, TelegramError, Update};
use std::sync::Arc;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Long-polling loop over `getUpdates`.
pub struct Poller {
    client: Arc<TelegramClient>,
    offset: Option<i64>,
    timeout: u64,
}

impl Poller {
    pub fn new(client: Arc<TelegramClient>, timeout: u64) -> Self {
        Self {
            client,
            offset: None,
            timeout,
        }
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Acknowledge everything queued while the bot was offline.
    pub async fn skip_backlog(&mut self) -> Result<usize, TelegramError> {
        let pending = self.client.get_updates(Some(-1), 0).await?;
        if let Some(last) = pending.last() {
            self.offset = Some(last.update_id + 1);
            log::info!("skipped pending updates up to {}", last.update_id);
        }
        Ok(pending.len())
    }

    /// Fetch the next batch and advance the offset past it.
    pub async fn next_batch(&mut self) -> Result<Vec<Update>, TelegramError> {
        let updates = self.client.get_updates(self.offset, self.timeout).await?;
        if let Some(max) = updates.iter().map(|u| u.update_id).max() {
            self.offset = Some(max + 1);
        }
        Ok(updates)
    }

    /// Poll forever, handing each update to `dispatcher`.
    pub async fn run(&mut self, dispatcher: &mut Dispatcher) {
        loop {
            match self.next_batch().await {
                Ok(updates) => {
                    for update in updates {
                        dispatcher.dispatch(update).await;
                    }
                }
                Err(e) => {
                    log::error!("getUpdates failed: {e}");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
    }
}
