use crate::telegram::{TelegramClient, TelegramError};
use async_trait::async_trait;
use persona::{split_message, TELEGRAM_LIMIT};
use std::sync::Mutex;

/// Outbound side of the bot.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, chat: i64, text: &str) -> Result<(), TelegramError>;
    async fn send_photo(&self, chat: i64, file_id: &str, caption: &str)
        -> Result<(), TelegramError>;
}

#[async_trait]
impl Transport for TelegramClient {
    async fn send_text(&self, chat: i64, text: &str) -> Result<(), TelegramError> {
        self.send_message(chat, text).await.map(|_| ())
    }

    async fn send_photo(
        &self,
        chat: i64,
        file_id: &str,
        caption: &str,
    ) -> Result<(), TelegramError> {
        TelegramClient::send_photo(self, chat, file_id, caption)
            .await
            .map(|_| ())
    }
}

/// Send already split `chunks` in order. A rejected chunk is logged and the
/// rest still go out; the first error is returned at the end.
pub async fn send_chunks(
    transport: &dyn Transport,
    chat: i64,
    chunks: &[String],
) -> Result<(), TelegramError> {
    let mut first_error = None;
    for (i, chunk) in chunks.iter().enumerate() {
        if let Err(e) = transport.send_text(chat, chunk).await {
            log::warn!("chunk {}/{} to {chat} failed: {e}", i + 1, chunks.len());
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// Split `text` to the Telegram limit and send every part.
pub async fn send_long(transport: &dyn Transport, chat: i64, text: &str) -> Result<(), TelegramError> {
    send_chunks(transport, chat, &split_message(text, TELEGRAM_LIMIT)).await
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Text { chat: i64, text: String },
    Photo { chat: i64, file_id: String, caption: String },
}

/// In-memory [`Transport`] that records every send, for tests.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Texts sent so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                Sent::Photo { .. } => None,
            })
            .collect()
    }

    fn record(&self, item: Sent) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(item);
        }
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, chat: i64, text: &str) -> Result<(), TelegramError> {
        self.record(Sent::Text {
            chat,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: i64,
        file_id: &str,
        caption: &str,
    ) -> Result<(), TelegramError> {
        self.record(Sent::Photo {
            chat,
            file_id: file_id.to_string(),
            caption: caption.to_string(),
        });
        Ok(())
    }
}
