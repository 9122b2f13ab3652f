use crate::commands::{self, list_count, removal_ids, text, Command};
use crate::telegram::{Message, Update};
use crate::transport::{send_long, Transport};
use crate::worker::Job;
use crate::TelegramError;
use memory::ImageStore;
use persona::chance::{choose, Chance, Slot};
use persona::Inbound;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Telegram's per-chat flood limit makes bulk photo sends fail without a gap.
pub const FLOOD_PAUSE: Duration = Duration::from_secs(1);

/// Routes updates: commands and media are handled here, conversation text
/// is queued for the worker.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    images: ImageStore,
    admins: HashSet<i64>,
    jobs: mpsc::Sender<Job>,
    chance: Box<dyn Chance>,
    flood_pause: Duration,
}

impl Dispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        images: ImageStore,
        admins: HashSet<i64>,
        jobs: mpsc::Sender<Job>,
        chance: Box<dyn Chance>,
    ) -> Self {
        Self {
            transport,
            images,
            admins,
            jobs,
            chance,
            flood_pause: FLOOD_PAUSE,
        }
    }

    pub fn with_flood_pause(mut self, pause: Duration) -> Self {
        self.flood_pause = pause;
        self
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub async fn dispatch(&mut self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let chat = message.chat.id;
        if let Err(e) = self.route(message).await {
            log::error!("handling update {} in {chat} failed: {e}", update.update_id);
        }
    }

    async fn route(&mut self, message: Message) -> Result<(), TelegramError> {
        let chat = message.chat.id;
        let user = message.author_id();

        if let Some(photos) = &message.photo {
            if let Some(largest) = photos.iter().max_by_key(|p| u64::from(p.width) * u64::from(p.height)) {
                self.store_image(&largest.file_id).await;
            }
            return Ok(());
        }
        if let Some(doc) = &message.document {
            if doc
                .mime_type
                .as_deref()
                .is_some_and(|m| m.starts_with("image/"))
            {
                self.store_image(&doc.file_id).await;
            }
            return Ok(());
        }

        let Some(body) = message.text else {
            return Ok(());
        };
        match Command::parse(&body) {
            Some((command, args)) => self.command(chat, user, command, args).await,
            None => {
                self.enqueue(
                    chat,
                    Job::Text {
                        chat,
                        message: Inbound::new(body, user),
                    },
                )
                .await
            }
        }
    }

    async fn command(
        &mut self,
        chat: i64,
        user: i64,
        command: Command,
        args: &str,
    ) -> Result<(), TelegramError> {
        if command.admin_only() && !self.admins.contains(&user) {
            log::warn!("user {user} tried admin command {command:?}");
            return self.transport.send_text(chat, text::ACCESS_DENIED).await;
        }
        match command {
            Command::Start => self.enqueue(chat, Job::Start { chat, user }).await,
            Command::Status => self.enqueue(chat, Job::Status { chat }).await,
            Command::Help => send_long(self.transport.as_ref(), chat, text::HELP).await,
            Command::OwnHelp => send_long(self.transport.as_ref(), chat, text::OWN_HELP).await,
            Command::Ping => self.transport.send_text(chat, text::PONG).await,
            Command::RandomArt => self.random_art(chat).await,
            Command::ListImages => self.list_images(chat, list_count(args)).await,
            Command::RemoveImage => self.remove_images(chat, args).await,
            Command::ArtCount => {
                let reply = match self.images.count() {
                    0 => text::GALLERY_EMPTY.to_string(),
                    n => format!("📂 {n} pictures in the collection."),
                };
                self.transport.send_text(chat, &reply).await
            }
            Command::Unknown(name) => {
                log::info!("unknown command /{name} from {user}");
                match choose(self.chance.as_mut(), Slot::CannedReply, commands::text::UNKNOWN) {
                    Some(line) => self.transport.send_text(chat, line).await,
                    None => Ok(()),
                }
            }
        }
    }

    async fn random_art(&mut self, chat: i64) -> Result<(), TelegramError> {
        let chance = self.chance.as_mut();
        let picked = self
            .images
            .random(|len| chance.pick(Slot::CannedReply, len))
            .map(str::to_string);
        match picked {
            Some(file_id) => {
                self.transport
                    .send_photo(chat, &file_id, text::RANDOM_ART_CAPTION)
                    .await?;
                log::info!("sent random art {file_id}");
                Ok(())
            }
            None => self.transport.send_text(chat, text::RANDOM_ART_EMPTY).await,
        }
    }

    async fn list_images(&mut self, chat: i64, count: usize) -> Result<(), TelegramError> {
        let latest: Vec<String> = self
            .images
            .latest(count)
            .into_iter()
            .map(str::to_string)
            .collect();
        if latest.is_empty() {
            return self.transport.send_text(chat, text::GALLERY_EMPTY).await;
        }
        self.transport
            .send_text(chat, &format!("📂 Showing the last {} pictures:", latest.len()))
            .await?;
        for file_id in latest {
            if let Err(e) = self.transport.send_photo(chat, &file_id, &file_id).await {
                log::warn!("could not send {file_id}: {e}");
                self.transport
                    .send_text(chat, &format!("⚠️ Failed to send {file_id}: {e}"))
                    .await?;
            }
            tokio::time::sleep(self.flood_pause).await;
        }
        Ok(())
    }

    async fn remove_images(&mut self, chat: i64, args: &str) -> Result<(), TelegramError> {
        let ids = removal_ids(args);
        if ids.is_empty() {
            return self.transport.send_text(chat, text::REMOVE_USAGE).await;
        }
        let (removed, missing) = match self.images.remove_many(ids).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("image store update failed: {e}");
                return self
                    .transport
                    .send_text(chat, &format!("⚠️ Could not update the collection: {e}"))
                    .await;
            }
        };
        let mut lines = Vec::new();
        if !removed.is_empty() {
            lines.push(format!("✅ Removed: {} pictures", removed.len()));
        }
        if !missing.is_empty() {
            lines.push(format!("⚠️ Not found: {} pictures", missing.len()));
        }
        let reply = if lines.is_empty() {
            text::NOTHING_REMOVED.to_string()
        } else {
            lines.join("\n")
        };
        self.transport.send_text(chat, &reply).await
    }

    async fn store_image(&mut self, file_id: &str) {
        if let Err(e) = self.images.add(file_id).await {
            log::error!("could not store image {file_id}: {e}");
        }
    }

    /// Hand `job` to the worker without waiting; a full queue drops it.
    async fn enqueue(&self, chat: i64, job: Job) -> Result<(), TelegramError> {
        match self.jobs.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(job)) => {
                log::warn!("conversation queue is full, dropping {job:?}");
                self.transport.send_text(chat, text::BUSY).await
            }
            Err(TrySendError::Closed(job)) => {
                log::error!("conversation worker is gone, dropping {job:?}");
                Ok(())
            }
        }
    }
}
