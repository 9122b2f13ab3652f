//! The conversation worker: sole owner of the session state.
//!
//! Jobs are handled one at a time, so mood and reply counters never race.

use crate::commands::text;
use crate::logger::LogTail;
use crate::transport::{send_chunks, send_long, Transport};
use memory::UserRegistry;
use persona::chance::{choose, Chance, Slot};
use persona::{ConversationState, Inbound, Responder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const STATUS_LOG_LINES: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Job {
    /// Plain text for the persona pipeline.
    Text { chat: i64, message: Inbound },
    /// `/start` from `user`.
    Start { chat: i64, user: i64 },
    /// Admin `/status` report.
    Status { chat: i64 },
}

pub struct Worker {
    responder: Responder,
    state: ConversationState,
    chance: Box<dyn Chance>,
    registry: UserRegistry,
    transport: Arc<dyn Transport>,
    start_messages: Vec<String>,
    started: Instant,
    logs: Option<LogTail>,
}

impl Worker {
    pub fn new(
        responder: Responder,
        state: ConversationState,
        chance: Box<dyn Chance>,
        registry: UserRegistry,
        transport: Arc<dyn Transport>,
        start_messages: Vec<String>,
    ) -> Self {
        Self {
            responder,
            state,
            chance,
            registry,
            transport,
            start_messages,
            started: Instant::now(),
            logs: None,
        }
    }

    pub fn with_logs(mut self, logs: LogTail) -> Self {
        self.logs = Some(logs);
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Drain `jobs` until every sender is dropped.
    pub async fn run(mut self, mut jobs: mpsc::Receiver<Job>) {
        while let Some(job) = jobs.recv().await {
            self.handle(job).await;
        }
        log::info!("conversation worker stopped");
    }

    pub async fn handle(&mut self, job: Job) {
        match job {
            Job::Text { chat, message } => self.reply(chat, message).await,
            Job::Start { chat, user } => self.start(chat, user).await,
            Job::Status { chat } => {
                let report = self.status_report();
                if let Err(e) = send_long(self.transport.as_ref(), chat, &report).await {
                    log::error!("failed to send status to {chat}: {e}");
                }
            }
        }
    }

    async fn reply(&mut self, chat: i64, message: Inbound) {
        log::debug!("message from {}: {}", message.author_id, message.body);
        let reply = self
            .responder
            .respond(&mut self.state, self.chance.as_mut(), &message.body)
            .await;
        log::info!("reply to {chat}: {:?}, {} part(s)", reply.kind, reply.chunks.len());
        if let Err(e) = send_chunks(self.transport.as_ref(), chat, &reply.chunks).await {
            log::error!("failed to reply in {chat}: {e}");
        }
    }

    async fn start(&mut self, chat: i64, user: i64) {
        // The registry decides first contact; state only mirrors what was saved.
        let first_time = match self.registry.register(user).await {
            Ok(new) => {
                self.state.register_user(user);
                new
            }
            Err(e) => {
                log::error!("could not persist user {user}: {e}");
                true
            }
        };

        let result = if first_time {
            send_long(self.transport.as_ref(), chat, text::WELCOME).await
        } else {
            match choose(self.chance.as_mut(), Slot::CannedReply, &self.start_messages) {
                Some(line) => self.transport.send_text(chat, line).await,
                None => Ok(()),
            }
        };
        if let Err(e) = result {
            log::error!("failed to greet {user}: {e}");
        }
    }

    fn status_report(&self) -> String {
        let mut report = format!(
            "🧠 Bot status:\n• Uptime: {}\n• Users: {}\n• Replies sent: {}",
            format_uptime(self.started.elapsed()),
            self.state.user_count(),
            self.state.reply_count()
        );
        if let Some(logs) = &self.logs {
            let lines = logs.tail(STATUS_LOG_LINES);
            if !lines.is_empty() {
                report.push_str("\n\n📝 Recent logs:\n");
                report.push_str(&lines.join("\n"));
            }
        }
        report
    }
}

/// `hh:mm:ss`, hours unbounded.
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_zero_padded() {
        assert_eq!(format_uptime(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_uptime(Duration::from_secs(3_725)), "01:02:05");
        assert_eq!(format_uptime(Duration::from_secs(360_000)), "100:00:00");
    }
}
