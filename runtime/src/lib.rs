//! Telegram side of Exi: Bot API client, update dispatch, the single
//! conversation worker, and process settings.

pub mod cli;
pub mod commands;
pub mod dispatcher;
pub mod logger;
pub mod poller;
pub mod telegram;
pub mod transport;
pub mod worker;

pub use cli::{load_admins, Args};
pub use dispatcher::Dispatcher;
pub use logger::LogTail;
pub use poller::Poller;
pub use telegram::{TelegramClient, TelegramError};
pub use transport::{RecordingTransport, Sent, Transport};
pub use worker::{Job, Worker};
