use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const CAPACITY: usize = 100;

/// Handle to the most recent log lines, shown by `/status`.
#[derive(Clone, Default)]
pub struct LogTail {
    buffer: Arc<Mutex<VecDeque<String>>>,
}

struct TeeLogger {
    inner: env_logger::Logger,
    tail: LogTail,
}

impl LogTail {
    /// Install `env_logger` at `level` (still overridable by `RUST_LOG`)
    /// and keep a copy of every emitted line.
    pub fn init(level: LevelFilter) -> Result<Self, SetLoggerError> {
        let inner = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .build();
        let tail = Self::default();
        let max = inner.filter();
        log::set_boxed_logger(Box::new(TeeLogger {
            inner,
            tail: tail.clone(),
        }))?;
        log::set_max_level(max);
        Ok(tail)
    }

    pub fn push(&self, line: String) {
        if let Ok(mut buf) = self.buffer.lock() {
            buf.push_back(line);
            while buf.len() > CAPACITY {
                buf.pop_front();
            }
        }
    }

    /// Last `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> Vec<String> {
        self.buffer
            .lock()
            .map(|buf| buf.iter().skip(buf.len().saturating_sub(n)).cloned().collect())
            .unwrap_or_default()
    }
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.inner.matches(record) {
            self.inner.log(record);
            self.tail
                .push(format!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}
