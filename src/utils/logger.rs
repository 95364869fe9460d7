use crate::utils::error::Result;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Dispatch;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Append-only log file. `None` keeps logs on the console only.
    pub log_file: Option<PathBuf>,
    pub console: bool,
    pub verbose: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file: Some(PathBuf::from("error_log.txt")),
            console: true,
            verbose: false,
        }
    }
}

/// Where run logs go. Built once at startup and handed to the orchestrator.
pub struct LogSink {
    dispatch: Dispatch,
    file: Option<Arc<File>>,
}

impl LogSink {
    pub fn new(config: &LogConfig) -> Result<Self> {
        let file = match &config.log_file {
            Some(path) => Some(Arc::new(
                OpenOptions::new().create(true).append(true).open(path)?,
            )),
            None => None,
        };

        let file_layer = file.clone().map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(file)
        });

        let console_layer = config.console.then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_writer(io::stderr)
        });

        let subscriber = tracing_subscriber::registry()
            .with(default_filter(config.verbose))
            .with(file_layer)
            .with(console_layer);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            file,
        })
    }

    /// Sink that writes plain-text lines into a shared buffer.
    pub fn in_memory() -> (Self, MemoryLog) {
        let buffer = MemoryLog::default();
        let writer = buffer.clone();

        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("info"))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(move || writer.clone()),
            );

        let sink = Self {
            dispatch: Dispatch::new(subscriber),
            file: None,
        };
        (sink, buffer)
    }

    pub fn dispatch(&self) -> Dispatch {
        self.dispatch.clone()
    }

    /// Routes logs emitted outside the orchestrator (startup, shutdown) to this sink too.
    pub fn install_global(&self) {
        if tracing::dispatcher::set_global_default(self.dispatch.clone()).is_err() {
            tracing::warn!("A global logger was already installed");
        }
    }

    /// Flushes the log file to disk.
    pub fn finish(self) -> Result<()> {
        if let Some(file) = self.file {
            file.sync_all()?;
        }
        Ok(())
    }
}

// 函式庫與執行檔的 target 都要放行
fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "user_import_etl=debug,user_import=debug,info"
    } else {
        "user_import_etl=info,user_import=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Shared in-memory log buffer.
#[derive(Clone, Default)]
pub struct MemoryLog {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryLog {
    pub fn contents(&self) -> String {
        match self.buffer.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Write for MemoryLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer poisoned"))?;
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
