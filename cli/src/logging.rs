//! Logging initialization. Stdout carries only the generated copy, so logs go to
//! `LOG_FILE`, to stderr with `-v`, or nowhere.
//!
//! - **RUST_LOG**: filter, e.g. `info`, `brandcopy=debug`. Default: `info`.
//! - **LOG_FILE**: append plain-text logs (ANSI stripped) to this file.

use std::io::Write;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::log_format::TextWithSpanIds;

pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper_util=off"));

    if verbose {
        let layer = tracing_subscriber::fmt::layer()
            .event_format(TextWithSpanIds::new().with_timestamp(false))
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).init();
    } else if let Ok(path) = std::env::var("LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let layer = tracing_subscriber::fmt::layer()
            .event_format(TextWithSpanIds::new())
            .with_writer(std::sync::Mutex::new(StripAnsiWriter::new(file)))
            .with_ansi(false)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).init();
        tracing::info!(path = %path, "brandcopy logging to file");
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::sink)
            .with_filter(filter);
        tracing_subscriber::registry().with(layer).init();
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    /// Plain text.
    None,
    /// Saw ESC.
    Start,
    /// Inside `ESC [ ...`, waiting for the final byte.
    Csi,
}

/// Drops ANSI CSI sequences (`ESC [ params final`) from everything written through it.
/// Other escapes are passed through unchanged.
struct StripAnsiWriter<W> {
    inner: W,
    state: Escape,
    pending: Vec<u8>,
}

impl<W: Write> StripAnsiWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            state: Escape::None,
            pending: Vec::with_capacity(16),
        }
    }

    fn flush_pending(&mut self) -> std::io::Result<()> {
        self.inner.write_all(&self.pending)?;
        self.pending.clear();
        self.state = Escape::None;
        Ok(())
    }
}

impl<W: Write> Write for StripAnsiWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut plain_start = 0;
        for (i, &b) in buf.iter().enumerate() {
            match self.state {
                Escape::None => {
                    if b == 0x1b {
                        self.inner.write_all(&buf[plain_start..i])?;
                        self.pending.push(b);
                        self.state = Escape::Start;
                    }
                }
                Escape::Start => {
                    self.pending.push(b);
                    if b == b'[' {
                        self.state = Escape::Csi;
                    } else {
                        self.flush_pending()?;
                        plain_start = i + 1;
                    }
                }
                Escape::Csi => {
                    if (0x40..=0x7e).contains(&b) {
                        self.pending.clear();
                        self.state = Escape::None;
                        plain_start = i + 1;
                    } else if b.is_ascii_digit() || matches!(b, b';' | b':' | b'?') {
                        self.pending.push(b);
                        if self.pending.len() > 64 {
                            self.flush_pending()?;
                            plain_start = i + 1;
                        }
                    } else {
                        self.flush_pending()?;
                        plain_start = i;
                    }
                }
            }
        }
        if self.state == Escape::None && plain_start < buf.len() {
            self.inner.write_all(&buf[plain_start..])?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.pending.is_empty() {
            self.flush_pending()?;
        }
        self.inner.flush()
    }
}
