//! Pending logo for a DJ draft.
//!
//! A logo is either an embedded image (read from a local file into a
//! `data:` URI) or an external URL. Only one representation is pending at
//! a time. File reads complete asynchronously, so each read is issued a
//! [`LogoTicket`]; completing with a ticket that is no longer current is
//! a no-op, which lets the newest selection win.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogoInputMode {
    #[default]
    File,
    Url,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogoSource {
    Embedded(String),
    Url(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogoTicket(u64);

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, Default)]
pub struct LogoSlot {
    mode: LogoInputMode,
    pending: Option<String>,
    url_text: String,
    in_flight: Option<LogoTicket>,
}

impl LogoSlot {
    pub fn mode(&self) -> LogoInputMode {
        self.mode
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn url_text(&self) -> &str {
        &self.url_text
    }

    /// Switches between file and URL input, dropping whatever was pending.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LogoInputMode::File => LogoInputMode::Url,
            LogoInputMode::Url => LogoInputMode::File,
        };
        self.clear();
    }

    pub fn set(&mut self, source: LogoSource) {
        match source {
            LogoSource::Embedded(data_uri) => {
                self.switch_to(LogoInputMode::File);
                self.in_flight = None;
                self.pending = non_empty(data_uri);
            }
            LogoSource::Url(url) => self.set_url(url),
        }
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.switch_to(LogoInputMode::Url);
        self.in_flight = None;
        self.url_text = url.into();
        self.pending = non_empty(self.url_text.clone());
    }

    pub fn begin_read(&mut self) -> LogoTicket {
        self.switch_to(LogoInputMode::File);
        let ticket = LogoTicket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        self.in_flight = Some(ticket);
        ticket
    }

    /// Applies a finished file read. Returns whether it became the pending
    /// logo.
    pub fn finish_read<E: std::fmt::Display>(
        &mut self,
        ticket: LogoTicket,
        result: Result<String, E>,
    ) -> bool {
        if self.in_flight != Some(ticket) || self.mode != LogoInputMode::File {
            debug!("dropping stale logo read {}", ticket.0);
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(data_uri) => {
                self.pending = non_empty(data_uri);
                self.pending.is_some()
            }
            Err(err) => {
                warn!("logo read failed: {err}");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.url_text.clear();
        self.in_flight = None;
    }

    fn switch_to(&mut self, mode: LogoInputMode) {
        if self.mode != mode {
            self.mode = mode;
            self.clear();
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub async fn read_logo_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    debug!("read {} logo bytes from {:?}", bytes.len(), path);
    Ok(encode_data_uri(mime_for(path), &bytes))
}
