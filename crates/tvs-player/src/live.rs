//! Live-stream detection by scanning a channel page for the "LIVE NOW" badge.
//!
//! Stateless: every probe fetches the page again. Not part of selection.

use tracing::{debug, error};

/// Byte sequence present in a channel's `/live` page while it is streaming.
pub const LIVE_MARKER: &str = r#""liveBadgeRenderer":{"label":{"simpleText":"LIVE NOW"}}"#;

/// Incremental substring search that survives chunk boundaries.
#[derive(Debug)]
pub struct MarkerScanner {
    marker: Vec<u8>,
    tail: Vec<u8>,
    found: bool,
}

impl MarkerScanner {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.as_bytes().to_vec(),
            tail: Vec::new(),
            found: false,
        }
    }

    pub fn found(&self) -> bool {
        self.found
    }

    /// Feed the next chunk; returns `true` once the marker has been seen.
    pub fn feed(&mut self, chunk: &[u8]) -> bool {
        if self.found || self.marker.is_empty() {
            self.found = true;
            return true;
        }

        let mut window = std::mem::take(&mut self.tail);
        window.extend_from_slice(chunk);
        if window
            .windows(self.marker.len())
            .any(|w| w == self.marker.as_slice())
        {
            self.found = true;
            return true;
        }

        // Keep just enough to match a marker split across chunks.
        let keep = (self.marker.len() - 1).min(window.len());
        self.tail = window.split_off(window.len() - keep);
        false
    }
}

/// Fetch `url` and report whether its body contains [`LIVE_MARKER`].
///
/// Any HTTP or transport failure is logged and reported as not live.
pub async fn is_livestreaming(client: &reqwest::Client, url: &str) -> bool {
    debug!(url, "Checking for livestream");
    let mut response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Failed to check for livestream: {e}");
            return false;
        }
    };

    let mut scanner = MarkerScanner::new(LIVE_MARKER);
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                if scanner.feed(&chunk) {
                    return true;
                }
            }
            Ok(None) => return false,
            Err(e) => {
                error!("Failed to check for livestream: {e}");
                return false;
            }
        }
    }
}
