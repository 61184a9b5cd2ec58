//! Input fingerprinting and single-entry preview memoization.
//!
//! The builder is a pure function of its request, so callers that rebuild a
//! preview on every keystroke can skip the work whenever the fingerprint is
//! unchanged.
//!
//! Hash input layout (each part prefixed with its byte length as 8-byte
//! big-endian, in order):
//!   1. campaign_set_id as UTF-8 bytes
//!   2. canonical JSON of the hierarchy
//!   3. canonical JSON of the sample rows
//!   4. canonical JSON of the columns
//!   5. sorted, de-duplicated platform wire names joined by `,`

use std::collections::BTreeSet;

use sha2::{Digest, Sha256};
use tracing::debug;

use adsync_contracts::{preview::SyncPreview, request::PreviewRequest};

use crate::builder::SyncPreviewBuilder;

fn feed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_be_bytes());
    hasher.update(bytes);
}

/// Lowercase 64-character hex SHA-256 of everything a preview depends on.
///
/// Platform order and duplicates do not change the fingerprint.
///
/// # Panics
///
/// Panics if part of the request cannot be serialized to JSON, which cannot
/// happen for the string-keyed contract types.
pub fn fingerprint(request: &PreviewRequest) -> String {
    let hierarchy = serde_json::to_vec(&request.hierarchy)
        .expect("HierarchyConfig must always be serializable to JSON");
    let rows = serde_json::to_vec(&request.sample_rows)
        .expect("sample rows must always be serializable to JSON");
    let columns = serde_json::to_vec(&request.columns)
        .expect("DataSourceColumn must always be serializable to JSON");
    let platforms = request
        .platforms
        .iter()
        .map(|p| p.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(",");

    let mut hasher = Sha256::new();
    feed(&mut hasher, request.campaign_set_id.as_bytes());
    feed(&mut hasher, &hierarchy);
    feed(&mut hasher, &rows);
    feed(&mut hasher, &columns);
    feed(&mut hasher, platforms.as_bytes());

    hex::encode(hasher.finalize())
}

/// Remembers the most recent preview and its input fingerprint.
#[derive(Debug, Default)]
pub struct PreviewMemo {
    last: Option<(String, SyncPreview)>,
    hits: u64,
}

impl PreviewMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached preview when `request` is unchanged, otherwise
    /// build and cache a fresh one.
    pub fn get_or_build(
        &mut self,
        builder: &SyncPreviewBuilder,
        request: &PreviewRequest,
    ) -> &SyncPreview {
        let key = fingerprint(request);
        let entry = match self.last.take() {
            Some((cached, preview)) if cached == key => {
                self.hits += 1;
                debug!(fingerprint = %key, "preview memo hit");
                (cached, preview)
            }
            _ => (key, builder.build(request)),
        };
        &self.last.insert(entry).1
    }

    /// Number of calls answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
