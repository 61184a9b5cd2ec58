//! # adsync-ref-retail
//!
//! Retail reference runtime for ADSYNC.
//!
//! Three scenarios preview a fictional outdoor-gear catalogue for sync:
//!
//! 1. **Spring Product Launch**: ten Google ads from one template set; one
//!    degrades to a word-boundary truncation, one is skipped for a missing
//!    landing page. The repeat request is served from the preview memo.
//! 2. **One Catalogue, Three Platforms**: Google, Meta, and TikTok at once
//!    under `config/retail.toml`; the tightest limit governs, and two ads are
//!    also checked against their registered ad types.
//! 3. **Broken Feed**: every skip reason a damaged export can produce, an
//!    empty export, and a hand-written ad validated straight against the
//!    registry.
//!
//! All product data is hardcoded in [`mock_data`].

pub mod mock_data;
pub mod scenarios;
