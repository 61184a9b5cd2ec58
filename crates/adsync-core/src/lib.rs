//! # adsync-core
//!
//! The deterministic sync-classification engine for ADSYNC.
//!
//! This crate provides:
//! - The trait seams (`AdTypeSource`, `FieldChecker`) the builder depends on
//! - The `PlatformConstraintResolver` (most restrictive limit across platforms)
//! - Fallback truncation policies
//! - `EngineConfig`, loaded from TOML
//! - The `SyncPreviewBuilder` that wires them together per ad
//! - Input fingerprinting for callers that memoize previews
//!
//! ## Usage
//!
//! ```rust,ignore
//! use adsync_core::{EngineConfig, SyncPreviewBuilder};
//!
//! let builder = SyncPreviewBuilder::new(Box::new(registry), Box::new(validator), EngineConfig::default());
//! let preview = builder.build(&request);
//! ```

pub mod builder;
pub mod config;
pub mod constraints;
pub mod fallback;
pub mod fingerprint;
pub mod traits;

pub use builder::{ClassifiedAd, SyncPreviewBuilder};
pub use config::{EngineConfig, SyncFieldSpec};
pub use constraints::{FieldLimit, LimitTable, PlatformConstraintResolver};
pub use fingerprint::{fingerprint, PreviewMemo};
