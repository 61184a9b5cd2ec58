//! # adsync-registry
//!
//! Ad type definitions keyed by (platform, ad type id), plus the built-in
//! catalogue for Google, Meta, LinkedIn, and TikTok.
//!
//! `AdTypeRegistry` implements `adsync_core::traits::AdTypeSource`, so it can
//! be boxed straight into a `SyncPreviewBuilder`.
//!
//! ```rust,ignore
//! use adsync_registry::AdTypeRegistry;
//!
//! let registry = AdTypeRegistry::with_builtins();
//! let rsa = registry.get(Platform::Google, "responsive_search");
//! ```

pub mod catalog;
pub mod registry;

pub use registry::AdTypeRegistry;
