//! Trait seams between the sync-preview builder and its collaborators.
//!
//! - `AdTypeSource`: the ad type registry (looked up by platform + id)
//! - `FieldChecker`: the type-aware field validator
//!
//! The builder owns boxed implementations of both and never reaches past
//! them, so each can be swapped for a mock in tests.

use std::sync::Arc;

use adsync_contracts::{
    ad::{AdInstance, FieldValue},
    ad_type::AdTypeDefinition,
    field::FieldDefinition,
    platform::Platform,
    validation::{AdReport, FieldViolation},
};

/// Read access to registered ad type definitions.
pub trait AdTypeSource: Send + Sync {
    /// Look up a definition by its composite key.
    fn get(&self, platform: Platform, id: &str) -> Option<&AdTypeDefinition>;
}

impl<T: AdTypeSource + ?Sized> AdTypeSource for Arc<T> {
    fn get(&self, platform: Platform, id: &str) -> Option<&AdTypeDefinition> {
        (**self).get(platform, id)
    }
}

/// Type-aware constraint checking for single fields and whole ads.
///
/// Implementations must be pure: the same inputs always yield the same
/// violations in the same order.
pub trait FieldChecker: Send + Sync {
    /// Check one value against one definition. `None` means absent.
    fn check_field(&self, definition: &FieldDefinition, value: Option<&FieldValue>)
        -> Vec<FieldViolation>;

    /// Check a value whose placeholders were already substituted. No check
    /// is deferred for braces left in the text.
    fn check_resolved(
        &self,
        definition: &FieldDefinition,
        value: Option<&FieldValue>,
    ) -> Vec<FieldViolation>;

    /// Check every field of `ad` against `definition`, then its cross-field
    /// rules.
    fn check_ad(&self, definition: &AdTypeDefinition, ad: &AdInstance) -> AdReport;

    /// `check_ad` for an ad whose fields are all resolved.
    fn check_resolved_ad(&self, definition: &AdTypeDefinition, ad: &AdInstance) -> AdReport;
}
