//! Advertising platforms and content categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdsyncError;

/// A platform an ad can be synchronized to.
///
/// Ordering follows declaration order, which keeps platform sets and limit
/// tables iterating deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Meta,
    Linkedin,
    Tiktok,
}

impl Platform {
    /// Every supported platform, in canonical order.
    pub const ALL: [Platform; 4] = [
        Platform::Google,
        Platform::Meta,
        Platform::Linkedin,
        Platform::Tiktok,
    ];

    /// The lowercase wire name (e.g. `"linkedin"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Google => "google",
            Platform::Meta => "meta",
            Platform::Linkedin => "linkedin",
            Platform::Tiktok => "tiktok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = AdsyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Platform::Google),
            "meta" | "facebook" => Ok(Platform::Meta),
            "linkedin" => Ok(Platform::Linkedin),
            "tiktok" => Ok(Platform::Tiktok),
            other => Err(AdsyncError::ConfigError {
                reason: format!("unknown platform '{other}'"),
            }),
        }
    }
}

/// The content category an ad type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    /// Paid placements bought through the platform's ads product.
    Paid,
    /// Unpaid posts published to an owned page or profile.
    Organic,
    /// Organic posts boosted with paid distribution.
    Promoted,
}
