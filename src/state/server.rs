//! Server catalog entry types.

use serde::{Deserialize, Serialize};

/// Coarse congestion indicator for a server.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadTier {
    /// Lightly loaded.
    Low,
    /// Moderately loaded.
    Medium,
    /// Congested.
    High,
}

impl LoadTier {
    /// User-facing quality label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Excellent",
            Self::Medium => "Good",
            Self::High => "Busy",
        }
    }

    /// Number of signal bars (out of 3) shown for this tier.
    #[must_use]
    pub const fn bars(self) -> u8 {
        match self {
            Self::Low => 3,
            Self::Medium => 2,
            Self::High => 1,
        }
    }
}

impl std::fmt::Display for LoadTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadTier::Low => write!(f, "low"),
            LoadTier::Medium => write!(f, "medium"),
            LoadTier::High => write!(f, "high"),
        }
    }
}

/// A candidate VPN endpoint.
///
/// Catalog entries are built once at startup and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Country name.
    pub country: String,
    /// City name.
    pub city: String,
    /// Flag emoji.
    pub flag: String,
    /// Advertised latency in milliseconds.
    pub latency_ms: u32,
    /// Load tier.
    pub load: LoadTier,
    /// Whether the server is part of the premium tier.
    pub premium: bool,
}

impl ServerDescriptor {
    /// "City, Country" location string.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_labels() {
        assert_eq!(LoadTier::Low.label(), "Excellent");
        assert_eq!(LoadTier::Medium.label(), "Good");
        assert_eq!(LoadTier::High.label(), "Busy");
        assert_eq!(LoadTier::High.bars(), 1);
    }

    #[test]
    fn test_load_serializes_lowercase() {
        let json = serde_json::to_string(&LoadTier::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
