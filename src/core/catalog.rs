//! Built-in server catalog.

use crate::state::{LoadTier, ServerDescriptor};

/// (id, name, country, city, flag, latency ms, load, premium)
type ServerRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    LoadTier,
    bool,
);

const BUILTIN_SERVERS: [ServerRow; 8] = [
    ("1", "Ultra Fast", "United States", "New York", "🇺🇸", 12, LoadTier::Low, false),
    ("2", "Lightning", "Germany", "Frankfurt", "🇩🇪", 24, LoadTier::Low, false),
    ("3", "Secure Plus", "United Kingdom", "London", "🇬🇧", 18, LoadTier::Medium, true),
    ("4", "Speed Demon", "Japan", "Tokyo", "🇯🇵", 45, LoadTier::Low, false),
    ("5", "Turbo Stream", "Canada", "Toronto", "🇨🇦", 28, LoadTier::Medium, false),
    ("6", "Premium Shield", "Netherlands", "Amsterdam", "🇳🇱", 22, LoadTier::High, true),
    ("7", "Stealth Mode", "Singapore", "Singapore", "🇸🇬", 67, LoadTier::Low, true),
    ("8", "Rocket Speed", "Australia", "Sydney", "🇦🇺", 89, LoadTier::Medium, false),
];

/// Ordered, immutable set of servers available for selection.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    servers: Vec<ServerDescriptor>,
}

impl Catalog {
    /// Catalog over an explicit server list, kept in the given order.
    #[must_use]
    pub fn new(servers: Vec<ServerDescriptor>) -> Self {
        Self { servers }
    }

    /// The built-in eight-server catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let servers = BUILTIN_SERVERS
            .iter()
            .map(
                |&(id, name, country, city, flag, latency_ms, load, premium)| ServerDescriptor {
                    id: id.to_string(),
                    name: name.to_string(),
                    country: country.to_string(),
                    city: city.to_string(),
                    flag: flag.to_string(),
                    latency_ms,
                    load,
                    premium,
                },
            )
            .collect();
        Self { servers }
    }

    /// All servers in declared order.
    #[must_use]
    pub fn servers(&self) -> &[ServerDescriptor] {
        &self.servers
    }

    /// Number of servers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    /// Whether the catalog has no servers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Look up a server by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ServerDescriptor> {
        self.servers.iter().find(|s| s.id == id)
    }

    /// Servers whose name, city or country contains `term`, ignoring case.
    ///
    /// An empty term matches everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&ServerDescriptor> {
        let needle = term.trim().to_lowercase();
        self.servers
            .iter()
            .filter(|s| {
                needle.is_empty()
                    || s.name.to_lowercase().contains(&needle)
                    || s.city.to_lowercase().contains(&needle)
                    || s.country.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
