//! Best-server selection policy.

use crate::error::{Error, Result};
use crate::state::{LoadTier, ServerDescriptor};

/// Pick the lowest-latency server among those with low load.
///
/// Ties go to the earliest entry. When no server has low load the first entry
/// is returned.
///
/// # Errors
///
/// Returns [`Error::EmptyCatalog`] if `servers` is empty.
pub fn best_server(servers: &[ServerDescriptor]) -> Result<&ServerDescriptor> {
    let first = servers.first().ok_or(Error::EmptyCatalog)?;

    // min_by_key keeps the first of equal minima
    Ok(servers
        .iter()
        .filter(|s| s.load == LoadTier::Low)
        .min_by_key(|s| s.latency_ms)
        .unwrap_or(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Catalog;

    fn server(id: &str, latency_ms: u32, load: LoadTier) -> ServerDescriptor {
        ServerDescriptor {
            id: id.to_string(),
            name: format!("srv-{id}"),
            country: "Country".to_string(),
            city: "City".to_string(),
            flag: String::new(),
            latency_ms,
            load,
            premium: false,
        }
    }

    #[test]
    fn test_lowest_latency_low_load_wins() {
        let servers = vec![
            server("1", 50, LoadTier::Low),
            server("2", 20, LoadTier::Low),
            server("3", 5, LoadTier::High),
        ];
        assert_eq!(best_server(&servers).unwrap().id, "2");
    }

    #[test]
    fn test_ties_go_to_first() {
        let servers = vec![
            server("a", 30, LoadTier::Medium),
            server("b", 15, LoadTier::Low),
            server("c", 15, LoadTier::Low),
        ];
        assert_eq!(best_server(&servers).unwrap().id, "b");
    }

    #[test]
    fn test_fallback_to_first_without_low_load() {
        let servers = vec![
            server("x", 90, LoadTier::High),
            server("y", 10, LoadTier::Medium),
        ];
        assert_eq!(best_server(&servers).unwrap().id, "x");
    }

    #[test]
    fn test_empty_catalog() {
        assert!(matches!(best_server(&[]), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn test_builtin_best_is_new_york() {
        let catalog = Catalog::builtin();
        let best = best_server(catalog.servers()).unwrap();
        assert_eq!(best.id, "1");
        assert_eq!(best.city, "New York");
    }
}
