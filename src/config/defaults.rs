//! Default value functions for configuration.

use std::net::SocketAddr;

// =============================================================================
// Storage Defaults
// =============================================================================

pub fn default_database_path() -> String {
    "storefront.db".to_string()
}

// =============================================================================
// HTTP Defaults
// =============================================================================

pub fn default_http_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}
