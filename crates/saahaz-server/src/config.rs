//! Server configuration.

use saahaz_auth::AuthConfig;
use saahaz_shop::PricingPolicy;

/// Everything the binary needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener (e.g. `0.0.0.0:8001`).
    pub bind_addr: String,
    pub auth: AuthConfig,
    pub pricing: PricingPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8001".into(),
            auth: AuthConfig::default(),
            pricing: PricingPolicy::default(),
        }
    }
}
