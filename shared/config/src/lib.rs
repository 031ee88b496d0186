use std::env;

/// Runtime configuration for the storefront API, read from the environment
/// with development defaults.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub port: u16,
    pub environment: String,
}

impl ServiceConfig {
    /// Load `.env` (if present) and then read configuration from the
    /// environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let port = env::var("STOREFRONT_SERVICE_PORT")
            .unwrap_or_else(|_| "3012".to_string())
            .parse::<u16>()
            .unwrap_or(3012);

        Self {
            port,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()),
        }
    }

    pub fn bind_addr(&self) -> (&'static str, u16) {
        ("0.0.0.0", self.port)
    }
}
