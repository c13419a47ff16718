/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Kakao REST API key for the geocoding proxy. Geocoding answers 503
    /// when unset.
    pub kakao_rest_key: Option<String>,
    /// Published-spreadsheet HTML URL consumed by the importer.
    pub import_sheet_url: Option<String>,
    /// Public price-statistics page scraped for market stats. The built-in
    /// fallback series is served when unset or unreachable.
    pub market_stats_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `KAKAO_REST_API_KEY`   | unset                      |
    /// | `IMPORT_SHEET_URL`     | unset                      |
    /// | `MARKET_STATS_URL`     | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let kakao_rest_key = std::env::var("KAKAO_REST_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        let import_sheet_url = std::env::var("IMPORT_SHEET_URL")
            .ok()
            .filter(|s| !s.is_empty());

        let market_stats_url = std::env::var("MARKET_STATS_URL")
            .ok()
            .filter(|s| !s.is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            kakao_rest_key,
            import_sheet_url,
            market_stats_url,
        }
    }
}
