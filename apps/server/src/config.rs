use std::net::SocketAddr;
use std::time::Duration;

/// Process configuration (spec §2.1, §9 "global state limited to process
/// configuration"), loaded once in `main` and handed down as `Arc` fields on
/// [`crate::main_lib::AppState`] rather than read from ambient globals.
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub hmac_secret: Vec<u8>,
    pub session_hmac_secret: Vec<u8>,
    pub encryption_key: [u8; 32],
    pub market_data_url: Option<String>,
    pub market_data_timeout: Duration,
    pub write_rate_limit_per_sec: u32,
    pub write_rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("MONETA_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("invalid MONETA_LISTEN_ADDR");

        let db_path = std::env::var("MONETA_DB_PATH")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "./db/moneta.db".to_string());

        let cors_allow = std::env::var("MONETA_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let timeout_ms: u64 = std::env::var("MONETA_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30_000);

        let hmac_secret = std::env::var("MONETA_HMAC_SECRET")
            .unwrap_or_else(|_| "dev-only-hmac-secret-change-me".to_string())
            .into_bytes();

        // The session/auth service stamps requests with a secret shared
        // between it and this service (spec §2.2 "per-session secret");
        // that key is distinct from the account-number fingerprint key
        // above. Falls back to the fingerprint key only in development,
        // where a single `.env` commonly carries just one HMAC value.
        let session_hmac_secret = std::env::var("MONETA_SESSION_HMAC_SECRET")
            .map(|v| v.into_bytes())
            .unwrap_or_else(|_| hmac_secret.clone());

        let encryption_key = parse_encryption_key(
            std::env::var("MONETA_ENCRYPTION_KEY").unwrap_or_else(|_| "0".repeat(64)),
        );

        let market_data_url = std::env::var("MONETA_MARKET_DATA_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        let market_data_timeout_ms: u64 = std::env::var("MONETA_MARKET_DATA_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5_000);

        let write_rate_limit_per_sec: u32 = std::env::var("MONETA_WRITE_RATE_LIMIT_PER_SEC")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let write_rate_limit_burst: u32 = std::env::var("MONETA_WRITE_RATE_LIMIT_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            hmac_secret,
            session_hmac_secret,
            encryption_key,
            market_data_url,
            market_data_timeout: Duration::from_millis(market_data_timeout_ms),
            write_rate_limit_per_sec,
            write_rate_limit_burst,
        }
    }
}

/// Accepts a 64-char hex string; falls back to an all-zero key (development
/// only) when unset or malformed rather than failing startup.
fn parse_encryption_key(hex_str: String) -> [u8; 32] {
    let mut key = [0u8; 32];
    if let Ok(bytes) = hex::decode(hex_str.trim()) {
        if bytes.len() == 32 {
            key.copy_from_slice(&bytes);
        }
    }
    key
}
