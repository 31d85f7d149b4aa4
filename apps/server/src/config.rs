use std::{net::SocketAddr, time::Duration};

/// Credentials of the administrator created (or promoted) at startup.
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// Raw JWT secret; a random one is generated when unset.
    pub secret_key: Option<String>,
    pub session_ttl: Duration,
    pub confirm_ttl: Duration,
    pub cookie_secure: bool,
    pub admin: Option<AdminBootstrap>,
    pub mail_relay_url: Option<String>,
    pub mail_from: String,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_secs(key: &str, default: u64) -> Duration {
    Duration::from_secs(
        env_opt(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default),
    )
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_opt("CHARITY_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid CHARITY_LISTEN_ADDR: {e}"))?;
        let db_path = env_opt("CHARITY_DB_PATH").unwrap_or_else(|| "./db/charity.db".into());
        let cors_allow = env_opt("CHARITY_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = env_opt("CHARITY_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30000);
        let static_dir = env_opt("CHARITY_STATIC_DIR").unwrap_or_else(|| "dist".into());
        let cookie_secure = env_opt("CHARITY_COOKIE_SECURE")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let admin = match (env_opt("CHARITY_ADMIN_EMAIL"), env_opt("CHARITY_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap { email, password }),
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("CHARITY_ADMIN_EMAIL and CHARITY_ADMIN_PASSWORD must be set together")
            }
            (None, None) => None,
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            static_dir,
            secret_key: env_opt("CHARITY_SECRET_KEY"),
            session_ttl: env_secs("CHARITY_SESSION_TTL_SECS", 14 * 24 * 60 * 60),
            confirm_ttl: env_secs("CHARITY_CONFIRM_TTL_SECS", 10 * 60),
            cookie_secure,
            admin,
            mail_relay_url: env_opt("CHARITY_MAIL_RELAY_URL"),
            mail_from: env_opt("CHARITY_MAIL_FROM")
                .unwrap_or_else(|| "no-reply@charity.local".into()),
        })
    }
}
