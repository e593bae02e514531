use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Postgres connection string; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Redis connection string; rate limiting is disabled when absent.
    pub redis_url: Option<String>,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    /// Only tokens whose email ends in `@<allowed_email_domain>` are accepted.
    pub allowed_email_domain: String,
    pub admin_role: String,
    pub max_members_limit: u32,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        Ok(Config {
            database_url: optional_var("DATABASE_URL"),
            redis_url: optional_var("REDIS_URL"),
            jwt_secret: env::var("JWT_SECRET")?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: parsed_var("SERVER_PORT", 3000),
            api_base_uri: env::var("API_BASE_URI").unwrap_or_else(|_| "/api".into()),
            allowed_email_domain: env::var("ALLOWED_EMAIL_DOMAIN")
                .unwrap_or_else(|_| "viit.ac.in".into()),
            admin_role: env::var("ADMIN_ROLE").unwrap_or_else(|_| "Admin".into()),
            max_members_limit: parsed_var("MAX_MEMBERS_LIMIT", 10),
            rate_limit_window_secs: parsed_var("RATE_LIMIT_WINDOW", 60),
            rate_limit_requests: parsed_var("RATE_LIMIT_REQUESTS", 100),
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    /// Whether `email` belongs to the configured college domain.
    pub fn is_allowed_email(&self, email: &str) -> bool {
        let suffix = format!("@{}", self.allowed_email_domain.to_ascii_lowercase());
        email.trim().to_ascii_lowercase().ends_with(&suffix)
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: None,
            redis_url: None,
            jwt_secret: "secret".into(),
            server_host: "127.0.0.1".into(),
            server_port: 3000,
            api_base_uri: "/api".into(),
            allowed_email_domain: "viit.ac.in".into(),
            admin_role: "Admin".into(),
            max_members_limit: 10,
            rate_limit_window_secs: 60,
            rate_limit_requests: 100,
        }
    }

    #[test]
    fn email_domain_check_is_case_insensitive() {
        let config = config();
        assert!(config.is_allowed_email("alice@viit.ac.in"));
        assert!(config.is_allowed_email("Bob@VIIT.ac.in"));
        assert!(!config.is_allowed_email("mallory@gmail.com"));
        assert!(!config.is_allowed_email("mallory@notviit.ac.in"));
        assert!(!config.is_allowed_email(""));
    }
}
