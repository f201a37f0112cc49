use std::{env, time::Duration};

use crate::tracking::TrackingSchedule;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub cors_origin: Option<String>,
    pub tracking: TrackingSchedule,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(10);
        let cors_origin = env::var("APP_CORS_ORIGIN").ok().filter(|o| !o.is_empty());

        let defaults = TrackingSchedule::default();
        let tracking = TrackingSchedule {
            processing_after: secs_from_env("TRACKING_PROCESSING_SECS")
                .unwrap_or(defaults.processing_after),
            shipped_after: secs_from_env("TRACKING_SHIPPED_SECS")
                .unwrap_or(defaults.shipped_after),
            delivered_after: secs_from_env("TRACKING_DELIVERED_SECS"),
        };

        Ok(Self {
            port,
            database_url,
            max_connections,
            host,
            jwt_secret,
            cors_origin,
            tracking,
        })
    }
}

fn secs_from_env(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}
