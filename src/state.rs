use std::sync::Arc;

use crate::{config::AppConfig, db::OrmConn, session::SessionStore, tracking::TrackingSchedule};

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<OrmConn>,
    pub sessions: SessionStore,
    pub jwt_secret: Arc<str>,
    pub tracking: TrackingSchedule,
}

impl AppState {
    pub fn new(orm: OrmConn, config: &AppConfig) -> Self {
        Self {
            orm: Arc::new(orm),
            sessions: SessionStore::new(),
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            tracking: config.tracking.clone(),
        }
    }

    /// The shared connection, borrowed for SeaORM calls.
    pub fn db(&self) -> &OrmConn {
        &self.orm
    }
}
