use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Db;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    /// JWT signing secret, resolved at startup from config or environment.
    pub jwt_secret: Arc<String>,
    /// Request counter reported at /admin/metrics.
    pub hits: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(db: Db, config: Config, jwt_secret: String) -> Self {
        Self {
            db,
            config,
            jwt_secret: Arc::new(jwt_secret),
            hits: Arc::new(AtomicU64::new(0)),
        }
    }
}
