pub mod api;
pub mod config;
pub mod db;
pub mod store;
pub mod utils;

pub use db::DbPool;

use config::Config;
use std::time::Duration;
use store::Store;

pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config, db: DbPool) -> Self {
        let timeout = Duration::from_secs(config.database.query_timeout_secs);
        Self {
            config,
            store: Store::new(db, timeout),
        }
    }
}
