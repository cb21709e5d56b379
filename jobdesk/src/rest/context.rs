use std::collections::HashMap;
use std::sync::Arc;

use jobdesk_api::StatusResponse;

use crate::config::Config;
use crate::db::{open_postgres_db, ApiKey, Repo};

#[derive(Clone)]
pub struct Context {
    pub cfg: Config,
    pub db: Arc<Repo>,
    pub api_keys: HashMap<String, ApiKey>,
}

impl Context {
    pub async fn new(cfg: Config) -> anyhow::Result<Self> {
        let repo = open_postgres_db(&cfg.db).await?;
        let db = Arc::new(repo);

        // Right now new api key can be added only manually.
        // So, we load all keys once at start.
        let api_keys = db
            .select_api_keys()
            .await?
            .iter()
            .map(|e| (e.key.clone(), e.clone()))
            .collect();

        Ok(Self { cfg, db, api_keys })
    }

    pub fn get_api_key(&self, api_key: &str) -> Option<ApiKey> {
        self.api_keys.get(api_key).cloned()
    }

    pub async fn service_status(&self) -> StatusResponse {
        let db = match self.db.ping().await {
            Ok(()) => true,
            Err(err) => {
                error!("db healthcheck failed: error={:#?}", err);
                false
            }
        };

        StatusResponse { healthy: db, db }
    }
}
