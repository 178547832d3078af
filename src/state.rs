use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::anilist::AnilistClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::EnrichmentService;

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client is reused across every HTTP-based collaborator to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Listarr/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    /// Shared pooled client, also used directly by the image proxy.
    pub http: reqwest::Client,

    pub anilist: Arc<AnilistClient>,

    pub enrichment: Arc<EnrichmentService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http = build_shared_http_client(config.anilist.request_timeout_seconds.into())?;
        let anilist = Arc::new(AnilistClient::with_shared_client(http.clone()));
        let enrichment = Arc::new(EnrichmentService::new(store.clone(), anilist.clone()));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            http,
            anilist,
            enrichment,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
