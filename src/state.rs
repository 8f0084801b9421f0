use std::sync::Arc;

use panelgate_access::AccessPolicy;
use panelgate_cache::{CacheConfig, PanelStore, RedisStore};
use panelgate_config::{CorsConfig, JwtConfig, RestrictionConfig, SecurityConfig};
use panelgate_db::{PgPool, init_db_pool};
use tracing::info;

use crate::jobs::MailQueue;
use crate::middleware::admin_ip::AdminIpGuard;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub store: Arc<dyn PanelStore>,
    pub mail_queue: MailQueue,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub security_config: SecurityConfig,
    pub access_policy: Arc<AccessPolicy>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security_config", &self.security_config)
            .field("access_policy", &self.access_policy)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        db: PgPool,
        store: Arc<dyn PanelStore>,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        security_config: SecurityConfig,
        restriction: &RestrictionConfig,
    ) -> Self {
        Self {
            db,
            mail_queue: MailQueue::new(store.clone()),
            store,
            jwt_config,
            cors_config,
            security_config,
            access_policy: Arc::new(access_policy_from(restriction)),
        }
    }

    pub fn admin_ip_guard(&self) -> AdminIpGuard {
        AdminIpGuard {
            enforce: self.security_config.enforce_ip_whitelist,
            store: self.store.clone(),
        }
    }
}

/// Builds the route restriction from the configured ID lists.
pub fn access_policy_from(restriction: &RestrictionConfig) -> AccessPolicy {
    AccessPolicy::standard(
        restriction.customer_ids.iter().copied(),
        restriction.dashboard_only_ids.iter().copied(),
    )
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
    let db = init_db_pool(&database_url).await?;

    let store = RedisStore::connect(&CacheConfig::from_env()).await?;

    let restriction = RestrictionConfig::from_env();
    info!(
        customer_ids = restriction.customer_ids.len(),
        dashboard_only_ids = restriction.dashboard_only_ids.len(),
        disabled = restriction.is_disabled(),
        "Access restriction loaded"
    );

    Ok(AppState::new(
        db,
        Arc::new(store),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        SecurityConfig::from_env(),
        &restriction,
    ))
}
