use panelgate_cache::PanelStore;
use panelgate_core::AppError;
use panelgate_models::{
    AppClientConfig, AppConfigResponse, GuestConfig, SaveAppConfigRequest, Settings,
};
use tracing::{info, instrument};

pub struct GuestService;

impl GuestService {
    pub async fn settings(store: &dyn PanelStore) -> Result<Settings, AppError> {
        Ok(Settings::new(store.settings().await?))
    }

    #[instrument(skip(store))]
    pub async fn guest_config(store: &dyn PanelStore) -> Result<GuestConfig, AppError> {
        let settings = Self::settings(store).await?;
        Ok(GuestConfig::from(&settings))
    }

    #[instrument(skip(store))]
    pub async fn app_config(store: &dyn PanelStore) -> Result<AppConfigResponse, AppError> {
        let settings = Self::settings(store).await?;
        Ok(AppConfigResponse {
            app: AppClientConfig::from(&settings),
        })
    }

    #[instrument(skip(store, request))]
    pub async fn save_app_config(
        store: &dyn PanelStore,
        request: SaveAppConfigRequest,
    ) -> Result<(), AppError> {
        let pairs = request.into_pairs();
        let keys: Vec<&str> = pairs.iter().map(|(key, _)| key.as_str()).collect();
        info!(keys = ?keys, "Saving app config");

        store.save_settings(&pairs).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelgate_cache::MemoryStore;

    #[tokio::test]
    async fn test_save_then_read_app_config() {
        let store = MemoryStore::new();
        let request = SaveAppConfigRequest {
            windows_version: Some("2.0.1".to_string()),
            ..Default::default()
        };

        GuestService::save_app_config(&store, request).await.unwrap();
        let config = GuestService::app_config(&store).await.unwrap();

        assert_eq!(config.app.windows_version, "2.0.1");
        assert_eq!(config.app.android_version, "");
    }

    #[tokio::test]
    async fn test_guest_config_reads_store() {
        let store = MemoryStore::with_settings([("email_verify", "1"), ("app_url", "https://panel")]);
        let config = GuestService::guest_config(&store).await.unwrap();

        assert_eq!(config.is_email_verify, 1);
        assert_eq!(config.app_url.as_deref(), Some("https://panel"));
    }
}
