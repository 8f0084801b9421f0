use panelgate_cache::PanelStore;
use panelgate_core::AppError;
use tracing::{info, instrument};

pub struct SecurityService;

impl SecurityService {
    /// Whitelisted admin IPs, sorted.
    #[instrument(skip(store))]
    pub async fn ip_whitelist(store: &dyn PanelStore) -> Result<Vec<String>, AppError> {
        let mut ips = store.ip_whitelist().await?;
        ips.sort();
        Ok(ips)
    }

    /// Replaces the whitelist with the cleaned `ips`.
    #[instrument(skip(store, ips))]
    pub async fn save_ip_whitelist(
        store: &dyn PanelStore,
        ips: &[String],
    ) -> Result<Vec<String>, AppError> {
        let cleaned = clean_ips(ips);
        store.replace_ip_whitelist(&cleaned).await?;
        info!(count = cleaned.len(), ips = ?cleaned, "Admin IP whitelist saved");
        Ok(cleaned)
    }
}

/// Trims entries, drops blanks and removes duplicates keeping the first occurrence.
pub fn clean_ips(ips: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(ips.len());
    for ip in ips.iter().map(|ip| ip.trim()) {
        if !ip.is_empty() && !cleaned.iter().any(|existing| existing == ip) {
            cleaned.push(ip.to_string());
        }
    }
    cleaned
}
