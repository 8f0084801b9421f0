use std::env;

/// Admin surface settings.
///
/// # Environment Variables
///
/// - `ADMIN_SECURE_PATH`: path segment the admin API is mounted under (default: `admin`)
/// - `ADMIN_IP_WHITELIST_ENFORCE`: reject admin requests from outside the IP whitelist
///   (default: `false`; the login precheck always applies)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityConfig {
    pub secure_path: String,
    pub enforce_ip_whitelist: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secure_path: "admin".to_string(),
            enforce_ip_whitelist: false,
        }
    }
}

impl SecurityConfig {
    pub fn from_env() -> Self {
        let secure_path = env::var("ADMIN_SECURE_PATH")
            .map(|v| v.trim_matches('/').to_string())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "admin".to_string());

        Self {
            secure_path,
            enforce_ip_whitelist: env::var("ADMIN_IP_WHITELIST_ENFORCE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SecurityConfig::default();
        assert_eq!(config.secure_path, "admin");
        assert!(!config.enforce_ip_whitelist);
    }
}
