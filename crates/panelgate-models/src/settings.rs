//! Panel settings.
//!
//! Settings live in a flat string hash. [`Settings`] wraps a snapshot of that
//! hash and applies the panel's casts: integer flags use the leading integer of
//! the stored string, list settings are comma separated.

use std::collections::HashMap;

use panelgate_core::{leading_int, truthy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Email suffixes accepted when the suffix whitelist is enabled and nothing
/// is configured.
pub const DEFAULT_EMAIL_SUFFIXES: [&str; 9] = [
    "gmail.com",
    "qq.com",
    "163.com",
    "yahoo.com",
    "sina.com",
    "126.com",
    "outlook.com",
    "yeah.net",
    "foxmail.com",
];

/// Keys exposed by `getAppConfig` and accepted by `saveAppConfig`.
pub const APP_CONFIG_KEYS: [&str; 8] = [
    "windows_version",
    "windows_download_url",
    "macos_version",
    "macos_download_url",
    "android_version",
    "android_download_url",
    "macosintel_version",
    "macosintel_download_url",
];

const DEFAULT_CAPTCHA_TYPE: &str = "recaptcha";
const DEFAULT_RECAPTCHA_V3_THRESHOLD: f64 = 0.5;

/// Snapshot of the settings hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings(HashMap<String, String>);

impl Settings {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    /// Integer setting, `0` when missing.
    pub fn int(&self, key: &str) -> i64 {
        self.get(key).map(leading_int).unwrap_or(0)
    }

    pub fn flag(&self, key: &str) -> bool {
        truthy(self.get(key))
    }

    /// Allowed registration suffixes, `None` when the suffix whitelist is off.
    pub fn email_whitelist_suffixes(&self) -> Option<Vec<String>> {
        if !self.flag("email_whitelist_enable") {
            return None;
        }

        let suffixes = match self.get("email_whitelist_suffix") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_EMAIL_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        };
        Some(suffixes)
    }

    /// True when `email` may register under the current suffix whitelist.
    pub fn email_suffix_allowed(&self, email: &str) -> bool {
        let Some(suffixes) = self.email_whitelist_suffixes() else {
            return true;
        };
        let Some((_, domain)) = email.rsplit_once('@') else {
            return false;
        };
        suffixes.iter().any(|suffix| suffix == domain)
    }
}

impl From<HashMap<String, String>> for Settings {
    fn from(values: HashMap<String, String>) -> Self {
        Self::new(values)
    }
}

/// `email_whitelist_suffix` is the suffix list when enabled and `0` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EmailWhitelistSuffix {
    List(Vec<String>),
    Disabled(u8),
}

/// Public configuration read by the sign-in page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GuestConfig {
    pub tos_url: Option<String>,
    pub is_email_verify: u8,
    pub is_invite_force: u8,
    pub email_whitelist_suffix: EmailWhitelistSuffix,
    pub is_captcha: u8,
    pub captcha_type: String,
    pub recaptcha_site_key: Option<String>,
    pub recaptcha_v3_site_key: Option<String>,
    pub recaptcha_v3_score_threshold: f64,
    pub turnstile_site_key: Option<String>,
    pub app_description: Option<String>,
    pub app_url: Option<String>,
    pub logo: Option<String>,
    /// Older clients read this instead of `is_captcha`.
    pub is_recaptcha: u8,
}

impl From<&Settings> for GuestConfig {
    fn from(settings: &Settings) -> Self {
        let is_captcha = u8::from(settings.flag("captcha_enable"));

        Self {
            tos_url: settings.string("tos_url"),
            is_email_verify: u8::from(settings.flag("email_verify")),
            is_invite_force: u8::from(settings.flag("invite_force")),
            email_whitelist_suffix: settings
                .email_whitelist_suffixes()
                .map(EmailWhitelistSuffix::List)
                .unwrap_or(EmailWhitelistSuffix::Disabled(0)),
            is_captcha,
            captcha_type: settings
                .string("captcha_type")
                .unwrap_or_else(|| DEFAULT_CAPTCHA_TYPE.to_string()),
            recaptcha_site_key: settings.string("recaptcha_site_key"),
            recaptcha_v3_site_key: settings.string("recaptcha_v3_site_key"),
            recaptcha_v3_score_threshold: settings
                .get("recaptcha_v3_score_threshold")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_RECAPTCHA_V3_THRESHOLD),
            turnstile_site_key: settings.string("turnstile_site_key"),
            app_description: settings.string("app_description"),
            app_url: settings.string("app_url"),
            logo: settings.string("logo"),
            is_recaptcha: is_captcha,
        }
    }
}

/// Client download versions and links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppClientConfig {
    pub windows_version: String,
    pub windows_download_url: String,
    pub macos_version: String,
    pub macos_download_url: String,
    pub android_version: String,
    pub android_download_url: String,
    pub macosintel_version: String,
    pub macosintel_download_url: String,
}

impl From<&Settings> for AppClientConfig {
    fn from(settings: &Settings) -> Self {
        let get = |key: &str| settings.string(key).unwrap_or_default();
        Self {
            windows_version: get("windows_version"),
            windows_download_url: get("windows_download_url"),
            macos_version: get("macos_version"),
            macos_download_url: get("macos_download_url"),
            android_version: get("android_version"),
            android_download_url: get("android_download_url"),
            macosintel_version: get("macosintel_version"),
            macosintel_download_url: get("macosintel_download_url"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AppConfigResponse {
    pub app: AppClientConfig,
}

/// Partial update of the client app settings. Absent keys are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct SaveAppConfigRequest {
    pub windows_version: Option<String>,
    pub windows_download_url: Option<String>,
    pub macos_version: Option<String>,
    pub macos_download_url: Option<String>,
    pub android_version: Option<String>,
    pub android_download_url: Option<String>,
    pub macosintel_version: Option<String>,
    pub macosintel_download_url: Option<String>,
}

impl SaveAppConfigRequest {
    /// Key/value pairs present in the request, in [`APP_CONFIG_KEYS`] order.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        let values = [
            self.windows_version,
            self.windows_download_url,
            self.macos_version,
            self.macos_download_url,
            self.android_version,
            self.android_download_url,
            self.macosintel_version,
            self.macosintel_download_url,
        ];

        APP_CONFIG_KEYS
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
            .collect()
    }
}
