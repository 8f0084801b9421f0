use std::time::Duration;

use anyhow::anyhow;
use panelgate_auth::{bearer, create_access_token};
use panelgate_cache::PanelStore;
use panelgate_config::JwtConfig;
use panelgate_core::{AppError, codes, hash_password, verify_password};
use panelgate_models::{
    AuthData, ForgetRequest, LoginRequest, RegisterRequest, SendEmailParams, SendEmailVerifyRequest,
    Settings, User,
};
use rand::Rng;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::jobs::MailQueue;
use crate::utils::client_ip::ip_allowed;

/// Lifetime of an email verification code.
pub const EMAIL_CODE_TTL: Duration = Duration::from_secs(300);
/// Minimum gap between two codes for the same address.
pub const EMAIL_CODE_RESEND_INTERVAL: Duration = Duration::from_secs(60);

const INVALID_CREDENTIALS: &str = "Incorrect email or password";
const INVALID_EMAIL_CODE: &str = "Incorrect email verification code";

pub struct PassportService;

impl PassportService {
    #[instrument(skip(db))]
    pub async fn find_user(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password, is_admin, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    /// Password login. Admin accounts must come from a whitelisted `/24`.
    #[instrument(skip(db, store, jwt_config, dto), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        store: &dyn PanelStore,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
        client_ip: &str,
    ) -> Result<AuthData, AppError> {
        let whitelist: Vec<String> = store
            .ip_whitelist()
            .await?
            .iter()
            .map(|ip| ip.trim().to_string())
            .collect();
        info!(request_ip = %client_ip, whitelist = ?whitelist, "Admin login pre-check IP whitelist");

        let user = Self::find_user(db, &dto.email).await?;

        if let Some(user) = &user {
            check_admin_login_ip(user, client_ip, &whitelist)?;
        }

        let user = user.ok_or_else(|| AppError::bad_request(anyhow!(INVALID_CREDENTIALS)))?;

        if !verify_password(&dto.password, &user.password)? {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::bad_request(anyhow!(INVALID_CREDENTIALS)));
        }

        info!(user_id = user.id, is_admin = user.is_admin, "Login succeeded");
        auth_data(&user, jwt_config)
    }

    #[instrument(skip(db, store, jwt_config, dto), fields(email = %dto.email))]
    pub async fn register(
        db: &PgPool,
        store: &dyn PanelStore,
        jwt_config: &JwtConfig,
        dto: RegisterRequest,
    ) -> Result<AuthData, AppError> {
        let settings = Settings::new(store.settings().await?);

        if !settings.email_suffix_allowed(&dto.email) {
            return Err(AppError::bad_request(anyhow!(
                "Email suffix is not in the Whitelist"
            )));
        }

        if settings.flag("email_verify") {
            let given = dto.email_code.as_deref().unwrap_or("");
            let stored = store.email_code(&dto.email).await?;
            if !email_code_matches(stored.as_deref(), given) {
                return Err(AppError::bad_request(anyhow!(INVALID_EMAIL_CODE)));
            }
        }

        if Self::find_user(db, &dto.email).await?.is_some() {
            return Err(AppError::bad_request(anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password, is_admin)
             VALUES ($1, $2, FALSE)
             RETURNING id, email, password, is_admin, created_at",
        )
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await?;

        if settings.flag("email_verify") {
            store.forget_email_code(&dto.email).await?;
        }

        info!(user_id = user.id, "User registered");
        auth_data(&user, jwt_config)
    }

    #[instrument(skip(db, store, dto), fields(email = %dto.email))]
    pub async fn forget(
        db: &PgPool,
        store: &dyn PanelStore,
        dto: ForgetRequest,
    ) -> Result<(), AppError> {
        let stored = store.email_code(&dto.email).await?;
        if !email_code_matches(stored.as_deref(), &dto.email_code) {
            return Err(AppError::bad_request(anyhow!(INVALID_EMAIL_CODE)));
        }

        let user = Self::find_user(db, &dto.email).await?.ok_or_else(|| {
            AppError::bad_request(anyhow!("This email is not registered in the system"))
        })?;

        let hashed_password = hash_password(&dto.password)?;

        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&hashed_password)
            .bind(user.id)
            .execute(db)
            .await?;

        store.forget_email_code(&dto.email).await?;

        info!(user_id = user.id, "Password reset");
        Ok(())
    }

    /// Issues a six digit code and queues the email carrying it.
    #[instrument(skip(store, queue, dto), fields(email = %dto.email))]
    pub async fn send_email_verify(
        store: &dyn PanelStore,
        queue: &MailQueue,
        dto: SendEmailVerifyRequest,
    ) -> Result<(), AppError> {
        if store.email_code_recently_sent(&dto.email).await? {
            return Err(AppError::too_many_requests(
                "Email verification code has been sent, please request again later".to_string(),
            ));
        }

        let code = generate_email_code();
        let settings = Settings::new(store.settings().await?);
        let app_name = settings.get("app_name").unwrap_or("Panelgate");

        store
            .put_email_code(&dto.email, &code, EMAIL_CODE_TTL)
            .await?;
        store
            .mark_email_code_sent(&dto.email, EMAIL_CODE_RESEND_INTERVAL)
            .await?;

        let params = SendEmailParams {
            email: dto.email.clone(),
            subject: format!("{} email verification code", app_name),
            content: format!(
                "Your email verification code is {}. It is valid for {} minutes.",
                code,
                EMAIL_CODE_TTL.as_secs() / 60
            ),
        };
        let job_id = queue.dispatch(params).await?;

        info!(job_id = %job_id, "Email verification code queued");
        Ok(())
    }
}

/// Refuses admin logins from outside the whitelist. Other accounts pass.
pub fn check_admin_login_ip(
    user: &User,
    client_ip: &str,
    whitelist: &[String],
) -> Result<(), AppError> {
    if user.is_admin && !ip_allowed(client_ip, whitelist) {
        warn!(user_id = user.id, client_ip = %client_ip, "Admin login IP not in whitelist");
        let (code, message) = codes::ADMIN_LOGIN_IP_DENIED;
        return Err(AppError::coded(code, message));
    }
    Ok(())
}

pub fn auth_data(user: &User, jwt_config: &JwtConfig) -> Result<AuthData, AppError> {
    let token = create_access_token(user.id, &user.email, user.is_admin, jwt_config)?;
    Ok(AuthData {
        auth_data: bearer(&token),
        token,
        is_admin: user.is_admin,
    })
}

pub fn email_code_matches(stored: Option<&str>, given: &str) -> bool {
    matches!(stored, Some(code) if !given.is_empty() && code == given)
}

fn generate_email_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::Utc;
    use panelgate_auth::{strip_bearer, verify_token};
    use panelgate_cache::MemoryStore;
    use std::sync::Arc;

    fn user(is_admin: bool) -> User {
        User {
            id: 5,
            email: "admin@example.com".to_string(),
            password: String::new(),
            is_admin,
            created_at: Utc::now(),
        }
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_admin_login_ip_check() {
        let whitelist = vec!["203.0.113.1".to_string()];

        assert!(check_admin_login_ip(&user(true), "203.0.113.50", &whitelist).is_ok());
        assert!(check_admin_login_ip(&user(false), "198.51.100.1", &whitelist).is_ok());

        let err = check_admin_login_ip(&user(true), "198.51.100.1", &whitelist).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.code, 403);
        assert_eq!(err.error.to_string(), "管理员登录 IP 不在白名单中");
    }

    #[test]
    fn test_admin_login_refused_when_whitelist_empty() {
        assert!(check_admin_login_ip(&user(true), "203.0.113.50", &[]).is_err());
    }

    #[test]
    fn test_auth_data() {
        let data = auth_data(&user(true), &jwt_config()).unwrap();
        assert!(data.is_admin);
        assert_eq!(strip_bearer(&data.auth_data), Some(data.token.as_str()));

        let claims = verify_token(&data.token, &jwt_config()).unwrap();
        assert_eq!(claims.user_id(), Some(5));
    }

    #[test]
    fn test_email_code_matches() {
        assert!(email_code_matches(Some("123456"), "123456"));
        assert!(!email_code_matches(Some("123456"), "654321"));
        assert!(!email_code_matches(None, "123456"));
        assert!(!email_code_matches(Some(""), ""));
    }

    #[test]
    fn test_generated_code_has_six_digits() {
        for _ in 0..100 {
            let code = generate_email_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn test_send_email_verify_stores_code_and_queues_mail() {
        let store = Arc::new(MemoryStore::new());
        let queue = MailQueue::new(store.clone());
        let dto = SendEmailVerifyRequest {
            email: "user@example.com".to_string(),
        };

        PassportService::send_email_verify(store.as_ref(), &queue, dto.clone())
            .await
            .unwrap();

        let code = store.email_code("user@example.com").await.unwrap().unwrap();
        assert_eq!(code.len(), 6);
        assert_eq!(store.queue_len(crate::jobs::SendEmailJob::QUEUE), 1);

        let err = PassportService::send_email_verify(store.as_ref(), &queue, dto)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(store.queue_len(crate::jobs::SendEmailJob::QUEUE), 1);
    }
}
