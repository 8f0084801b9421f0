use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use panelgate_auth::Claims;
use panelgate_models::{
    AppClientConfig, AppConfigResponse, AuthData, EmailWhitelistSuffix, ForgetRequest, GuestConfig,
    IpWhitelistRequest, IpWhitelistResponse, LoginRequest, RegisterRequest, SaveAppConfigRequest,
    SendEmailVerifyRequest, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::guest::controller::get_config,
        crate::modules::guest::controller::get_app_config,
        crate::modules::guest::controller::save_app_config,
        crate::modules::passport::controller::login,
        crate::modules::passport::controller::register,
        crate::modules::passport::controller::forget,
        crate::modules::passport::controller::send_email_verify,
        crate::modules::security::controller::get_ip_whitelist,
        crate::modules::security::controller::save_ip_whitelist,
    ),
    components(
        schemas(
            User,
            Claims,
            AuthData,
            LoginRequest,
            RegisterRequest,
            ForgetRequest,
            SendEmailVerifyRequest,
            GuestConfig,
            EmailWhitelistSuffix,
            AppClientConfig,
            AppConfigResponse,
            SaveAppConfigRequest,
            IpWhitelistRequest,
            IpWhitelistResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Guest", description = "Public panel configuration"),
        (name = "Passport", description = "Login, registration and password reset"),
        (name = "Admin Security", description = "Admin IP whitelist management")
    ),
    info(
        title = "Panelgate API",
        version = "0.1.0",
        description = "Proxy panel API with admin IP whitelisting and per-customer route restriction.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
