use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Replaces the admin IP whitelist.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct IpWhitelistRequest {
    #[validate(length(min = 1, message = "ips must contain at least one entry"))]
    #[schema(example = json!(["203.0.113.10", "198.51.100.0"]))]
    pub ips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct IpWhitelistResponse(pub Vec<String>);
