use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// # Fields
///
/// - `sub`: User ID (subject), the decimal form of the numeric ID
/// - `email`: User's email address
/// - `is_admin`: Whether the user may reach the admin surface
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Admin flag
    #[serde(default)]
    pub is_admin: bool,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// Numeric user ID, `None` when the subject is not an integer.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "123".to_string(),
            email: "test@example.com".to_string(),
            is_admin: true,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"123""#));
        assert!(serialized.contains(r#""is_admin":true"#));
    }

    #[test]
    fn test_claims_deserialize_without_admin_flag() {
        let json = r#"{"sub":"456","email":"user@test.com","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.user_id(), Some(456));
        assert!(!claims.is_admin);
    }

    #[test]
    fn test_user_id_non_numeric() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            email: "x@test.com".to_string(),
            is_admin: false,
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id(), None);
    }
}
