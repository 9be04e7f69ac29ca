use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String, // Username the credential was issued for
    pub exp: i64,    // Expiration timestamp (seconds since epoch)
    #[serde(default)]
    pub iat: Option<i64>, // Issued at timestamp
}
