use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::claims::SessionClaims;
use crate::ClientError;

/// Decode the claims of a stored credential without verifying its signature.
///
/// The client never holds the signing key; only the backend does. The
/// claims are read solely to check `exp` locally before an authenticated
/// call; the backend remains the authority on token validity.
pub fn decode_claims(token: &str) -> Result<SessionClaims, ClientError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    // Expiry is compared against the clock by the session guard
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["exp"]);

    let token_data = decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| ClientError::Credential(format!("Failed to decode token claims: {e}")))?;

    Ok(token_data.claims)
}

pub fn is_expired(claims: &SessionClaims, now: DateTime<Utc>) -> bool {
    claims.exp <= now.timestamp()
}

#[cfg(test)]
pub(crate) fn issue_test_token(sub: &str, exp: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = SessionClaims {
        sub: sub.to_string(),
        exp,
        iat: Some(exp - 3600),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"test_secret_key"),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_claims_without_the_signing_key() {
        let exp = Utc::now().timestamp() + 3600;
        let token = issue_test_token("jdoe", exp);

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "jdoe");
        assert_eq!(claims.exp, exp);
    }

    #[test]
    fn expiry_is_a_clock_comparison() {
        let now = Utc::now();
        let live = SessionClaims {
            sub: "jdoe".to_string(),
            exp: now.timestamp() + 60,
            iat: None,
        };
        let stale = SessionClaims {
            sub: "jdoe".to_string(),
            exp: now.timestamp() - 60,
            iat: None,
        };
        assert!(!is_expired(&live, now));
        assert!(is_expired(&stale, now));
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        assert!(matches!(
            decode_claims("not-a-token"),
            Err(ClientError::Credential(_))
        ));
    }
}
