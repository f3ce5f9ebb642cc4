// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed, time-limited session tokens.
//!
//! A token is `base64url(claims-json) . base64url(hmac-sha256)`. The
//! claims carry the user id, a per-issuance nonce and the issue/expiry
//! instants, so a token is self-describing; the signature binds it to
//! the configured secret. Rotating the secret invalidates every
//! outstanding token.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    /// Per-issuance nonce. `iat` has second resolution, so without it
    /// two logins in the same second would mint identical tokens and
    /// the newer one could not displace the older.
    jti: Uuid,
    iat: i64,
    exp: i64,
}

/// Issues and verifies session tokens.
pub struct TokenIssuer {
    secret: String,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs: ttl_secs as i64,
        }
    }

    /// Issue a token for `user_id`, expiring `ttl_secs` from now.
    ///
    /// Every issuance is distinct, even for the same user within the
    /// same clock second; no store side effect.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            jti: Uuid::new_v4(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = self.sign(&payload)?;
        Ok(format!("{payload}.{signature}"))
    }

    /// Verify a token and return the embedded user id.
    ///
    /// Fails with [`AppError::InvalidToken`] on malformed structure,
    /// signature mismatch, or expiry.
    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        let (payload, signature) = token.split_once('.').ok_or(AppError::InvalidToken)?;

        let sig_bytes = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AppError::InvalidToken)?;
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        // constant-time comparison
        mac.verify_slice(&sig_bytes)
            .map_err(|_| AppError::InvalidToken)?;

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AppError::InvalidToken)?;
        let claims: Claims =
            serde_json::from_slice(&claims_bytes).map_err(|_| AppError::InvalidToken)?;

        if Utc::now().timestamp() > claims.exp {
            return Err(AppError::InvalidToken);
        }

        Ok(claims.sub)
    }

    fn sign(&self, payload: &str) -> Result<String, AppError> {
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Internal(format!("hmac init failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-test-secret-test-secret!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, 60 * 60 * 24)
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let token = issuer.issue(user_id).unwrap();
        let verified = issuer.verify(&token).unwrap();
        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_back_to_back_issues_are_distinct() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        // same user, same second: the nonce must still separate them
        let t1 = issuer.issue(user_id).unwrap();
        let t2 = issuer.issue(user_id).unwrap();
        assert_ne!(t1, t2);

        assert_eq!(issuer.verify(&t1).unwrap(), user_id);
        assert_eq!(issuer.verify(&t2).unwrap(), user_id);
    }

    #[test]
    fn test_rejects_malformed_token() {
        let issuer = issuer();
        assert!(matches!(
            issuer.verify("no-dot-here").unwrap_err(),
            AppError::InvalidToken
        ));
        assert!(matches!(
            issuer.verify("!!!.@@@").unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn test_rejects_tampered_payload() {
        let issuer = issuer();
        let token = issuer.issue(Uuid::new_v4()).unwrap();

        // swap in someone else's claims, keep the signature
        let other = issuer.issue(Uuid::new_v4()).unwrap();
        let forged_payload = other.split_once('.').unwrap().0;
        let signature = token.split_once('.').unwrap().1;
        let forged = format!("{forged_payload}.{signature}");

        assert!(matches!(
            issuer.verify(&forged).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = issuer().issue(Uuid::new_v4()).unwrap();
        let other = TokenIssuer::new("another-secret-another-secret-another", 60 * 60 * 24);
        assert!(matches!(
            other.verify(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn test_rejects_expired_token() {
        let issuer = issuer();
        let claims = Claims {
            sub: Uuid::new_v4(),
            jti: Uuid::new_v4(),
            iat: Utc::now().timestamp() - 100,
            exp: Utc::now().timestamp() - 10,
        };
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let signature = issuer.sign(&payload).unwrap();
        let token = format!("{payload}.{signature}");

        assert!(matches!(
            issuer.verify(&token).unwrap_err(),
            AppError::InvalidToken
        ));
    }
}
