use crate::types::{AppError, Claims, Result, Role, TokenResponse};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use tracing::error;

/// Why a token failed verification or parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signature does not match the active signing key.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Not a structurally valid token.
    #[error("malformed token")]
    Malformed,

    /// Expiry is in the past.
    #[error("expired token")]
    Expired,

    /// Token was signed with an algorithm other than HS256.
    #[error("unsupported token algorithm")]
    Unsupported,

    /// Required claims are missing or blank.
    #[error("token claims are empty")]
    EmptyClaims,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => TokenError::Unsupported,
            ErrorKind::MissingRequiredClaim(_) => TokenError::EmptyClaims,
            _ => TokenError::Malformed,
        }
    }
}

/// Issues and verifies HS256-signed bearer tokens.
///
/// The service is pure: issuing a token stores nothing, and verification
/// consults only the signature and the embedded expiry. Claim timestamps
/// are epoch milliseconds so expiry tracks the configured TTLs exactly;
/// the service performs its own expiry comparison instead of relying on
/// the second-granularity check built into the JWT library.
pub struct TokenService {
    secret: String,
    access_ttl_ms: i64,
    refresh_ttl_ms: i64,
}

/// Minimum signing key length in bytes (256-bit HMAC).
const MIN_SECRET_BYTES: usize = 32;

impl TokenService {
    /// Creates a new TokenService.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing key, at least 32 bytes
    /// * `access_ttl_ms` - Access token validity in milliseconds
    /// * `refresh_ttl_ms` - Refresh token validity in milliseconds
    pub fn new(secret: String, access_ttl_ms: i64, refresh_ttl_ms: i64) -> Result<Self> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::InvalidInput(format!(
                "JWT secret must be at least {} bytes",
                MIN_SECRET_BYTES
            )));
        }

        Ok(Self {
            secret,
            access_ttl_ms,
            refresh_ttl_ms,
        })
    }

    /// Issues a signed access token carrying identity and role claims.
    pub fn issue_access_token(&self, user_id: i64, email: &str, role: Role) -> Result<String> {
        let now = Utc::now().timestamp_millis();
        let claims = Claims {
            sub: user_id.to_string(),
            email: Some(email.to_string()),
            role: Some(role),
            iat: now,
            exp: now + self.access_ttl_ms,
        };

        self.sign(&claims)
    }

    /// Issues a signed refresh token carrying only the subject.
    pub fn issue_refresh_token(&self, user_id: i64) -> Result<String> {
        let now = Utc::now().timestamp_millis();
        let claims = Claims {
            sub: user_id.to_string(),
            email: None,
            role: None,
            iat: now,
            exp: now + self.refresh_ttl_ms,
        };

        self.sign(&claims)
    }

    /// Issues an access and refresh token pair for a user.
    pub fn issue_token_pair(&self, user_id: i64, email: &str, role: Role) -> Result<TokenResponse> {
        let access_token = self.issue_access_token(user_id, email, role)?;
        let refresh_token = self.issue_refresh_token(user_id)?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
            expires_in: self.access_ttl_ms / 1_000,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Auth(format!("Failed to sign token: {}", e)))
    }

    /// Whether a token is currently valid: well-formed, signed with the
    /// active key, and not yet expired.
    ///
    /// Never fails; the failure cause is logged, the token itself is not.
    pub fn verify(&self, token: &str) -> bool {
        match self.parse_claims(token) {
            Ok(_) => true,
            Err(e) => {
                error!("Token verification failed: {}", e);
                false
            }
        }
    }

    /// Decodes a token and returns its claims.
    ///
    /// The signature and the `alg` header are checked by the JWT library
    /// (pinned to HS256); expiry is checked here against the millisecond
    /// clock.
    pub fn parse_claims(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;

        let claims = data.claims;
        if claims.sub.trim().is_empty() {
            return Err(TokenError::EmptyClaims);
        }
        if Utc::now().timestamp_millis() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Whether a token's expiry has passed.
    ///
    /// Fail-closed: a token that cannot be parsed or whose signature does
    /// not match counts as expired.
    pub fn is_expired(&self, token: &str) -> bool {
        self.parse_claims(token).is_err()
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl_ms", &self.access_ttl_ms)
            .field("refresh_ttl_ms", &self.refresh_ttl_ms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new(
            "test-secret-key-that-is-at-least-32-chars".to_string(),
            900_000,     // 15 minutes
            604_800_000, // 7 days
        )
        .expect("should build service")
    }

    #[test]
    fn test_rejects_short_secret() {
        let result = TokenService::new("too-short".to_string(), 900_000, 604_800_000);

        assert!(result.is_err(), "secret under 32 bytes should be rejected");
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = create_test_service();

        let token = service
            .issue_access_token(42, "test@example.com", Role::Creator)
            .expect("should issue token");
        let claims = service.parse_claims(&token).expect("should parse claims");

        assert_eq!(claims.sub, "42", "subject should be the decimal user id");
        assert_eq!(claims.email.as_deref(), Some("test@example.com"));
        assert_eq!(claims.role, Some(Role::Creator));
    }

    #[test]
    fn test_token_structure() {
        let service = create_test_service();

        let token = service
            .issue_access_token(1, "a@b.com", Role::Learner)
            .expect("should issue token");

        assert_eq!(
            token.split('.').count(),
            3,
            "token should have header, payload and signature segments"
        );
    }

    #[test]
    fn test_refresh_token_carries_only_subject() {
        let service = create_test_service();

        let token = service.issue_refresh_token(7).expect("should issue token");
        let claims = service.parse_claims(&token).expect("should parse claims");

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, None, "refresh tokens carry no email");
        assert_eq!(claims.role, None, "refresh tokens carry no role");
    }

    #[test]
    fn test_token_pair_expires_in_seconds() {
        let service = create_test_service();

        let pair = service
            .issue_token_pair(3, "user@test.com", Role::Learner)
            .expect("should issue pair");

        assert_eq!(
            pair.expires_in, 900,
            "expires_in should be the access TTL in seconds"
        );
        assert_ne!(
            pair.access_token, pair.refresh_token,
            "access and refresh tokens should differ"
        );
    }

    #[test]
    fn test_claim_timestamps_are_milliseconds() {
        let service = create_test_service();

        let token = service
            .issue_access_token(5, "user@test.com", Role::Learner)
            .expect("should issue token");
        let claims = service.parse_claims(&token).expect("should parse claims");

        let now = Utc::now().timestamp_millis();
        assert!(
            claims.iat <= now && claims.iat >= now - 5_000,
            "iat should be the current millisecond timestamp"
        );
        assert_eq!(
            claims.exp,
            claims.iat + 900_000,
            "exp should be iat plus the access TTL"
        );
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let service = create_test_service();

        let token = service
            .issue_access_token(9, "user@test.com", Role::Learner)
            .expect("should issue token");

        // Flip the first character of the signature segment.
        let (head, signature) = token.rsplit_once('.').expect("token has a signature");
        let first = signature.chars().next().expect("signature is not empty");
        let flipped = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);

        assert_eq!(
            service.parse_claims(&tampered),
            Err(TokenError::InvalidSignature),
            "tampered signature should be detected"
        );
        assert!(!service.verify(&tampered));

        // Truncating the signature must not verify either.
        let truncated = &token[..token.len() - 4];
        assert!(!service.verify(truncated));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let service1 = TokenService::new(
            "secret-one-that-is-32-chars-long".to_string(),
            900_000,
            604_800_000,
        )
        .expect("should build");
        let service2 = TokenService::new(
            "secret-two-that-is-32-chars-long".to_string(),
            900_000,
            604_800_000,
        )
        .expect("should build");

        let token = service1
            .issue_access_token(11, "user@test.com", Role::Admin)
            .expect("should issue token");

        assert_eq!(
            service2.parse_claims(&token),
            Err(TokenError::InvalidSignature),
            "token from another key should not verify"
        );
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = create_test_service();

        assert_eq!(
            service.parse_claims("not-a-token"),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            service.parse_claims("still..not@a!token"),
            Err(TokenError::Malformed)
        );
        assert!(!service.verify(""));
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        let service = create_test_service();

        // Same key, but signed HS384.
        let claims = Claims {
            sub: "13".to_string(),
            email: Some("user@test.com".to_string()),
            role: Some(Role::Learner),
            iat: Utc::now().timestamp_millis(),
            exp: Utc::now().timestamp_millis() + 900_000,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret("test-secret-key-that-is-at-least-32-chars".as_bytes()),
        )
        .expect("should sign");

        assert_eq!(
            service.parse_claims(&token),
            Err(TokenError::Unsupported),
            "only HS256 tokens should be accepted"
        );
    }

    #[test]
    fn test_blank_subject_rejected() {
        let service = create_test_service();

        let claims = Claims {
            sub: "  ".to_string(),
            email: Some("user@test.com".to_string()),
            role: Some(Role::Learner),
            iat: Utc::now().timestamp_millis(),
            exp: Utc::now().timestamp_millis() + 900_000,
        };
        let token = service.sign(&claims).expect("should sign");

        assert_eq!(service.parse_claims(&token), Err(TokenError::EmptyClaims));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();

        // exp already in the past.
        let now = Utc::now().timestamp_millis();
        let claims = Claims {
            sub: "21".to_string(),
            email: Some("user@test.com".to_string()),
            role: Some(Role::Learner),
            iat: now - 10_000,
            exp: now - 1_000,
        };
        let token = service.sign(&claims).expect("should sign");

        assert_eq!(service.parse_claims(&token), Err(TokenError::Expired));
        assert!(!service.verify(&token), "expired token should not verify");
        assert!(service.is_expired(&token));
    }

    #[test]
    fn test_is_expired_fails_closed() {
        let service = create_test_service();

        let valid = service
            .issue_access_token(2, "user@test.com", Role::Learner)
            .expect("should issue token");

        assert!(!service.is_expired(&valid), "fresh token is not expired");
        assert!(
            service.is_expired("garbage"),
            "unparseable token counts as expired"
        );

        let other = TokenService::new(
            "another-secret-that-is-32-chars!".to_string(),
            900_000,
            604_800_000,
        )
        .expect("should build");
        assert!(
            other.is_expired(&valid),
            "token with a foreign signature counts as expired"
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let service = create_test_service();

        let debug = format!("{:?}", service);
        assert!(
            !debug.contains("test-secret-key"),
            "Debug output must not leak the signing key"
        );
    }
}
