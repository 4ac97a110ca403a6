//! HS256 JWT implementation of the token service

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use ecom_core::domain::entities::{Token, TokenInfo};
use ecom_core::domain::RequestContext;
use ecom_core::errors::{DomainResult, TokenError};
use ecom_core::services::TokenServiceTrait;
use ecom_shared::config::JwtConfig;

/// JWT claims carried by storefront tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Login the token was issued for
    pub sub: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiration (seconds since epoch)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    /// Claims valid from now for `validity_minutes`
    ///
    /// Fails when the expiry does not fit in a timestamp.
    pub fn new(
        info: &TokenInfo,
        validity_minutes: i64,
        issuer: &str,
        audience: &str,
    ) -> Result<Self, TokenError> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(validity_minutes)
            .and_then(|validity| now.checked_add_signed(validity))
            .ok_or_else(|| TokenError::signing_failed("validity out of range"))?;

        Ok(Self {
            sub: info.info.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        })
    }
}

/// Token service signing HS256 JWTs with a shared secret
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl JwtTokenService {
    pub fn new(config: &JwtConfig) -> Self {
        if config.is_using_default_secret() {
            warn!("JWT tokens are signed with the development default secret");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Encode arbitrary claims with this service's key
    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::signing_failed(e.to_string()))
    }

    /// Decode and verify a token, returning its full claims
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::TokenExpired,
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                JwtErrorKind::InvalidIssuer
                | JwtErrorKind::InvalidAudience
                | JwtErrorKind::InvalidSubject
                | JwtErrorKind::ImmatureSignature
                | JwtErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                _ => TokenError::InvalidTokenFormat,
            })
    }
}

#[async_trait]
impl TokenServiceTrait for JwtTokenService {
    async fn sign(
        &self,
        ctx: &RequestContext,
        info: &TokenInfo,
        validity_minutes: i64,
    ) -> DomainResult<Token> {
        ctx.ensure_active()?;

        if validity_minutes <= 0 {
            return Err(TokenError::signing_failed("validity must be positive").into());
        }

        let claims = Claims::new(info, validity_minutes, &self.issuer, &self.audience)?;
        let token = self.encode_claims(&claims)?;

        debug!(request_id = %ctx.request_id, jti = %claims.jti, exp = claims.exp, "Token signed");
        Ok(Token::from(token))
    }

    async fn validate(&self, ctx: &RequestContext, token: &Token) -> DomainResult<TokenInfo> {
        ctx.ensure_active()?;

        let claims = self.decode_claims(token.as_str())?;
        Ok(TokenInfo::new(claims.sub))
    }
}
