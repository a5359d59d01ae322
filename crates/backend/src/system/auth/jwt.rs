use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::{Role, TokenClaims};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::shared::data::settings;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24; // one shift and change
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 90;
const JWT_SECRET_KEY: &str = "jwt_secret";

/// Signs an access token for the user
pub async fn generate_access_token(user_id: &str, username: &str, role: Role) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        exp,
        iat,
    };

    let secret = get_jwt_secret().await?;
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

/// Opaque refresh token; only its hash is stored
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Reads the signing secret, creating it on first use
pub async fn get_jwt_secret() -> Result<String> {
    match settings::get(JWT_SECRET_KEY).await {
        Ok(Some(secret)) => Ok(secret),
        Ok(None) | Err(_) => {
            let secret = generate_jwt_secret();
            if let Err(e) = settings::set(
                JWT_SECRET_KEY,
                &secret,
                "Auto-generated JWT secret for authentication",
            )
            .await
            {
                tracing::warn!("Could not persist JWT secret: {}", e);
            }
            Ok(secret)
        }
    }
}

/// 256 random bits, base64 encoded
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

pub fn calculate_refresh_token_expiration() -> String {
    let exp = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
    exp.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_256_bits() {
        use base64::{engine::general_purpose, Engine as _};
        let secret = generate_jwt_secret();
        assert_eq!(general_purpose::STANDARD.decode(secret).unwrap().len(), 32);
        assert_ne!(generate_jwt_secret(), generate_jwt_secret());
    }
}
