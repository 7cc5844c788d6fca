use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use tokio::task;

use crate::domain::repository::CredentialHasher;
use crate::error::MarketplaceError;

/// Argon2id PHC string with default parameters and a random digest. It parses
/// but no password verifies against it.
const DECOY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$Z2lnbWFya2V0LWRlY295IQ$nsmoxWRYHiVPhfAKY0VD6GymL/ChUwCpUblzB5WFuBM";

/// Argon2id with the crate's default parameters; hashes are PHC strings.
///
/// Both operations run on the blocking pool.
#[derive(Clone, Default)]
pub struct Argon2Hasher;

fn hash_blocking(password: &str) -> Result<String, MarketplaceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| MarketplaceError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

fn verify_blocking(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, MarketplaceError> {
        let password = password.to_owned();
        task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|e| MarketplaceError::Internal(anyhow::anyhow!("hash task failed: {e}")))?
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        let password = password.to_owned();
        let hash = hash.to_owned();
        match task::spawn_blocking(move || verify_blocking(&password, &hash)).await {
            Ok(matched) => matched,
            Err(e) => {
                tracing::error!(error = %e, "verify task failed");
                false
            }
        }
    }

    fn decoy_hash(&self) -> &str {
        DECOY_HASH
    }
}
