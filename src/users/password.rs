use argon2::{
    password_hash::{PasswordHasher as _, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::users::repo_types::User;

/// One-way transform of a plaintext credential into a storable hash.
pub trait PasswordHasher: Send + Sync {
    /// `user` is the record the credential belongs to.
    fn hash(&self, plain: &str, user: &User) -> anyhow::Result<String>;
}

/// Argon2id with default parameters and a random salt per hash.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str, user: &User) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, email = %user.email, "could not hash credential");
                anyhow::anyhow!("hash credential: {e}")
            })?;
        Ok(phc.to_string())
    }
}

#[cfg(test)]
impl Argon2PasswordHasher {
    /// Whether `plain` matches a PHC string this hasher produced.
    pub fn matches(&self, plain: &str, phc: &str) -> anyhow::Result<bool> {
        use argon2::password_hash::{PasswordHash, PasswordVerifier};

        let parsed = PasswordHash::new(phc).map_err(|e| anyhow::anyhow!("parse hash: {e}"))?;
        Ok(self
            .argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::new("a@b.com", "alice")
    }

    #[test]
    fn output_is_an_argon2id_phc_string() {
        let hasher = Argon2PasswordHasher::default();
        let phc = hasher.hash("hunter22", &alice()).unwrap();

        let parts: Vec<_> = phc.split('$').collect();
        assert_eq!(parts[1], "argon2id");
        assert!(parts[2].starts_with("v="));
        assert!(!phc.contains("hunter22"));
    }

    #[test]
    fn same_credential_for_two_users_gets_distinct_hashes() {
        let hasher = Argon2PasswordHasher::default();
        let bob = User::new("b@b.com", "bob");
        let first = hasher.hash("shared-secret", &alice()).unwrap();
        let second = hasher.hash("shared-secret", &bob).unwrap();

        assert_ne!(first, second);
        assert!(hasher.matches("shared-secret", &first).unwrap());
        assert!(hasher.matches("shared-secret", &second).unwrap());
    }

    #[test]
    fn only_the_original_credential_matches() {
        let hasher = Argon2PasswordHasher::default();
        let phc = hasher.hash("pässwörd ✓", &alice()).unwrap();

        assert!(hasher.matches("pässwörd ✓", &phc).unwrap());
        assert!(!hasher.matches("passwored", &phc).unwrap());
        assert!(!hasher.matches("", &phc).unwrap());
    }

    #[test]
    fn empty_credential_still_hashes() {
        let hasher = Argon2PasswordHasher::default();
        let phc = hasher.hash("", &alice()).unwrap();
        assert!(hasher.matches("", &phc).unwrap());
        assert!(hasher.matches("x", "plaintext").is_err());
    }
}
