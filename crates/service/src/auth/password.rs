use sha2::{Digest, Sha256};

/// Password used until the admin changes it.
pub const DEFAULT_PASSWORD: &str = "admin123";

/// `hex(sha256(password + salt))`.
#[derive(Clone)]
pub struct PasswordHasher {
    salt: String,
}

impl PasswordHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(self.salt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        self.hash(password) == stored_hash
    }

    pub fn default_hash(&self) -> String {
        self.hash(DEFAULT_PASSWORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_hex_sha256_of_password_then_salt() {
        let h = PasswordHasher::new("");
        // sha256("abc")
        assert_eq!(h.hash("abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
        let salted = PasswordHasher::new("c");
        assert_eq!(salted.hash("ab"), h.hash("abc"));
    }

    #[test]
    fn verify_depends_on_salt() {
        let a = PasswordHasher::new("salt-a");
        let b = PasswordHasher::new("salt-b");
        let stored = a.hash("pw");
        assert!(a.verify("pw", &stored));
        assert!(!a.verify("pw2", &stored));
        assert!(!b.verify("pw", &stored));
        assert_eq!(a.default_hash(), a.hash(DEFAULT_PASSWORD));
    }
}
