use blake2::{Blake2b, Digest};
use chrono::Utc;

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Blake2b::digest(password.as_bytes()))
}

/// Opaque one-shot token for reset/invite links.
pub fn generate_token(seed: &str) -> String {
    let now = Utc::now();
    let material = format!("{}:{}.{}", seed, now.timestamp(), now.timestamp_subsec_nanos());
    format!("{:x}", Blake2b::digest(material.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic_and_salted_tokens_are_not() {
        assert_eq!(hash_password("hunter2"), hash_password("hunter2"));
        assert_ne!(hash_password("hunter2"), hash_password("hunter3"));
        assert_ne!(generate_token("a@b.c"), generate_token("a@b.c"));
    }
}
